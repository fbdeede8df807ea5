//! Gaussian naive Bayes model over the single percentage feature

use crate::category::Category;
use crate::data::RegionRecord;
use crate::error::ModelError;
use ndarray::{Array1, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::f64::consts::PI;

/// Default share of samples held out for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.25;
/// Default seed of the train/test shuffle
pub const DEFAULT_SEED: u64 = 42;
/// Default fraction of the feature variance added to every class variance
pub const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;
/// Smallest variance floor, used when the training feature is constant
pub const MIN_EPSILON: f64 = 1e-12;

/// Percentages paired with their threshold labels
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDataset {
    /// Feature values (percentages)
    pub features: Array1<f64>,
    /// Target labels aligned with `features`
    pub labels: Vec<Category>,
}

impl LabeledDataset {
    /// Label every record with its threshold category
    pub fn from_records(records: &[RegionRecord]) -> Self {
        Self {
            features: records.iter().map(|r| r.percentage).collect(),
            labels: records.iter().map(RegionRecord::category).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Subset of the dataset at the given row indices, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Shuffle row indices with a seeded generator and split them into (train, test)
    ///
    /// The first `ceil(test_size * n)` shuffled rows form the test partition.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<(Self, Self), ModelError> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(ModelError::InvalidTestSize(test_size));
        }

        let n_samples = self.len();
        let n_test = (test_size * n_samples as f64).ceil() as usize;
        if n_test == 0 || n_test >= n_samples {
            return Err(ModelError::PartitionTooSmall { samples: n_samples });
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        tracing::debug!(
            train = train_idx.len(),
            test = test_idx.len(),
            seed,
            "split labeled dataset"
        );
        Ok((self.select(train_idx), self.select(test_idx)))
    }
}

/// Gaussian parameters of one class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassParams {
    pub category: Category,
    /// Mean of the percentage within the class
    pub mean: f64,
    /// Variance of the percentage within the class, smoothing included
    pub variance: f64,
    /// Relative frequency of the class in the training partition
    pub prior: f64,
    /// Number of training samples of the class
    pub count: usize,
}

impl ClassParams {
    /// Log of prior × Gaussian density at `x`
    fn joint_log_likelihood(&self, x: f64) -> f64 {
        let diff = x - self.mean;
        self.prior.ln() - 0.5 * (2.0 * PI * self.variance).ln() - 0.5 * diff * diff / self.variance
    }
}

/// Fitted Gaussian naive Bayes classifier
///
/// Only categories seen during fitting carry parameters; the others can never be predicted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaussianNb {
    /// Per-class parameters in ascending category order
    pub classes: Vec<ClassParams>,
    /// Variance floor added to every class
    pub epsilon: f64,
}

impl GaussianNb {
    /// Fit class priors, means and variances on a labeled training set
    ///
    /// # Arguments
    /// * `train` - Training partition
    /// * `var_smoothing` - Fraction of the overall feature variance added to each class variance
    ///
    /// # Returns
    /// * Fitted model with one entry per class present in `train`
    pub fn fit(train: &LabeledDataset, var_smoothing: f64) -> Result<Self, ModelError> {
        if !(var_smoothing.is_finite() && var_smoothing >= 0.0) {
            return Err(ModelError::InvalidVarSmoothing(var_smoothing));
        }
        if train.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let n_samples = train.len() as f64;
        let epsilon = (var_smoothing * train.features.var(0.0)).max(MIN_EPSILON);

        let mut classes = Vec::new();
        for category in Category::ALL {
            let indices: Vec<usize> = train
                .labels
                .iter()
                .enumerate()
                .filter_map(|(i, &label)| (label == category).then_some(i))
                .collect();

            if indices.is_empty() {
                tracing::warn!(%category, "category absent from training split; it cannot be predicted");
                continue;
            }

            let values = train.features.select(Axis(0), &indices);
            let mean = values.mean().unwrap_or_default();
            let variance = values.var(0.0) + epsilon;
            let params = ClassParams {
                category,
                mean,
                variance,
                prior: indices.len() as f64 / n_samples,
                count: indices.len(),
            };
            tracing::debug!(
                %category,
                mean = params.mean,
                variance = params.variance,
                prior = params.prior,
                "fitted class"
            );
            classes.push(params);
        }

        Ok(Self { classes, epsilon })
    }

    /// Parameters of a category, if it was present during fitting
    pub fn params(&self, category: Category) -> Option<&ClassParams> {
        self.classes.iter().find(|c| c.category == category)
    }

    /// Most probable category for a percentage. Ties resolve to the lower category.
    pub fn predict(&self, percentage: f64) -> Category {
        let mut best = &self.classes[0];
        let mut best_score = best.joint_log_likelihood(percentage);
        for class in &self.classes[1..] {
            let score = class.joint_log_likelihood(percentage);
            if score > best_score {
                best = class;
                best_score = score;
            }
        }
        best.category
    }

    /// Predict every value of a feature column
    pub fn predict_many(&self, features: &Array1<f64>) -> Vec<Category> {
        features.iter().map(|&x| self.predict(x)).collect()
    }

    /// Posterior probability of each fitted category, normalised to sum to one
    pub fn predict_proba(&self, percentage: f64) -> Vec<(Category, f64)> {
        let scores: Vec<f64> = self
            .classes
            .iter()
            .map(|c| c.joint_log_likelihood(percentage))
            .collect();
        // log-sum-exp
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            // every likelihood underflowed; all mass goes to the predicted class
            let predicted = self.predict(percentage);
            return self
                .classes
                .iter()
                .map(|c| (c.category, if c.category == predicted { 1.0 } else { 0.0 }))
                .collect();
        }
        let log_norm = max + scores.iter().map(|s| (s - max).exp()).sum::<f64>().ln();

        self.classes
            .iter()
            .zip(scores)
            .map(|(c, s)| (c.category, (s - log_norm).exp()))
            .collect()
    }
}
