//! One-time initialisation of the dataset, model and evaluation into an immutable context

use crate::category::{categorize, Category};
use crate::data::{load_regions, RegionRecord, DEFAULT_NOISE_ROWS};
use crate::error::InputError;
use crate::metrics::EvaluationReport;
use crate::model::{
    GaussianNb, LabeledDataset, DEFAULT_SEED, DEFAULT_TEST_SIZE, DEFAULT_VAR_SMOOTHING,
};
use serde::Serialize;
use std::path::PathBuf;

/// Source table read when no input path is configured
pub const DEFAULT_INPUT: &str = "Persentase Penduduk Miskin Menurut Kabupaten_Kota di Jawa Barat, 2024.csv";

/// Lowest accepted query percentage
pub const MIN_PERCENTAGE: f64 = 0.0;
/// Highest accepted query percentage
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Settings that drive loading, splitting and fitting
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub noise_rows: usize,
    pub test_size: f64,
    pub seed: u64,
    pub var_smoothing: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            noise_rows: DEFAULT_NOISE_ROWS,
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
            var_smoothing: DEFAULT_VAR_SMOOTHING,
        }
    }
}

/// Answer to a single percentage query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub percentage: f64,
    /// Category chosen by the fitted model
    pub predicted: Category,
    /// Category given by the threshold rule, which the model may disagree with
    pub threshold: Category,
    /// Posterior probability of each fitted category
    pub probabilities: Vec<(Category, f64)>,
}

/// Everything computed at startup. Read-only afterwards and shared by every query.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub regions: Vec<RegionRecord>,
    pub train: LabeledDataset,
    pub test: LabeledDataset,
    pub model: GaussianNb,
    pub report: EvaluationReport,
}

impl AppContext {
    /// Load the source table and build the context
    pub fn initialize(config: &PipelineConfig) -> crate::Result<Self> {
        let regions = load_regions(&config.input, config.noise_rows)?;
        Self::from_records(regions, config)
    }

    /// Label, split, fit and evaluate already-loaded records
    pub fn from_records(regions: Vec<RegionRecord>, config: &PipelineConfig) -> crate::Result<Self> {
        let dataset = LabeledDataset::from_records(&regions);
        let (train, test) = dataset.train_test_split(config.test_size, config.seed)?;
        let model = GaussianNb::fit(&train, config.var_smoothing)?;

        let y_pred = model.predict_many(&test.features);
        let report = EvaluationReport::compute(&y_pred, &test.labels)?;
        tracing::info!(
            train = train.len(),
            test = test.len(),
            accuracy = report.accuracy,
            "model fitted and evaluated"
        );

        Ok(Self {
            regions,
            train,
            test,
            model,
            report,
        })
    }

    /// Validate a user-supplied percentage and predict its category
    pub fn predict(&self, percentage: f64) -> Result<Prediction, InputError> {
        let percentage = validate_percentage(percentage)?;
        Ok(Prediction {
            percentage,
            predicted: self.model.predict(percentage),
            threshold: categorize(percentage),
            probabilities: self.model.predict_proba(percentage),
        })
    }

    /// Number of regions per threshold category, in category order
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        let mut counts = [0usize; 3];
        for region in &self.regions {
            counts[region.category().index()] += 1;
        }
        Category::ALL.iter().copied().zip(counts).collect()
    }
}

/// Reject non-finite or out-of-range query values
pub fn validate_percentage(percentage: f64) -> Result<f64, InputError> {
    if !percentage.is_finite() {
        return Err(InputError::NotFinite);
    }
    if !(MIN_PERCENTAGE..=MAX_PERCENTAGE).contains(&percentage) {
        return Err(InputError::OutOfRange(percentage));
    }
    Ok(percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    fn create_test_records() -> Vec<RegionRecord> {
        [
            ("Bogor", 7.27),
            ("Sukabumi", 6.65),
            ("Cianjur", 9.93),
            ("Bandung", 6.4),
            ("Garut", 9.77),
            ("Tasikmalaya", 9.78),
            ("Ciamis", 7.0),
            ("Kuningan", 11.88),
            ("Cirebon", 11.0),
            ("Majalengka", 10.82),
            ("Indramayu", 11.93),
            ("Kota Bandung", 3.96),
            ("Kota Depok", 2.34),
            ("Kota Bekasi", 4.01),
            ("Kota Cimahi", 4.74),
            ("Kota Bogor", 6.88),
        ]
        .into_iter()
        .map(|(name, percentage)| RegionRecord {
            name: name.to_string(),
            percentage,
        })
        .collect()
    }

    fn create_test_context() -> AppContext {
        AppContext::from_records(create_test_records(), &PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_context_partitions_cover_all_regions() {
        let ctx = create_test_context();
        assert_eq!(ctx.train.len() + ctx.test.len(), ctx.regions.len());
        assert_eq!(ctx.test.len(), 4);
        assert_eq!(ctx.report.support, ctx.test.len());
    }

    #[test]
    fn test_context_report_in_unit_interval() {
        let ctx = create_test_context();
        for score in [
            ctx.report.accuracy,
            ctx.report.weighted.precision,
            ctx.report.weighted.recall,
        ] {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_context_is_reproducible() {
        let first = create_test_context();
        let second = create_test_context();
        assert_eq!(first.train, second.train);
        assert_eq!(first.test, second.test);
        assert_eq!(first.model, second.model);
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn test_predict_rejects_out_of_range() {
        let ctx = create_test_context();
        assert_eq!(ctx.predict(-0.1), Err(InputError::OutOfRange(-0.1)));
        assert_eq!(ctx.predict(100.5), Err(InputError::OutOfRange(100.5)));
        assert_eq!(ctx.predict(f64::NAN), Err(InputError::NotFinite));
        assert!(ctx.predict(0.0).is_ok());
        assert!(ctx.predict(100.0).is_ok());
    }

    #[test]
    fn test_predict_reports_both_rules() {
        let ctx = create_test_context();
        let prediction = ctx.predict(7.46).unwrap();
        assert_eq!(prediction.threshold, Category::Sedang);
        assert_eq!(prediction.predicted, ctx.model.predict(7.46));
        assert_eq!(prediction, ctx.predict(7.46).unwrap());
    }

    #[test]
    fn test_negative_var_smoothing_is_rejected() {
        let config = PipelineConfig {
            var_smoothing: -0.5,
            ..PipelineConfig::default()
        };
        let err = AppContext::from_records(create_test_records(), &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::InvalidVarSmoothing(_))
        ));
    }

    #[test]
    fn test_category_counts() {
        let ctx = create_test_context();
        let counts = ctx.category_counts();
        assert_eq!(
            counts,
            vec![
                (Category::Rendah, 4),
                (Category::Sedang, 8),
                (Category::Tinggi, 4)
            ]
        );
    }
}
