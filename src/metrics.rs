//! Classification report: accuracy plus per-class and weighted precision, recall and F1

use crate::category::Category;
use crate::error::ModelError;
use serde::Serialize;

/// Scores of a single class on the test partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassScores {
    pub category: Category,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Occurrences of the class among the true labels
    pub support: usize,
}

/// Support-weighted averages across classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedAverage {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    /// One entry per class occurring in the true or predicted labels, ascending
    pub per_class: Vec<ClassScores>,
    pub weighted: WeightedAverage,
    /// Number of evaluated samples
    pub support: usize,
}

impl EvaluationReport {
    /// Build the report from aligned predicted and true labels
    pub fn compute(y_pred: &[Category], y_true: &[Category]) -> Result<Self, ModelError> {
        if y_pred.len() != y_true.len() {
            return Err(ModelError::LengthMismatch {
                predicted: y_pred.len(),
                actual: y_true.len(),
            });
        }
        if y_true.is_empty() {
            return Err(ModelError::EmptyTestSet);
        }

        let n_classes = Category::ALL.len();
        let mut tp = vec![0usize; n_classes];
        let mut fp = vec![0usize; n_classes];
        let mut fn_ = vec![0usize; n_classes];
        let mut support = vec![0usize; n_classes];
        let mut present = vec![false; n_classes];

        for (&pred, &truth) in y_pred.iter().zip(y_true) {
            support[truth.index()] += 1;
            present[truth.index()] = true;
            present[pred.index()] = true;
            if pred == truth {
                tp[truth.index()] += 1;
            } else {
                fp[pred.index()] += 1;
                fn_[truth.index()] += 1;
            }
        }

        let total = y_true.len();
        let correct: usize = tp.iter().sum();

        let per_class: Vec<ClassScores> = Category::ALL
            .iter()
            .filter(|c| present[c.index()])
            .map(|&category| {
                let i = category.index();
                let precision = ratio(tp[i], tp[i] + fp[i]);
                let recall = ratio(tp[i], tp[i] + fn_[i]);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassScores {
                    category,
                    precision,
                    recall,
                    f1,
                    support: support[i],
                }
            })
            .collect();

        let weight = |score: fn(&ClassScores) -> f64| -> f64 {
            per_class
                .iter()
                .map(|c| score(c) * c.support as f64)
                .sum::<f64>()
                / total as f64
        };
        let weighted = WeightedAverage {
            precision: weight(|c| c.precision),
            recall: weight(|c| c.recall),
            f1: weight(|c| c.f1),
        };

        Ok(Self {
            accuracy: correct as f64 / total as f64,
            per_class,
            weighted,
            support: total,
        })
    }

    /// Scores of one class, if it occurred in the evaluation
    pub fn class(&self, category: Category) -> Option<&ClassScores> {
        self.per_class.iter().find(|c| c.category == category)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
