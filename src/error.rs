//! Error types for loading, training and querying

use thiserror::Error;

/// Failures while reading the source table. All of them are fatal for the load.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("source table has {found} column(s) after skipping header rows, expected at least 2")]
    TooFewColumns { found: usize },

    #[error("row {row}: region name is empty")]
    EmptyName { row: usize },

    #[error("row {row}: missing percentage for region '{name}'")]
    MissingPercentage { row: usize, name: String },

    #[error("row {row}: cannot parse percentage '{value}' for region '{name}'")]
    InvalidPercentage {
        row: usize,
        name: String,
        value: String,
    },

    #[error("no data rows found in source table")]
    NoRows,

    #[error(transparent)]
    Csv(#[from] polars::prelude::PolarsError),
}

/// Failures while splitting or fitting.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot fit a model on an empty training set")]
    EmptyTrainingSet,

    #[error("test size must lie strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),

    #[error("cannot split {samples} sample(s) into non-empty train and test partitions")]
    PartitionTooSmall { samples: usize },

    #[error("cannot evaluate on an empty test set")]
    EmptyTestSet,

    #[error("{predicted} predicted label(s) for {actual} true label(s)")]
    LengthMismatch { predicted: usize, actual: usize },

    #[error("variance smoothing must be a finite, non-negative number, got {0}")]
    InvalidVarSmoothing(f64),
}

/// A query rejected at the input boundary before it reaches the model.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("percentage must be a finite number")]
    NotFinite,

    #[error("percentage {0} is outside the range 0.0 to 100.0")]
    OutOfRange(f64),
}
