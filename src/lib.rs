//! PovertyForge: poverty-level categorisation of regions
//!
//! Regions are labelled Rendah, Sedang or Tinggi from their poverty percentage by a
//! threshold rule; a Gaussian naive Bayes model is then fitted on those labels,
//! evaluated on a held-out split and used to answer single-percentage queries.

pub mod category;
pub mod cli;
pub mod context;
pub mod data;
pub mod error;
pub mod export;
pub mod metrics;
pub mod model;
pub mod report;
pub mod session;
pub mod viz;

// Re-export public items for easier access
pub use category::{categorize, Category};
pub use cli::Args;
pub use context::{AppContext, PipelineConfig, Prediction};
pub use data::{load_regions, RegionRecord};
pub use error::{DataError, InputError, ModelError};
pub use export::export_regions_csv;
pub use metrics::EvaluationReport;
pub use model::{GaussianNb, LabeledDataset};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
