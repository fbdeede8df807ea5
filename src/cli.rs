//! Command-line interface definitions and argument parsing

use crate::context::{PipelineConfig, DEFAULT_INPUT};
use crate::data::DEFAULT_NOISE_ROWS;
use crate::model::{DEFAULT_SEED, DEFAULT_TEST_SIZE, DEFAULT_VAR_SMOOTHING};
use clap::Parser;
use std::path::PathBuf;

/// Poverty-level categorisation of regions with Gaussian naive Bayes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, env = "POVERTYFORGE_INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Non-data rows between the header line and the table body
    #[arg(long, env = "POVERTYFORGE_NOISE_ROWS", default_value_t = DEFAULT_NOISE_ROWS)]
    pub noise_rows: usize,

    /// Share of regions held out for evaluation
    #[arg(long, env = "POVERTYFORGE_TEST_SIZE", default_value_t = DEFAULT_TEST_SIZE)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, env = "POVERTYFORGE_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Fraction of the feature variance added to each class variance
    #[arg(long, env = "POVERTYFORGE_VAR_SMOOTHING", default_value_t = DEFAULT_VAR_SMOOTHING)]
    pub var_smoothing: f64,

    /// Prediction mode: poverty percentage to classify (0-100)
    /// Example: --predict 7.46 or --predict "7,46"
    #[arg(short, long, allow_hyphen_values = true)]
    pub predict: Option<String>,

    /// Read one percentage per line from stdin and classify each
    #[arg(long, conflicts_with = "predict")]
    pub interactive: bool,

    /// Write the region/category table to this CSV file
    #[arg(short, long, env = "POVERTYFORGE_EXPORT")]
    pub export: Option<PathBuf>,

    /// Output path for the category chart; the region chart gets a `_regions` suffix
    #[arg(short, long, env = "POVERTYFORGE_OUTPUT")]
    pub output: Option<String>,

    /// Write accuracy, class parameters and the classification report as JSON
    #[arg(long, env = "POVERTYFORGE_REPORT_JSON")]
    pub report_json: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse the percentage given to `--predict`, accepting a comma as decimal separator
    pub fn parse_predict_value(&self) -> crate::Result<Option<f64>> {
        match self.predict {
            Some(ref raw) => crate::data::parse_percentage(raw)
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("Invalid percentage value: {}", raw)),
            None => Ok(None),
        }
    }

    /// Settings for building the application context
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            input: self.input.clone(),
            noise_rows: self.noise_rows,
            test_size: self.test_size,
            seed: self.seed,
            var_smoothing: self.var_smoothing,
        }
    }
}
