//! JSON summary of a run: category distribution, fitted parameters and evaluation

use crate::category::Category;
use crate::context::AppContext;
use crate::metrics::EvaluationReport;
use crate::model::ClassParams;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub regions: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub category_counts: Vec<(Category, usize)>,
    pub coefficients: &'a [ClassParams],
    /// Smallest variance any class can have
    pub epsilon: f64,
    pub evaluation: &'a EvaluationReport,
}

impl<'a> RunSummary<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            regions: ctx.regions.len(),
            train_size: ctx.train.len(),
            test_size: ctx.test.len(),
            category_counts: ctx.category_counts(),
            coefficients: &ctx.model.classes,
            epsilon: ctx.model.epsilon,
            evaluation: &ctx.report,
        }
    }
}

/// Write the run summary as pretty-printed JSON
pub fn write_json_report(ctx: &AppContext, output_path: &Path) -> crate::Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &RunSummary::new(ctx))?;
    tracing::info!(path = %output_path.display(), "wrote JSON report");
    Ok(())
}
