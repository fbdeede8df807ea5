//! Data loading and cleaning of the regional poverty table using Polars

use crate::category::{categorize, Category};
use crate::error::DataError;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

/// Number of non-data rows that follow the header line in the published table
pub const DEFAULT_NOISE_ROWS: usize = 2;

/// A single region with its poverty percentage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    /// Trimmed region name (city or regency)
    pub name: String,
    /// Share of the population below the poverty line, in percent
    pub percentage: f64,
}

impl RegionRecord {
    /// Threshold category of this region, recomputed from the percentage
    pub fn category(&self) -> Category {
        categorize(self.percentage)
    }
}

/// Load the regional table and return one record per data row
///
/// # Arguments
/// * `file_path` - Path to the CSV file
/// * `noise_rows` - Number of non-data rows between the header line and the body
///
/// # Returns
/// * Records in file order
pub fn load_regions(file_path: &Path, noise_rows: usize) -> crate::Result<Vec<RegionRecord>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows_after_header(noise_rows)
        // Read every field as text; decimals use a comma and need normalising first
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
        .try_into_reader_with_file_path(Some(file_path.to_path_buf()))
        .map_err(DataError::from)?
        .finish()
        .map_err(DataError::from)?;

    let records = extract_records(&df)?;
    tracing::info!(
        path = %file_path.display(),
        regions = records.len(),
        "loaded regional table"
    );
    Ok(records)
}

/// Convert the first two text columns of a frame into region records
fn extract_records(df: &DataFrame) -> Result<Vec<RegionRecord>, DataError> {
    let columns = df.get_columns();
    if columns.len() < 2 {
        return Err(DataError::TooFewColumns {
            found: columns.len(),
        });
    }

    let names = columns[0].as_materialized_series().str()?;
    let values = columns[1].as_materialized_series().str()?;

    let mut records = Vec::with_capacity(df.height());
    for (idx, (name, value)) in names.into_iter().zip(values.into_iter()).enumerate() {
        let row = idx + 1;
        let name = name.map(str::trim).unwrap_or_default();
        let value = value.map(str::trim).unwrap_or_default();

        if name.is_empty() && value.is_empty() {
            continue;
        }
        if name.is_empty() {
            return Err(DataError::EmptyName { row });
        }
        if value.is_empty() {
            return Err(DataError::MissingPercentage {
                row,
                name: name.to_string(),
            });
        }

        let percentage = parse_percentage(value).ok_or_else(|| DataError::InvalidPercentage {
            row,
            name: name.to_string(),
            value: value.to_string(),
        })?;

        records.push(RegionRecord {
            name: name.to_string(),
            percentage,
        });
    }

    if records.is_empty() {
        return Err(DataError::NoRows);
    }

    Ok(records)
}

/// Parse a decimal that may use a comma as separator, rejecting non-finite values
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
