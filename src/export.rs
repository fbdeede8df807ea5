//! CSV export of the region/category table

use crate::data::RegionRecord;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// File name offered for the export when none is given
pub const DEFAULT_EXPORT_FILE: &str = "status_kemiskinan_jawa_barat.csv";

/// Build the `Kota, Persentase, Kategori` frame from region records
pub fn regions_frame(records: &[RegionRecord]) -> crate::Result<DataFrame> {
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    let percentages: Vec<f64> = records.iter().map(|r| r.percentage).collect();
    let categories: Vec<&str> = records.iter().map(|r| r.category().as_str()).collect();

    let df = df!(
        "Kota" => names,
        "Persentase" => percentages,
        "Kategori" => categories
    )?;
    Ok(df)
}

/// Write the region table as comma-separated UTF-8 with a header row
pub fn export_regions_csv(records: &[RegionRecord], output_path: &Path) -> crate::Result<()> {
    let mut df = regions_frame(records)?;
    let mut file = File::create(output_path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;

    tracing::info!(
        path = %output_path.display(),
        rows = df.height(),
        "exported region table"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use tempfile::tempdir;

    fn create_test_records() -> Vec<RegionRecord> {
        vec![
            RegionRecord {
                name: "Bogor".to_string(),
                percentage: 7.27,
            },
            RegionRecord {
                name: "Kota Depok".to_string(),
                percentage: 2.34,
            },
            RegionRecord {
                name: "Indramayu".to_string(),
                percentage: 11.93,
            },
        ]
    }

    #[test]
    fn test_regions_frame_shape() {
        let df = regions_frame(&create_test_records()).unwrap();
        assert_eq!(df.shape(), (3, 3));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Kota", "Persentase", "Kategori"]);
    }

    #[test]
    fn test_export_round_trip() {
        let records = create_test_records();
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);

        export_regions_csv(&records, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Kota,Persentase,Kategori"));

        let rows: Vec<(String, f64, Category)> = lines
            .map(|line| {
                let fields: Vec<&str> = line.split(',').collect();
                assert_eq!(fields.len(), 3);
                (
                    fields[0].to_string(),
                    fields[1].parse().unwrap(),
                    fields[2].parse().unwrap(),
                )
            })
            .collect();

        let expected: Vec<(String, f64, Category)> = records
            .iter()
            .map(|r| (r.name.clone(), r.percentage, r.category()))
            .collect();
        assert_eq!(rows, expected);
    }
}
