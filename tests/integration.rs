//! Integration tests for PovertyForge

use povertyforge::{
    categorize, export_regions_csv, AppContext, Category, DataError, InputError, PipelineConfig,
};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// Create a test CSV file laid out like the published regional table
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Kabupaten/Kota,Persentase Penduduk Miskin (Persen)").unwrap();
    writeln!(file, ",Persentase Penduduk Miskin Menurut Kabupaten/Kota (Persen)").unwrap();
    writeln!(file, ",2024").unwrap();

    let rows = [
        ("Bogor", "7,27"),
        ("Sukabumi", "6,65"),
        ("Cianjur", "9,93"),
        ("Bandung", "6,40"),
        ("Garut", "9,77"),
        ("Tasikmalaya", "9,78"),
        ("Ciamis", "7,00"),
        ("Kuningan", "11,88"),
        ("Cirebon", "11,00"),
        ("Majalengka", "10,82"),
        ("Sumedang", "9,04"),
        ("Indramayu", "11,93"),
        ("Subang", "8,59"),
        ("Purwakarta", "7,46"),
        ("Karawang", "7,43"),
        ("Bekasi", "4,19"),
        ("Bandung Barat", "10,11"),
        ("Pangandaran", "8,69"),
        ("Kota Bogor", "6,88"),
        ("Kota Sukabumi", "7,32"),
        ("Kota Bandung", "3,96"),
        ("Kota Cirebon", "8,63"),
        ("Kota Bekasi", "4,01"),
        ("Kota Depok", "2,34"),
        ("Kota Cimahi", "4,74"),
        ("Kota Tasikmalaya", "11,10"),
        ("Kota Banjar", "5,29"),
    ];
    for (name, value) in rows {
        writeln!(file, "{},\"{}\"", name, value).unwrap();
    }
    file
}

fn config_for(file: &NamedTempFile) -> PipelineConfig {
    PipelineConfig {
        input: file.path().to_path_buf(),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();
    let ctx = AppContext::initialize(&config_for(&test_file)).unwrap();

    assert_eq!(ctx.regions.len(), 27);
    assert_eq!(ctx.test.len(), 7);
    assert_eq!(ctx.train.len(), 20);

    for region in &ctx.regions {
        assert!(!region.name.is_empty());
        assert!(region.percentage.is_finite());
    }

    // Every fitted class carries a positive variance and the priors sum to one
    assert!(ctx.model.classes.iter().all(|c| c.variance > 0.0));
    let prior_sum: f64 = ctx.model.classes.iter().map(|c| c.prior).sum();
    assert!((prior_sum - 1.0).abs() < 1e-12);

    for score in [
        ctx.report.accuracy,
        ctx.report.weighted.precision,
        ctx.report.weighted.recall,
    ] {
        assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn test_prediction() {
    let test_file = create_test_csv();
    let ctx = AppContext::initialize(&config_for(&test_file)).unwrap();

    let first = ctx.predict(7.46).unwrap();
    let second = ctx.predict(7.46).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.threshold, Category::Sedang);

    // Sedang's training examples all sit between 5 and 10
    if let Some(sedang) = ctx.model.params(Category::Sedang) {
        assert!(sedang.mean > 5.0 && sedang.mean <= 10.0);
        assert_eq!(first.predicted, Category::Sedang);
    }
}

#[test]
fn test_labels_follow_thresholds() {
    let test_file = create_test_csv();
    let ctx = AppContext::initialize(&config_for(&test_file)).unwrap();

    for part in [&ctx.train, &ctx.test] {
        for (x, label) in part.features.iter().zip(&part.labels) {
            assert_eq!(categorize(*x), *label);
        }
    }
    let kota_banjar = ctx.regions.iter().find(|r| r.name == "Kota Banjar").unwrap();
    assert_eq!(kota_banjar.category(), Category::Sedang);
}

#[test]
fn test_split_is_deterministic() {
    let test_file = create_test_csv();
    let config = config_for(&test_file);

    let first = AppContext::initialize(&config).unwrap();
    let second = AppContext::initialize(&config).unwrap();
    assert_eq!(first.train, second.train);
    assert_eq!(first.test, second.test);
    assert_eq!(first.report, second.report);
}

#[test]
fn test_error_handling_out_of_range_query() {
    let test_file = create_test_csv();
    let ctx = AppContext::initialize(&config_for(&test_file)).unwrap();

    assert_eq!(ctx.predict(120.0), Err(InputError::OutOfRange(120.0)));
    assert_eq!(ctx.predict(f64::INFINITY), Err(InputError::NotFinite));
}

#[test]
fn test_error_handling_bad_percentage() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Kabupaten/Kota,Persentase").unwrap();
    writeln!(file, ",").unwrap();
    writeln!(file, ",2024").unwrap();
    writeln!(file, "Bogor,\"7,27\"").unwrap();
    writeln!(file, "Garut,\"9;77\"").unwrap();

    let err = AppContext::initialize(&config_for(&file)).unwrap_err();
    let data_err = err.downcast_ref::<DataError>().expect("expected a DataError");
    assert!(matches!(data_err, DataError::InvalidPercentage { row: 2, .. }));
}

#[test]
fn test_export_matches_table() {
    let test_file = create_test_csv();
    let ctx = AppContext::initialize(&config_for(&test_file)).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("status.csv");
    export_regions_csv(&ctx.regions, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("Kota,Persentase,Kategori"));

    let exported: Vec<(String, f64, Category)> = lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            (
                fields[0].to_string(),
                fields[1].parse().unwrap(),
                fields[2].parse().unwrap(),
            )
        })
        .collect();
    let expected: Vec<(String, f64, Category)> = ctx
        .regions
        .iter()
        .map(|r| (r.name.clone(), r.percentage, r.category()))
        .collect();
    assert_eq!(exported, expected);
}
