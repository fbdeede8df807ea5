//! Visualization and console tables for the poverty categorisation using Plotters

use crate::category::Category;
use crate::context::{AppContext, Prediction};
use crate::data::RegionRecord;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

fn category_color(category: Category) -> RGBColor {
    let (r, g, b) = category.color();
    RGBColor(r, g, b)
}

/// Label for an x position on an index-based axis; blank between bars
fn index_label(labels: &[&str], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels
        .get(nearest as usize)
        .map(|label| label.to_string())
        .unwrap_or_default()
}

/// Path of the region chart next to the category chart: `<stem>_regions.<ext>`
pub fn region_chart_path(category_chart_path: &Path) -> PathBuf {
    let stem = category_chart_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match category_chart_path.extension() {
        Some(ext) => format!("{}_regions.{}", stem, ext.to_string_lossy()),
        None => format!("{}_regions", stem),
    };
    category_chart_path.with_file_name(file_name)
}

/// Regions ordered by descending percentage, ties keeping file order
pub fn sorted_by_percentage(regions: &[RegionRecord]) -> Vec<&RegionRecord> {
    let mut sorted: Vec<&RegionRecord> = regions.iter().collect();
    sorted.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    sorted
}

/// Create a bar chart of how many regions fall in each category
///
/// # Arguments
/// * `counts` - Region count per category
/// * `output_path` - Path to save the PNG plot
pub fn create_category_chart(counts: &[(Category, usize)], output_path: &str) -> crate::Result<()> {
    let labels: Vec<&str> = counts.iter().map(|(c, _)| c.as_str()).collect();
    let max_count = counts.iter().map(|(_, n)| *n).max().unwrap_or(1).max(1) as f64;

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribusi Status Kemiskinan Daerah", ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5f64..(counts.len() as f64 - 0.5), 0f64..(max_count * 1.1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&|x| index_label(&labels, *x))
        .x_desc("Kategori")
        .y_desc("Jumlah Daerah")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (i, (category, count)) in counts.iter().enumerate() {
        let color = category_color(*category);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(i as f64 - 0.4, 0.0), (i as f64 + 0.4, *count as f64)],
                color.filled(),
            )))?
            .label(format!("{} ({})", category, count))
            .legend(move |(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    tracing::info!(path = output_path, "category chart saved");

    Ok(())
}

/// Create a bar chart of every region's percentage, highest first, coloured by category
pub fn create_region_chart(regions: &[RegionRecord], output_path: &str) -> crate::Result<()> {
    let sorted = sorted_by_percentage(regions);
    let labels: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
    let max_value = sorted.first().map(|r| r.percentage).unwrap_or(1.0).max(1.0);

    let root = BitMapBackend::new(output_path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Nilai Persentase Kemiskinan Tiap Daerah", ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(140)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(sorted.len() as f64 - 0.5), 0f64..(max_value * 1.1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(sorted.len())
        .x_label_formatter(&|x| index_label(&labels, *x))
        .x_label_style(
            ("sans-serif", 11)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Kota / Kabupaten")
        .y_desc("Persentase Kemiskinan (%)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(sorted.iter().enumerate().map(|(i, region)| {
        Rectangle::new(
            [(i as f64 - 0.4, 0.0), (i as f64 + 0.4, region.percentage)],
            category_color(region.category()).filled(),
        )
    }))?;

    root.present()?;
    tracing::info!(path = output_path, "region chart saved");

    Ok(())
}

/// Print every region with its percentage and threshold category
pub fn print_region_table(regions: &[RegionRecord]) {
    let width = regions
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    println!("\n=== Daftar Daerah dan Kategorinya ===");
    println!("  {:<width$} | Persentase | Kategori", "Kota");
    println!("  {}-|------------|---------", "-".repeat(width));
    for region in regions {
        println!(
            "  {:<width$} | {:10.2} | {}",
            region.name,
            region.percentage,
            region.category()
        );
    }
}

/// Print accuracy and the per-class classification report
pub fn print_evaluation(ctx: &AppContext) {
    let report = &ctx.report;
    println!("\n=== Evaluasi Model ===");
    println!("Akurasi:            {:.2}", report.accuracy);
    println!("Presisi Rata-rata:  {:.2}", report.weighted.precision);
    println!("Recall Rata-rata:   {:.2}", report.weighted.recall);

    println!("\n  Kategori | Precision | Recall | F1    | Support");
    println!("  ---------|-----------|--------|-------|--------");
    for class in &report.per_class {
        println!(
            "  {:8} | {:9.2} | {:6.2} | {:5.2} | {:7}",
            class.category.as_str(),
            class.precision,
            class.recall,
            class.f1,
            class.support
        );
    }
    println!(
        "  {:8} | {:9.2} | {:6.2} | {:5.2} | {:7}",
        "weighted",
        report.weighted.precision,
        report.weighted.recall,
        report.weighted.f1,
        report.support
    );
}

/// Print the fitted mean and variance of each class
pub fn print_coefficients(ctx: &AppContext) {
    println!("\n=== Koefisiensi Model ===");
    println!("  Kategori | Rata-rata | Varian    | Prior");
    println!("  ---------|-----------|-----------|------");
    for class in &ctx.model.classes {
        println!(
            "  {:8} | {:9.4} | {:9.4} | {:.3}",
            class.category.as_str(),
            class.mean,
            class.variance,
            class.prior
        );
    }
    for category in Category::ALL {
        if ctx.model.params(category).is_none() {
            println!("  {:8} | (absent from training split)", category.as_str());
        }
    }
}

/// Print a single prediction with its posterior probabilities
pub fn print_prediction(prediction: &Prediction) {
    println!(
        "\n✓ Prediksi Status: {} (input {:.2}%)",
        prediction.predicted, prediction.percentage
    );
    if prediction.threshold != prediction.predicted {
        println!("  Threshold rule gives: {}", prediction.threshold);
    }
    for (category, probability) in &prediction.probabilities {
        println!("  P({}) = {:.4}", category, probability);
    }
}

/// Print all tables and, when a path is given, render both charts
pub fn generate_visualization_report(ctx: &AppContext, base_output_path: Option<&str>) -> crate::Result<()> {
    print_region_table(&ctx.regions);
    print_evaluation(ctx);
    print_coefficients(ctx);

    let counts = ctx.category_counts();
    println!("\n=== Distribusi Status ===");
    for (category, count) in &counts {
        println!("  {}: {} daerah", category, count);
    }

    if let Some(path) = base_output_path {
        create_category_chart(&counts, path)?;
        let region_path = region_chart_path(Path::new(path));
        create_region_chart(&ctx.regions, &region_path.to_string_lossy())?;
    }

    Ok(())
}
