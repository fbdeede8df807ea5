//! PovertyForge: poverty categorisation CLI
//!
//! This is the main entrypoint that builds the application context once and then
//! runs the requested mode: full report, single prediction or interactive queries.

use anyhow::{Context, Result};
use clap::Parser;
use povertyforge::{export, report, session, viz, AppContext, Args};
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    init_tracing(args.verbose);

    let predict_value = args.parse_predict_value()?;

    let start_time = Instant::now();
    let config = args.pipeline_config();
    let ctx = AppContext::initialize(&config)
        .with_context(|| format!("failed to prepare data from {}", config.input.display()))?;
    tracing::debug!(elapsed_ms = start_time.elapsed().as_millis() as u64, "context ready");

    if let Some(value) = predict_value {
        run_prediction_mode(&ctx, value)?;
    } else if args.interactive {
        run_interactive_mode(&ctx)?;
    } else {
        run_full_report(&args, &ctx)?;
    }

    if let Some(ref path) = args.export {
        export::export_regions_csv(&ctx.regions, path)?;
        println!("\nData exported to: {}", path.display());
    }
    if let Some(ref path) = args.report_json {
        report::write_json_report(&ctx, path)?;
        println!("JSON report saved to: {}", path.display());
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Classify a single percentage
fn run_prediction_mode(ctx: &AppContext, value: f64) -> Result<()> {
    println!("=== Prediction Mode ===");
    let prediction = ctx.predict(value)?;
    viz::print_prediction(&prediction);
    Ok(())
}

/// Answer queries from stdin until EOF
fn run_interactive_mode(ctx: &AppContext) -> Result<()> {
    let stdin = io::stdin();
    let answered = session::run_session(ctx, stdin.lock(), io::stdout())?;
    tracing::info!(answered, "session ended");
    Ok(())
}

/// Print every table and render charts when an output path was given
fn run_full_report(args: &Args, ctx: &AppContext) -> Result<()> {
    println!("=== Prediksi Kategori Kemiskinan ===");
    println!(
        "✓ Data loaded: {} regions ({} train / {} test)",
        ctx.regions.len(),
        ctx.train.len(),
        ctx.test.len()
    );

    viz::generate_visualization_report(ctx, args.output.as_deref())?;

    if let Some(ref path) = args.output {
        println!("\nCategory chart saved to: {}", path);
        println!(
            "Region chart saved to: {}",
            viz::region_chart_path(Path::new(path)).display()
        );
    }

    Ok(())
}
