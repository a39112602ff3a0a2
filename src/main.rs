use anyhow::{Context, Result};
use argos_importer::cli::Args;
use argos_importer::{ArgosImporter, ImportSummary, ParquetSink};
use clap::Parser;
use colored::*;
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(summary) => {
            if !args.quiet {
                print_summary(&summary);
            }
            let code = if summary.files_failed.is_empty() { 0 } else { 2 };
            process::exit(code);
        }
        Err(error) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<ImportSummary> {
    let config = args.to_config().context("Invalid arguments")?;

    let mut sink = ParquetSink::new(
        &config.destination,
        config.spatial_reference,
        config.date_storage,
    )
    .context("Failed to create output sink")?;

    let importer = ArgosImporter::new(config).context("Invalid import configuration")?;

    importer
        .run(&mut sink)
        .with_context(|| format!("Import of {} failed", args.input.display()))
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("argos_importer={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn print_summary(summary: &ImportSummary) {
    let combined = summary.combined_stats();

    println!("\n{}", "Import Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        summary.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        summary.files_processed().to_string().bright_white()
    );
    if !summary.files_skipped.is_empty() {
        println!(
            "  {} {}",
            "Entries skipped:".bright_cyan(),
            summary.files_skipped.len().to_string().bright_white()
        );
    }
    if !summary.files_failed.is_empty() {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            summary.files_failed.len().to_string().bright_red().bold()
        );
        for failed in &summary.files_failed {
            println!("    {} {}", failed.path.display(), failed.reason.bright_black());
        }
    }
    println!(
        "  {} {}",
        "Observations written:".bright_cyan(),
        summary.observations_written.to_string().bright_white().bold()
    );
    if combined.error_count > 0 {
        println!(
            "  {} {}",
            "Records skipped:".bright_yellow(),
            combined.error_count.to_string().bright_yellow()
        );
        for (kind, count) in &combined.errors_by_kind {
            println!("    {:?}: {}", kind, count);
        }
    }
}
