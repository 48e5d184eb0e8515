//! Symbol Clusters - report the most frequent punctuation clusters in a source tree
//!
//! The main entry point for the scanner. It parses command-line arguments,
//! collects the files to scan and prints one table per file extension.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use symbol_clusters::app::run_scan;
use symbol_clusters::config::{load_config, ScanConfig};
use symbol_clusters::core::ranker::clamp_top;
use symbol_clusters::utils::output_formatter;

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "symbol_clusters",
    version,
    about = "Report the most frequent symbol clusters in source files",
    long_about = "Scans source files and ranks the non-alphanumeric symbol clusters they contain:
- single symbols (e.g. ';')
- symbol pairs (e.g. '->')
- symbol triples (e.g. '::<')
One table is printed per file extension, plus a combined table when several extensions are scanned."
)]
struct Args {
    /// Files or directories to scan
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// File extension to scan (repeatable or comma separated, default: rs)
    #[arg(short = 'e', long = "ext", value_delimiter = ',', action = ArgAction::Append)]
    extensions: Option<Vec<String>>,

    /// Skip files whose path contains this text (repeatable or comma separated)
    #[arg(short = 'x', long = "exclude", value_delimiter = ',', action = ArgAction::Append)]
    exclude: Option<Vec<String>>,

    /// Number of rows per table (default: 10, at most 50)
    #[arg(short = 'n', long = "top")]
    top: Option<usize>,

    /// Widest cluster to count: 1 (singles only), 2 or 3
    #[arg(long = "width", value_parser = clap::value_parser!(u8).range(1..=3))]
    width: Option<u8>,

    /// Number of parallel workers (0=auto, default: auto)
    #[arg(long = "parallel", default_value = "0")]
    parallel: usize,

    /// Never print the combined table
    #[arg(long = "no-combined", action = ArgAction::SetTrue)]
    no_combined: bool,

    /// Output in markdown format (wrapped in triple backticks)
    #[arg(long = "md", action = ArgAction::SetTrue)]
    md: bool,

    /// Export rankings to JSON file
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Export rankings to CSV file
    #[arg(long = "csv")]
    csv: Option<PathBuf>,

    /// Suppress terminal output
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Path to JSON configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Set logging level (default: WARN)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Main entry point function
fn main() -> Result<()> {
    let start_time = Instant::now();

    let args = Args::parse();

    setup_logging(&args)?;

    let config = effective_config(&args)?;
    info!("Effective configuration: {:?}", config);

    let progress_bar = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")?
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let outcome = match run_scan(&args.paths, &config, args.parallel, progress_bar.as_ref()) {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(pb) = &progress_bar {
                pb.abandon();
            }
            // Reported once, by the error returned from main
            return Err(e);
        }
    };

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    export_results(&outcome.frequencies, config.top, &args)?;

    if !args.quiet {
        let report = output_formatter::format_report(
            &outcome.frequencies,
            config.top,
            !args.no_combined,
            args.md,
        );
        println!("{}", report);
        println!(
            "{}",
            output_formatter::format_summary(outcome.files, &outcome.frequencies, start_time.elapsed())
        );
    }

    Ok(())
}

/// Set up logging to stderr or to the requested log file
fn setup_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(args.log_level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();

    Ok(())
}

/// Merge the configuration file (if any) with command line overrides
fn effective_config(args: &Args) -> Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let config = load_config(path)?;
            info!("Loaded configuration from {}", path.display());
            config
        }
        None => ScanConfig::default(),
    };

    if let Some(extensions) = &args.extensions {
        config.extensions = extensions.clone();
    }
    if let Some(exclude) = &args.exclude {
        config.exclude = exclude.clone();
    }
    if let Some(top) = args.top {
        config.top = top;
    }
    if let Some(width) = args.width {
        config.width = usize::from(width);
    }

    config.top = clamp_top(config.top);

    if config.extensions.is_empty() {
        anyhow::bail!("No extensions selected");
    }

    Ok(config)
}

/// Write the requested export files
fn export_results(
    frequencies: &symbol_clusters::SymbolFrequencies,
    top: usize,
    args: &Args,
) -> Result<()> {
    if let Some(path) = &args.json {
        output_formatter::export_results_json(frequencies, top, path)?;
        info!("Wrote JSON report to {}", path.display());
    }

    if let Some(path) = &args.csv {
        output_formatter::create_csv_report(frequencies, top, path)?;
        info!("Wrote CSV report to {}", path.display());
    }

    Ok(())
}
