//! Symbol Clusters - punctuation and operator frequency analysis
//!
//! This library scans source files and counts the clusters of non-alphanumeric
//! symbols they contain (single symbols, pairs and triples), per file
//! extension and across all extensions, then ranks and renders them.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::core::aggregator::{CounterTable, Scope, SymbolFrequencies};
pub use crate::core::ranker::{clamp_top, top_clusters, RankedRow, MAX_TOP};
pub use crate::utils::file_utils::{ScanError, ScanOptions, SourceFile};
pub use crate::utils::output_formatter::{format_report, format_table};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan a file or directory tree and return its symbol cluster counts
///
/// This is a convenience function for simple use cases: no exclusions,
/// full three-character windows and a single worker.
///
/// # Arguments
///
/// * `path` - File or directory to scan
/// * `extensions` - Extensions to include (with or without the leading dot)
pub fn scan_path<P: AsRef<std::path::Path>>(
    path: P,
    extensions: &[&str],
) -> anyhow::Result<SymbolFrequencies> {
    let config = config::ScanConfig {
        extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        exclude: Vec::new(),
        ..config::ScanConfig::default()
    };

    let outcome = app::run_scan(&[path.as_ref()], &config, 1, None)?;
    Ok(outcome.frequencies)
}

/// Library configuration and utilities
pub mod config {
    use serde::{Deserialize, Serialize};
    use std::path::{Path, PathBuf};

    use crate::core::ranker::DEFAULT_TOP;
    use crate::core::window::MAX_WINDOW;

    /// Errors raised while loading a configuration file
    #[derive(Debug, thiserror::Error)]
    pub enum ConfigError {
        #[error("Failed to read configuration file {}: {source}", path.display())]
        Read {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("Invalid JSON in configuration file {}: {source}", path.display())]
        Parse {
            path: PathBuf,
            #[source]
            source: serde_json::Error,
        },
    }

    /// Scan settings, loadable from a JSON file
    ///
    /// Missing fields take their defaults.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ScanConfig {
        /// Extensions to scan
        pub extensions: Vec<String>,
        /// Path fragments to skip
        pub exclude: Vec<String>,
        /// Rows per table (clamped to `1..=MAX_TOP` before rendering)
        pub top: usize,
        /// Maximum window width, 1 to 3
        pub width: usize,
    }

    impl Default for ScanConfig {
        fn default() -> Self {
            Self {
                extensions: vec!["rs".to_string()],
                exclude: vec!["target".to_string(), ".git".to_string()],
                top: DEFAULT_TOP,
                width: MAX_WINDOW,
            }
        }
    }

    /// Load configuration from a JSON file
    pub fn load_config(path: &Path) -> Result<ScanConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

}

/// Command-line application functionality
pub mod app {
    use anyhow::{Context, Result};
    use indicatif::ProgressBar;
    use log::{info, warn};
    use std::path::Path;

    use crate::config::ScanConfig;
    use crate::core::aggregator::SymbolFrequencies;
    use crate::utils::file_utils::{collect_source_files, scan_files, ScanOptions};

    /// Result of a complete scan
    #[derive(Debug)]
    pub struct ScanOutcome {
        /// Number of files read
        pub files: usize,
        /// Counts for every scope
        pub frequencies: SymbolFrequencies,
    }

    /// Collect the eligible files below `roots` and count their symbol clusters
    ///
    /// # Arguments
    ///
    /// * `roots` - Files or directories to scan
    /// * `config` - Extensions, exclusions and window width
    /// * `workers` - Number of parallel workers (0 = auto)
    /// * `progress` - Optional progress bar; its length is set to the file count
    pub fn run_scan<P: AsRef<Path>>(
        roots: &[P],
        config: &ScanConfig,
        workers: usize,
        progress: Option<&ProgressBar>,
    ) -> Result<ScanOutcome> {
        let options = ScanOptions::new(&config.extensions, &config.exclude);
        let files = collect_source_files(roots, &options).context("Failed to collect input files")?;

        if files.is_empty() {
            warn!("No files matched extensions {:?}", options.extensions);
        }

        if let Some(pb) = progress {
            pb.set_length(files.len() as u64);
        }

        let frequencies =
            scan_files(&files, config.width, workers, progress).context("Scan aborted")?;

        info!(
            "Scanned {} files, {} lines, {} windows",
            files.len(),
            frequencies.lines_scanned(),
            frequencies.windows_scanned()
        );

        Ok(ScanOutcome {
            files: files.len(),
            frequencies,
        })
    }
}
