//! File handling utilities
//!
//! Directory traversal, extension / folder filtering and line reading.
//! Everything here feeds lines into a `SymbolFrequencies`; any I/O failure
//! aborts the scan.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::aggregator::SymbolFrequencies;

/// Errors raised while locating or reading input files
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A root given on the command line does not exist
    #[error("Path not found: {}", .0.display())]
    MissingRoot(PathBuf),

    /// Directory traversal failed
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Reading a file failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The worker pool could not be started
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Which files take part in a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Allowed extensions, without the leading dot
    pub extensions: Vec<String>,
    /// Path fragments that exclude a file when found in its path
    pub exclude: Vec<String>,
}

impl ScanOptions {
    pub fn new<E, X>(extensions: E, exclude: X) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        X: IntoIterator,
        X::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .filter(|ext| !ext.is_empty())
                .collect(),
            exclude: exclude
                .into_iter()
                .map(|token| token.as_ref().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    fn allows_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|allowed| allowed == extension)
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        let path = relative.to_string_lossy();
        self.exclude.iter().any(|token| path.contains(token.as_str()))
    }
}

/// Strip a leading dot so ".rs" and "rs" mean the same thing
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

/// An input file and the scope it counts towards
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    pub path: PathBuf,
    pub extension: String,
}

/// Extension of a path without the dot, if it has one
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_string())
        .filter(|ext| !ext.is_empty())
}

/// Collect every eligible file below the given roots
///
/// Roots may be directories (walked top-down) or single files. Exclusion
/// tokens are matched against the path relative to its root.
///
/// # Arguments
///
/// * `roots` - Files or directories to scan
/// * `options` - Extension allow-list and excluded folder tokens
///
/// # Returns
///
/// Eligible files sorted by path
pub fn collect_source_files<P: AsRef<Path>>(
    roots: &[P],
    options: &ScanOptions,
) -> Result<Vec<SourceFile>, ScanError> {
    let mut files = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if !root.exists() {
            return Err(ScanError::MissingRoot(root.to_path_buf()));
        }

        if root.is_file() {
            if options.is_excluded(root) {
                warn!("Skipping {}: path is excluded", root.display());
                continue;
            }
            match extension_of(root) {
                Some(extension) if options.allows_extension(&extension) => {
                    files.push(SourceFile {
                        path: root.to_path_buf(),
                        extension,
                    });
                }
                _ => warn!("Skipping {}: extension not selected", root.display()),
            }
            continue;
        }

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|source| ScanError::Walk {
                path: root.to_path_buf(),
                source,
            })?;

            // Symlinked files are followed, symlinked folders are not walked
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            if options.is_excluded(relative) {
                debug!("Excluded {}", path.display());
                continue;
            }

            if let Some(extension) = extension_of(path) {
                if options.allows_extension(&extension) {
                    files.push(SourceFile {
                        path: path.to_path_buf(),
                        extension,
                    });
                }
            }
        }
    }

    files.sort();
    files.dedup();
    info!("Found {} files to scan", files.len());

    Ok(files)
}

/// Feed every line of `file` into `frequencies`
///
/// Invalid UTF-8 is decoded lossily; read errors are returned.
pub fn scan_file(file: &SourceFile, frequencies: &mut SymbolFrequencies) -> Result<(), ScanError> {
    let io_error = |source| ScanError::Io {
        path: file.path.clone(),
        source,
    };

    let handle = File::open(&file.path).map_err(io_error)?;
    let mut reader = BufReader::new(handle);
    let mut buffer = Vec::new();
    let mut lines = 0usize;

    loop {
        buffer.clear();
        let bytes_read = reader.read_until(b'\n', &mut buffer).map_err(io_error)?;
        if bytes_read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buffer);
        frequencies.record_line(&file.extension, &line);
        lines += 1;
    }

    debug!("Scanned {} ({} lines)", file.path.display(), lines);
    Ok(())
}

/// Number of workers to use; 0 means one per logical CPU
pub fn resolve_workers(requested: usize) -> usize {
    if requested == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        requested
    }
}

/// Scan files on a worker pool and merge the per-file counts
///
/// Each file accumulates into its own table set, so the result does not
/// depend on how files are distributed over workers.
///
/// # Arguments
///
/// * `files` - Files to scan
/// * `width` - Maximum window width
/// * `workers` - Worker count (0 = auto)
/// * `progress` - Optional progress bar advanced once per file
pub fn scan_files(
    files: &[SourceFile],
    width: usize,
    workers: usize,
    progress: Option<&ProgressBar>,
) -> Result<SymbolFrequencies, ScanError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(resolve_workers(workers))
        .build()?;

    pool.install(|| {
        files
            .par_iter()
            .map(|file| -> Result<SymbolFrequencies, ScanError> {
                let mut frequencies = SymbolFrequencies::with_width(width);
                scan_file(file, &mut frequencies)?;
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                Ok(frequencies)
            })
            .try_reduce(
                || SymbolFrequencies::with_width(width),
                |mut total, partial| {
                    total.merge(partial);
                    Ok(total)
                },
            )
    })
}
