//! Frequency aggregation
//!
//! Owns one counter table per scope (file extension) plus the combined
//! table spanning every extension, and routes classifier hits into them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::debug;

use crate::core::classifier::classify;
use crate::core::window::{windows, MAX_WINDOW};

/// Accumulation bucket for counts
///
/// Extensions sort alphabetically and the combined scope sorts last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// Files sharing one extension (stored without the leading dot)
    Extension(String),
    /// Every extension at once
    Combined,
}

impl Scope {
    /// Name shown in report titles
    pub fn name(&self) -> &str {
        match self {
            Scope::Extension(ext) => ext,
            Scope::Combined => "*",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Occurrence counts keyed by cluster text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterTable {
    counts: HashMap<String, u64>,
}

impl CounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `cluster`
    pub fn increment(&mut self, cluster: &str) {
        self.add(cluster, 1);
    }

    fn add(&mut self, cluster: &str, amount: u64) {
        match self.counts.get_mut(cluster) {
            Some(count) => *count += amount,
            None => {
                self.counts.insert(cluster.to_string(), amount);
            }
        }
    }

    /// Occurrences of `cluster`, zero when never seen
    pub fn count(&self, cluster: &str) -> u64 {
        self.counts.get(cluster).copied().unwrap_or(0)
    }

    /// Number of distinct clusters
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(cluster, count)| (cluster.as_str(), *count))
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Fold another table's counts into this one
    pub fn merge(&mut self, other: &CounterTable) {
        for (cluster, count) in other.iter() {
            self.add(cluster, count);
        }
    }
}

/// Per-scope symbol cluster counts for a whole scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFrequencies {
    extensions: BTreeMap<String, CounterTable>,
    combined: Option<CounterTable>,
    width: usize,
    lines_scanned: u64,
    windows_scanned: u64,
}

impl Default for SymbolFrequencies {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolFrequencies {
    /// Create an empty aggregator using full three-character windows
    pub fn new() -> Self {
        Self::with_width(MAX_WINDOW)
    }

    /// Create an empty aggregator with a maximum window width
    ///
    /// A width of 1 only ever counts single symbols.
    pub fn with_width(width: usize) -> Self {
        Self {
            extensions: BTreeMap::new(),
            combined: None,
            width: width.clamp(1, MAX_WINDOW),
            lines_scanned: 0,
            windows_scanned: 0,
        }
    }

    /// Window width in use
    pub fn width(&self) -> usize {
        self.width
    }

    /// Classify every window of `line` and count it under `extension`
    /// and under the combined scope.
    ///
    /// # Arguments
    ///
    /// * `extension` - Extension of the file the line came from
    /// * `line` - One line of text (trimmed here)
    pub fn record_line(&mut self, extension: &str, line: &str) {
        self.lines_scanned += 1;

        for window in windows(line, self.width) {
            self.windows_scanned += 1;

            let hits = classify(&window);
            if hits.is_empty() {
                continue;
            }

            // Tables are created lazily on the first counted cluster
            if !self.extensions.contains_key(extension) {
                debug!("Creating counter table for scope '{}'", extension);
                self.extensions.insert(extension.to_string(), CounterTable::new());
            }
            if let Some(table) = self.extensions.get_mut(extension) {
                for cluster in hits.clusters() {
                    table.increment(cluster);
                }
            }
            let combined = self.combined.get_or_insert_with(CounterTable::new);
            for cluster in hits.clusters() {
                combined.increment(cluster);
            }
        }
    }

    /// Record every line from an iterator
    pub fn record_lines<I, S>(&mut self, extension: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.record_line(extension, line.as_ref());
        }
    }

    /// Merge counts accumulated elsewhere (e.g. by another worker)
    ///
    /// Merging is commutative and associative, so the order in which
    /// partial results arrive does not change the final counts.
    pub fn merge(&mut self, other: SymbolFrequencies) {
        for (extension, table) in other.extensions {
            match self.extensions.get_mut(&extension) {
                Some(existing) => existing.merge(&table),
                None => {
                    self.extensions.insert(extension, table);
                }
            }
        }
        if let Some(table) = other.combined {
            match self.combined.as_mut() {
                Some(existing) => existing.merge(&table),
                None => self.combined = Some(table),
            }
        }
        self.lines_scanned += other.lines_scanned;
        self.windows_scanned += other.windows_scanned;
    }

    /// Table for a scope, if anything was counted in it
    pub fn table(&self, scope: &Scope) -> Option<&CounterTable> {
        match scope {
            Scope::Extension(ext) => self.extensions.get(ext),
            Scope::Combined => self.combined.as_ref(),
        }
    }

    /// Scopes with at least one counted cluster, extensions first
    pub fn scopes(&self) -> impl Iterator<Item = (Scope, &CounterTable)> {
        self.extensions
            .iter()
            .map(|(ext, table)| (Scope::Extension(ext.clone()), table))
            .chain(self.combined.iter().map(|table| (Scope::Combined, table)))
    }

    /// Number of extension scopes (the combined scope is not counted)
    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combined.is_none()
    }

    /// Lines fed to the aggregator so far
    pub fn lines_scanned(&self) -> u64 {
        self.lines_scanned
    }

    /// Windows inspected so far
    pub fn windows_scanned(&self) -> u64 {
        self.windows_scanned
    }
}
