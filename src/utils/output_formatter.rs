//! Output formatter for scan results
//!
//! Renders ranked counter tables as fixed-width bordered text tables and
//! exports the same rankings as JSON or CSV.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::core::aggregator::{CounterTable, Scope, SymbolFrequencies};
use crate::core::ranker::{digit_width, RankedRow, Ranking};
use crate::core::window::MAX_WINDOW;

/// Space on each side of every cell value
const GUTTER: &str = "  ";

const RANK_LABEL: &str = "#";
const COLUMN_LABELS: [&str; MAX_WINDOW] = ["single", "pair", "triple"];

/// Width of one data column and of its count field
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    cluster_len: usize,
    count_width: usize,
    cell_width: usize,
}

impl ColumnLayout {
    fn new(cluster_len: usize, min_count_width: usize, label: &str) -> Self {
        let content = GUTTER.len() * 3 + cluster_len + min_count_width;
        let cell_width = content.max(label.len() + GUTTER.len() * 2);
        Self {
            cluster_len,
            count_width: cell_width - GUTTER.len() * 3 - cluster_len,
            cell_width,
        }
    }

    fn cell(&self, row: Option<&RankedRow>) -> String {
        match row {
            Some(row) => format!(
                "{g}{cluster}{g}{count:>width$}{g}",
                g = GUTTER,
                cluster = display_cluster(&row.cluster),
                count = row.count,
                width = self.count_width,
            ),
            None => " ".repeat(self.cell_width),
        }
    }
}

/// Cluster text with invisible characters swapped for one-column glyphs
///
/// Only the plain space is printed as is; a tab or a zero-width mark
/// would otherwise break the column alignment.
fn display_cluster(cluster: &str) -> String {
    cluster
        .chars()
        .map(|c| match c {
            ' ' => ' ',
            '\t' => '\u{2409}',
            '\u{b}' => '\u{240b}',
            '\u{c}' => '\u{240c}',
            '\r' => '\u{240d}',
            '\u{200b}'..='\u{200f}' | '\u{2060}' | '\u{feff}' => '\u{2423}',
            c if c.is_whitespace() || c.is_control() => '\u{2423}',
            c => c,
        })
        .collect()
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(*width));
        line.push('+');
    }
    line
}

fn centered(label: &str, width: usize) -> String {
    format!("{:^width$}", label, width = width)
}

/// Render one scope's table
///
/// # Arguments
///
/// * `scope_name` - Name shown in the title line
/// * `table` - Finished counter table
/// * `rows` - Number of rows (expected to be at least 1)
///
/// # Returns
///
/// The bordered table; every line has the same width and there are
/// always exactly `rows` data rows.
pub fn format_table(scope_name: &str, table: &CounterTable, rows: usize) -> String {
    let ranking = Ranking::from_table(table, rows);
    let count_widths = ranking.count_widths();

    let rank_width = digit_width(rows as u64);
    let rank_cell = (GUTTER.len() * 2 + rank_width).max(RANK_LABEL.len() + GUTTER.len() * 2);

    let columns: Vec<ColumnLayout> = (0..MAX_WINDOW)
        .map(|i| ColumnLayout::new(i + 1, count_widths[i], COLUMN_LABELS[i]))
        .collect();

    let mut widths = vec![rank_cell];
    widths.extend(columns.iter().map(|c| c.cell_width));
    let border = border(&widths);

    let mut output = String::new();
    output.push_str(&format!("Extension '{}'\n", scope_name));
    output.push_str(&border);
    output.push('\n');

    // Header
    output.push('|');
    output.push_str(&centered(RANK_LABEL, rank_cell));
    output.push('|');
    for (column, label) in columns.iter().zip(COLUMN_LABELS) {
        output.push_str(&centered(label, column.cell_width));
        output.push('|');
    }
    output.push('\n');
    output.push_str(&border);
    output.push('\n');

    for rank in 0..rows {
        output.push('|');
        output.push_str(&format!(
            "{g}{rank:>width$}{g}",
            g = GUTTER,
            rank = rank + 1,
            width = rank_cell - GUTTER.len() * 2,
        ));
        output.push('|');
        for column in &columns {
            let row = ranking.columns[column.cluster_len - 1].get(rank);
            output.push_str(&column.cell(row));
            output.push('|');
        }
        output.push('\n');
    }

    output.push_str(&border);
    output.push('\n');
    output
}

/// Whether the combined scope is worth printing
pub fn show_combined(frequencies: &SymbolFrequencies, allowed: bool) -> bool {
    allowed && frequencies.extension_count() > 1
}

/// Render every scope of a scan, extensions first
///
/// # Arguments
///
/// * `frequencies` - Finished scan counts
/// * `rows` - Rows per table
/// * `include_combined` - Allow the combined table (only shown with 2+ extensions)
/// * `use_markdown` - Wrap each table in triple backticks
pub fn format_report(
    frequencies: &SymbolFrequencies,
    rows: usize,
    include_combined: bool,
    use_markdown: bool,
) -> String {
    let combined = show_combined(frequencies, include_combined);
    let mut tables = Vec::new();

    for (scope, table) in frequencies.scopes() {
        if scope == Scope::Combined && !combined {
            continue;
        }

        let rendered = format_table(scope.name(), table, rows);
        if use_markdown {
            tables.push(format!("```\n{}```\n", rendered));
        } else {
            tables.push(rendered);
        }
    }

    if tables.is_empty() {
        return if use_markdown {
            "```\nNo symbol clusters found.\n```\n".to_string()
        } else {
            "No symbol clusters found.\n".to_string()
        };
    }

    tables.join("\n")
}

/// Summary block printed after the tables
pub fn format_summary(files: usize, frequencies: &SymbolFrequencies, elapsed: Duration) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Scan Complete".bold()));
    output.push_str(&format!("{} {}\n", "Files scanned:".green(), files));
    output.push_str(&format!("{} {}\n", "Lines scanned:".green(), frequencies.lines_scanned()));
    output.push_str(&format!("{} {}\n", "Extensions:".green(), frequencies.extension_count()));
    output.push_str(&format!(
        "{} {:.2} seconds\n",
        "Time elapsed:".green(),
        elapsed.as_secs_f64()
    ));
    output
}

#[derive(Serialize)]
struct ScopeExport<'a> {
    scope: &'a str,
    combined: bool,
    total: u64,
    single: &'a [RankedRow],
    pair: &'a [RankedRow],
    triple: &'a [RankedRow],
}

#[derive(Serialize)]
struct ReportExport<'a> {
    top: usize,
    width: usize,
    scopes: Vec<ScopeExport<'a>>,
}

/// Export the ranked clusters of every scope to a JSON file
pub fn export_results_json(
    frequencies: &SymbolFrequencies,
    rows: usize,
    output_path: &Path,
) -> Result<()> {
    let rankings: Vec<(Scope, u64, Ranking)> = frequencies
        .scopes()
        .map(|(scope, table)| (scope, table.total(), Ranking::from_table(table, rows)))
        .collect();

    let report = ReportExport {
        top: rows,
        width: frequencies.width(),
        scopes: rankings
            .iter()
            .map(|(scope, total, ranking)| ScopeExport {
                scope: scope.name(),
                combined: *scope == Scope::Combined,
                total: *total,
                single: &ranking.columns[0],
                pair: &ranking.columns[1],
                triple: &ranking.columns[2],
            })
            .collect(),
    };

    let file = File::create(output_path)
        .context(format!("Failed to create JSON output file: {}", output_path.display()))?;

    serde_json::to_writer_pretty(file, &report).context("Failed to write JSON data")?;

    Ok(())
}

/// Export the ranked clusters of every scope to a CSV file
///
/// One record per ranked row: scope, cluster length, rank, cluster, count.
pub fn create_csv_report(
    frequencies: &SymbolFrequencies,
    rows: usize,
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create CSV output file: {}", output_path.display()))?;

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["scope", "length", "rank", "cluster", "count"])
        .context("Failed to write CSV header")?;

    for (scope, table) in frequencies.scopes() {
        let ranking = Ranking::from_table(table, rows);
        for (index, column) in ranking.columns.iter().enumerate() {
            let length = (index + 1).to_string();
            for (rank, row) in column.iter().enumerate() {
                let rank = (rank + 1).to_string();
                let count = row.count.to_string();
                writer
                    .write_record([
                        scope.name(),
                        length.as_str(),
                        rank.as_str(),
                        row.cluster.as_str(),
                        count.as_str(),
                    ])
                    .context("Failed to write CSV record")?;
            }
        }
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}
