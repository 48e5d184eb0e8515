//! Property-based tests for the counting engine
//!
//! Core properties tested:
//! 1. Letters are never counted
//! 2. Accumulation does not depend on input order
//! 3. The combined scope is the sum of the extension scopes
//! 4. Ranking is deterministic regardless of insertion order
//! 5. Rendered tables always have the requested number of rows

use proptest::prelude::*;

use symbol_clusters::core::classifier::classify;
use symbol_clusters::core::window::windows;
use symbol_clusters::{format_table, top_clusters, CounterTable, Scope, SymbolFrequencies};

fn source_line() -> impl Strategy<Value = String> {
    "[ -~]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_letter_lines_count_nothing(lines in prop::collection::vec("[a-zA-Z]{0,30}", 0..10)) {
        let mut freqs = SymbolFrequencies::new();
        freqs.record_lines("rs", &lines);
        prop_assert!(freqs.is_empty());
    }

    #[test]
    fn prop_letter_first_window_is_skipped(first in "[a-zA-Z]", rest in "[ -~]{0,2}") {
        let text = format!("{}{}", first, rest);
        let window = windows(&text, 3).next().unwrap();
        prop_assert!(classify(&window).is_empty());
    }

    #[test]
    fn prop_keys_never_start_with_letter(lines in prop::collection::vec(source_line(), 0..10)) {
        let mut freqs = SymbolFrequencies::new();
        freqs.record_lines("rs", &lines);
        for (_, table) in freqs.scopes() {
            for (cluster, _) in table.iter() {
                prop_assert!(!cluster.chars().next().unwrap().is_alphabetic());
            }
        }
    }

    #[test]
    fn prop_order_independent(
        a in prop::collection::vec(source_line(), 0..8),
        b in prop::collection::vec(source_line(), 0..8),
    ) {
        let mut forward = SymbolFrequencies::new();
        forward.record_lines("rs", &a);
        forward.record_lines("py", &b);

        let mut backward = SymbolFrequencies::new();
        backward.record_lines("py", &b);
        backward.record_lines("rs", &a);

        let mut interleaved = SymbolFrequencies::new();
        for i in 0..a.len().max(b.len()) {
            if let Some(line) = b.get(i) {
                interleaved.record_line("py", line);
            }
            if let Some(line) = a.get(i) {
                interleaved.record_line("rs", line);
            }
        }

        let mut merged = SymbolFrequencies::new();
        let mut part_b = SymbolFrequencies::new();
        part_b.record_lines("py", &b);
        let mut part_a = SymbolFrequencies::new();
        part_a.record_lines("rs", &a);
        merged.merge(part_b);
        merged.merge(part_a);

        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(&forward, &interleaved);
        prop_assert_eq!(&forward, &merged);
    }

    #[test]
    fn prop_combined_is_sum_of_extensions(
        a in prop::collection::vec(source_line(), 0..8),
        b in prop::collection::vec(source_line(), 0..8),
    ) {
        let mut freqs = SymbolFrequencies::new();
        freqs.record_lines("c", &a);
        freqs.record_lines("h", &b);

        if let Some(combined) = freqs.table(&Scope::Combined) {
            let empty = CounterTable::new();
            let c = freqs.table(&Scope::Extension("c".to_string())).unwrap_or(&empty);
            let h = freqs.table(&Scope::Extension("h".to_string())).unwrap_or(&empty);
            for (cluster, count) in combined.iter() {
                prop_assert_eq!(count, c.count(cluster) + h.count(cluster));
            }
            prop_assert!(combined.len() <= c.len() + h.len());
        } else {
            prop_assert!(freqs.is_empty());
        }
    }

    #[test]
    fn prop_ranking_ignores_insertion_order(
        clusters in prop::collection::vec(("[!-/]{1,2}", 1u64..4), 1..12),
    ) {
        let mut forward = CounterTable::new();
        let mut backward = CounterTable::new();
        for (cluster, count) in &clusters {
            for _ in 0..*count {
                forward.increment(cluster);
            }
        }
        for (cluster, count) in clusters.iter().rev() {
            for _ in 0..*count {
                backward.increment(cluster);
            }
        }

        for len in 1..=2 {
            let rows = top_clusters(&forward, len, 50);
            prop_assert_eq!(&rows, &top_clusters(&backward, len, 50));
            for pair in rows.windows(2) {
                prop_assert!(
                    pair[0].count > pair[1].count
                        || (pair[0].count == pair[1].count && pair[0].cluster < pair[1].cluster)
                );
            }
        }
    }

    #[test]
    fn prop_table_always_has_requested_rows(
        lines in prop::collection::vec(source_line(), 1..6),
        rows in 1usize..30,
    ) {
        let mut table = CounterTable::new();
        let mut freqs = SymbolFrequencies::new();
        freqs.record_lines("rs", &lines);
        if let Some(counted) = freqs.table(&Scope::Extension("rs".to_string())) {
            table.merge(counted);
        }

        let rendered = format_table("rs", &table, rows);
        let lines: Vec<&str> = rendered.lines().collect();
        prop_assert_eq!(lines.len(), rows + 5);

        let width = lines[1].chars().count();
        for line in &lines[1..] {
            prop_assert_eq!(line.chars().count(), width);
        }
    }
}
