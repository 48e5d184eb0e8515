//! Symbol classification
//!
//! Decides, for a single window, which of the single / pair / triple
//! counters receive an increment. The checks run in a fixed order and any
//! of them may end the chain early.

use crate::core::window::Window;

/// Clusters a window contributes to, borrowed from the window text
///
/// A pair is not required for a triple: a whitespace middle character
/// suppresses the pair but still allows the triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hits<'a> {
    pub single: Option<&'a str>,
    pub pair: Option<&'a str>,
    pub triple: Option<&'a str>,
}

impl<'a> Hits<'a> {
    /// True when nothing is counted for the window
    pub fn is_empty(&self) -> bool {
        self.single.is_none() && self.pair.is_none() && self.triple.is_none()
    }

    /// Counted clusters, shortest first
    pub fn clusters(&self) -> impl Iterator<Item = &'a str> {
        [self.single, self.pair, self.triple].into_iter().flatten()
    }
}

fn is_letter_or_digit(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

/// Classify a window
///
/// # Arguments
///
/// * `window` - Window produced by the extractor
///
/// # Returns
///
/// The clusters to increment; empty when the window starts with a letter
pub fn classify<'a>(window: &Window<'a>) -> Hits<'a> {
    let mut hits = Hits::default();

    let w0 = match window.first() {
        Some(c) if !c.is_alphabetic() => c,
        _ => return hits,
    };
    hits.single = window.prefix(1);

    // Digits are counted alone but never open a pair or triple
    if w0.is_numeric() {
        return hits;
    }

    let w1 = match window.second() {
        Some(c) if !is_letter_or_digit(c) => c,
        _ => return hits,
    };
    if !w1.is_whitespace() {
        hits.pair = window.prefix(2);
    }

    let w2 = match window.third() {
        Some(c) if !is_letter_or_digit(c) => c,
        _ => return hits,
    };
    if w0.is_whitespace() || w2.is_whitespace() {
        return hits;
    }
    hits.triple = window.prefix(3);

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::window::windows;

    fn classify_str(text: &str) -> Hits<'_> {
        // Width 3 on a 1..=3 char string yields the whole string first
        let window = windows(text, 3).next().expect("non-empty window");
        classify(&window)
    }

    #[test]
    fn test_letter_first_counts_nothing() {
        for text in ["a", "a!", "a!!", "Z{}", "é::"] {
            assert!(classify_str(text).is_empty(), "{} should be skipped", text);
        }
    }

    #[test]
    fn test_digit_counts_single_only() {
        let hits = classify_str("1!!");
        assert_eq!(hits.single, Some("1"));
        assert_eq!(hits.pair, None);
        assert_eq!(hits.triple, None);
    }

    #[test]
    fn test_full_triple() {
        let hits = classify_str("->{");
        assert_eq!(hits.single, Some("-"));
        assert_eq!(hits.pair, Some("->"));
        assert_eq!(hits.triple, Some("->{"));
    }

    #[test]
    fn test_alnum_second_char_stops_at_single() {
        let hits = classify_str("!b!");
        assert_eq!(hits.single, Some("!"));
        assert_eq!(hits.pair, None);
        assert_eq!(hits.triple, None);
    }

    #[test]
    fn test_whitespace_middle_skips_pair_keeps_triple() {
        let hits = classify_str("# #");
        assert_eq!(hits.single, Some("#"));
        assert_eq!(hits.pair, None);
        assert_eq!(hits.triple, Some("# #"));
    }

    #[test]
    fn test_alnum_third_char_stops_after_pair() {
        let hits = classify_str("!!b");
        assert_eq!(hits.single, Some("!"));
        assert_eq!(hits.pair, Some("!!"));
        assert_eq!(hits.triple, None);
    }

    #[test]
    fn test_whitespace_outer_chars_block_triple() {
        // Leading whitespace only happens inside a line, so build the window
        // from the middle of one.
        let line = "x ;;";
        let window = windows(line, 3).nth(1).unwrap();
        assert_eq!(window.as_str(), " ;;");
        let hits = classify(&window);
        assert_eq!(hits.single, Some(" "));
        assert_eq!(hits.pair, Some(" ;"));
        assert_eq!(hits.triple, None);

        let window = windows("x;; y", 3).nth(1).unwrap();
        assert_eq!(window.as_str(), ";; ");
        let hits = classify(&window);
        assert_eq!(hits.pair, Some(";;"));
        assert_eq!(hits.triple, None);
    }

    #[test]
    fn test_truncated_windows() {
        let hits = classify_str("!");
        assert_eq!(hits.single, Some("!"));
        assert_eq!(hits.pair, None);

        let hits = classify_str("::");
        assert_eq!(hits.pair, Some("::"));
        assert_eq!(hits.triple, None);
    }

    #[test]
    fn test_clusters_iterates_shortest_first() {
        let hits = classify_str("..=");
        assert_eq!(hits.clusters().collect::<Vec<_>>(), vec![".", "..", "..="]);
    }
}
