//! Window extraction
//!
//! Turns a single line of text into the sequence of short character windows
//! the classifier inspects. Windows never cross a line boundary.

/// Widest window the engine ever looks at
pub const MAX_WINDOW: usize = 3;

/// A 1 to 3 character slice of a line, borrowed from that line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    text: &'a str,
}

impl<'a> Window<'a> {
    /// The raw text covered by this window
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// First character of the window (always present)
    pub fn first(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Second character, absent near the end of the line
    pub fn second(&self) -> Option<char> {
        self.text.chars().nth(1)
    }

    /// Third character, absent near the end of the line
    pub fn third(&self) -> Option<char> {
        self.text.chars().nth(2)
    }

    /// Prefix of the window holding its first `chars` characters
    ///
    /// Returns `None` when the window is shorter than requested.
    pub fn prefix(&self, chars: usize) -> Option<&'a str> {
        if chars == 0 {
            return None;
        }
        let mut indices = self.text.char_indices().skip(chars);
        match indices.next() {
            Some((end, _)) => Some(&self.text[..end]),
            None if self.text.chars().count() == chars => Some(self.text),
            None => None,
        }
    }
}

/// Lazy iterator over the windows of one line
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    line: &'a str,
    offset: usize,
    width: usize,
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.line[self.offset..];
        let first = rest.chars().next()?;

        // End of the window: start of the (width + 1)th char, or end of line
        let end = rest
            .char_indices()
            .nth(self.width)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        self.offset += first.len_utf8();
        Some(Window { text: &rest[..end] })
    }
}

/// Produce one window per character offset of `line`
///
/// The line is trimmed first. Windows are up to `width` characters wide
/// (clamped to `1..=MAX_WINDOW`); the last few are truncated rather than
/// omitted, so a line of `k` characters always yields `k` windows.
///
/// # Arguments
///
/// * `line` - One line of source text
/// * `width` - Maximum window width
pub fn windows(line: &str, width: usize) -> Windows<'_> {
    Windows {
        line: line.trim(),
        offset: 0,
        width: width.clamp(1, MAX_WINDOW),
    }
}
