//! Line access with LSP position conversion.
//!
//! Documents are kept as plain strings; every feature in this crate works one
//! line at a time. [`LineIndex`] pre-computes line start offsets so a line can
//! be fetched without rescanning the document, and [`line_span`] converts a
//! line's text into the UTF-16 based [`Range`] LSP clients expect.

use tower_lsp_server::ls_types::{Position, Range};

/// Pre-computed line start byte offsets for O(1) line lookups.
///
/// Line text never includes the terminator; both `\n` and `\r\n` endings are
/// recognised. A trailing newline yields a final empty line, the same way
/// editors number lines.
///
/// # Examples
///
/// ```
/// use exdoc_core::lines::LineIndex;
///
/// let index = LineIndex::new("class A\r\n{\n}");
/// assert_eq!(index.line_count(), 3);
/// assert_eq!(index.line(0), Some("class A"));
/// assert_eq!(index.line(3), None);
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    content: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            content,
            line_starts,
        }
    }

    /// Number of lines in the document.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text of line `line`, without its terminator.
    pub fn line(&self, line: u32) -> Option<&'a str> {
        let idx = line as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.content.len(), |next| next - 1);

        let text = &self.content[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Terminator to use for a line inserted next to `line`.
    ///
    /// Follows the line's own terminator. The last line has none, so it
    /// takes the one before it; a single-line document gets `\n`.
    pub fn line_ending(&self, line: u32) -> &'static str {
        let idx = (line as usize).min(self.line_starts.len() - 1);
        let terminated = if idx + 1 < self.line_starts.len() {
            idx
        } else if idx > 0 {
            idx - 1
        } else {
            return "\n";
        };

        let newline = self.line_starts[terminated + 1] - 1;
        if newline > 0 && self.content.as_bytes()[newline - 1] == b'\r' {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Returns the range covering the whole of line `line`.
    pub fn line_span(&self, line: u32) -> Option<Range> {
        self.line(line).map(|text| line_span(line, text))
    }
}

/// Range from the first to the last character of a line.
pub fn line_span(line: u32, text: &str) -> Range {
    Range::new(Position::new(line, 0), Position::new(line, utf16_len(text)))
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Leading spaces and tabs of a line.
pub fn leading_whitespace(text: &str) -> &str {
    let trimmed = text.trim_start_matches([' ', '\t']);
    &text[..text.len() - trimmed.len()]
}
