//! Search options, cursors and match locations

use std::time::Duration;

use serde::Serialize;

/// Regex budget for a single find or replace
pub const FIND_TIMEOUT: Duration = Duration::from_secs(5);

/// Regex budget for replace-all
pub const REPLACE_ALL_TIMEOUT: Duration = Duration::from_secs(30);

/// What to search for and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub pattern: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
    /// Wall-clock budget for regex evaluation. Plain searches ignore it.
    pub regex_timeout: Duration,
}

impl SearchOptions {
    /// Literal, case-insensitive search
    pub fn plain(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Regular-expression, case-insensitive search
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            use_regex: true,
            ..Self::default()
        }
    }

    pub fn matching_case(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.regex_timeout = timeout;
        self
    }

    /// Same options with the longer replace-all budget
    pub fn for_replace_all(self) -> Self {
        self.with_timeout(REPLACE_ALL_TIMEOUT)
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            case_sensitive: false,
            use_regex: false,
            regex_timeout: FIND_TIMEOUT,
        }
    }
}

/// The caller's current selection, in byte offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCursor {
    pub start: usize,
    pub length: usize,
}

impl TextCursor {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Caret with no selection
    pub fn at(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Clamp to `text`, snapping both ends down to char boundaries
    pub(crate) fn clamp_to(self, text: &str) -> Self {
        let start = floor_char_boundary(text, self.start);
        let end = floor_char_boundary(text, self.end()).max(start);
        Self::new(start, end - start)
    }
}

/// A match in flat text, in byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    pub start: usize,
    pub length: usize,
}

impl TextMatch {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The matched slice of `text`
    pub fn text_in<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end()]
    }
}

impl From<TextMatch> for TextCursor {
    fn from(m: TextMatch) -> Self {
        Self::new(m.start, m.length)
    }
}

pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SearchOptions::default();
        assert!(!options.case_sensitive);
        assert!(!options.use_regex);
        assert_eq!(options.regex_timeout, FIND_TIMEOUT);
    }

    #[test]
    fn test_for_replace_all_uses_long_budget() {
        let options = SearchOptions::regex("a+").for_replace_all();
        assert_eq!(options.regex_timeout, REPLACE_ALL_TIMEOUT);
        assert!(options.use_regex);
    }

    #[test]
    fn test_cursor_clamp_snaps_to_boundaries() {
        let text = "aé"; // 'é' is two bytes at 1..3
        assert_eq!(TextCursor::new(2, 5).clamp_to(text), TextCursor::new(1, 2));
        assert_eq!(TextCursor::new(9, 0).clamp_to(text), TextCursor::new(3, 0));
    }

    #[test]
    fn test_match_text_in() {
        let m = TextMatch::new(4, 3);
        assert_eq!(m.text_in("the cat"), "cat");
        assert_eq!(TextCursor::from(m), TextCursor::new(4, 3));
    }
}
