//! Plain and regex matching behind one interface
//!
//! Both search engines go through [`Matcher`], so case handling, timeouts and
//! replacement expansion live in exactly one place.

use std::time::{Duration, Instant};

use regex::{Regex, RegexBuilder};

use super::options::{floor_char_boundary, SearchOptions, TextMatch};
use crate::error::SearchError;

/// Upper bound on a compiled regex program
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Wall-clock budget for one operation.
///
/// The regex crate matches in linear time, so the budget is checked before
/// the first search and between successive matches rather than inside one.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires: Option<Instant>,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            expires: Instant::now().checked_add(budget),
            budget,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            expires: None,
            budget: Duration::MAX,
        }
    }

    pub fn check(&self) -> Result<(), SearchError> {
        match self.expires {
            Some(at) if Instant::now() >= at => {
                tracing::warn!(budget = ?self.budget, "regex search timed out");
                Err(SearchError::Timeout(self.budget))
            }
            _ => Ok(()),
        }
    }
}

/// A compiled search pattern
#[derive(Debug, Clone)]
pub enum Matcher {
    Plain {
        pattern: String,
        case_sensitive: bool,
    },
    Regex {
        regex: Regex,
        case_sensitive: bool,
        timeout: Duration,
    },
}

impl Matcher {
    pub fn new(options: &SearchOptions) -> Result<Self, SearchError> {
        if !options.use_regex {
            return Ok(Matcher::Plain {
                pattern: options.pattern.clone(),
                case_sensitive: options.case_sensitive,
            });
        }

        let regex = build_regex(&options.pattern, options.case_sensitive)?;
        Ok(Matcher::Regex {
            regex,
            case_sensitive: options.case_sensitive,
            timeout: options.regex_timeout,
        })
    }

    /// Start the clock for one operation
    pub fn deadline(&self) -> Deadline {
        match self {
            Matcher::Plain { .. } => Deadline::unbounded(),
            Matcher::Regex { timeout, .. } => Deadline::after(*timeout),
        }
    }

    /// First match starting at or after byte offset `from`.
    ///
    /// An offset inside a multi-byte character is moved back to its start.
    pub fn find_at(
        &self,
        text: &str,
        from: usize,
        deadline: &Deadline,
    ) -> Result<Option<TextMatch>, SearchError> {
        if from > text.len() {
            return Ok(None);
        }
        let from = floor_char_boundary(text, from);
        match self {
            Matcher::Plain {
                pattern,
                case_sensitive,
            } => Ok(find_plain(text, pattern, *case_sensitive, from)),
            Matcher::Regex { regex, .. } => {
                deadline.check()?;
                Ok(regex
                    .find_at(text, from)
                    .map(|m| TextMatch::new(m.start(), m.len())))
            }
        }
    }

    /// Nearest match before `before`, wrapping to the last match in `text`.
    ///
    /// Plain patterns accept the last occurrence that ends at or before
    /// `before`. Regex matches are collected left to right and the last one
    /// starting before `before` wins.
    pub fn find_before(
        &self,
        text: &str,
        before: usize,
        deadline: &Deadline,
    ) -> Result<Option<TextMatch>, SearchError> {
        let before = floor_char_boundary(text, before);
        match self {
            Matcher::Plain {
                pattern,
                case_sensitive,
            } => Ok(rfind_plain(text, pattern, *case_sensitive, before)
                .or_else(|| rfind_plain(text, pattern, *case_sensitive, text.len()))),
            Matcher::Regex { .. } => {
                let all = self.find_all(text, deadline)?;
                Ok(all
                    .iter()
                    .rev()
                    .find(|m| m.start < before)
                    .or(all.last())
                    .copied())
            }
        }
    }

    /// Every non-overlapping match, left to right
    pub fn find_all(&self, text: &str, deadline: &Deadline) -> Result<Vec<TextMatch>, SearchError> {
        match self {
            Matcher::Plain {
                pattern,
                case_sensitive,
            } => {
                let mut found = Vec::new();
                let mut pos = 0;
                while let Some(m) = find_plain(text, pattern, *case_sensitive, pos) {
                    found.push(m);
                    pos = m.end();
                }
                Ok(found)
            }
            Matcher::Regex { regex, .. } => {
                deadline.check()?;
                let mut found = Vec::new();
                for m in regex.find_iter(text) {
                    deadline.check()?;
                    found.push(TextMatch::new(m.start(), m.len()));
                }
                Ok(found)
            }
        }
    }

    /// Whether the pattern occurs anywhere in `text`
    pub fn is_match(&self, text: &str, deadline: &Deadline) -> Result<bool, SearchError> {
        Ok(self.find_at(text, 0, deadline)?.is_some())
    }

    /// Substitute `text` as a whole if the entire string is one match.
    ///
    /// Returns `None` when `text` is not an exact match. Regex replacements
    /// expand `$1` / `${name}` capture references.
    pub fn replace_whole(
        &self,
        text: &str,
        replacement: &str,
        deadline: &Deadline,
    ) -> Result<Option<String>, SearchError> {
        match self {
            Matcher::Plain {
                pattern,
                case_sensitive,
            } => {
                let equal = if *case_sensitive {
                    text == pattern
                } else {
                    eq_ignore_case(text, pattern)
                };
                Ok(equal.then(|| replacement.to_string()))
            }
            Matcher::Regex {
                regex,
                case_sensitive,
                ..
            } => {
                deadline.check()?;
                let anchored = anchored_regex(regex, *case_sensitive);
                let caps = match &anchored {
                    Some(anchored) => anchored.captures(text),
                    None => regex
                        .captures(text)
                        .filter(|c| c.get(0).is_some_and(|m| m.start() == 0 && m.end() == text.len())),
                };
                Ok(caps.map(|caps| {
                    let mut out = String::new();
                    caps.expand(replacement, &mut out);
                    out
                }))
            }
        }
    }

    /// Replace every non-overlapping match, returning the new text and the
    /// number of replacements.
    pub fn replace_all(
        &self,
        text: &str,
        replacement: &str,
        deadline: &Deadline,
    ) -> Result<(String, usize), SearchError> {
        match self {
            Matcher::Plain {
                pattern,
                case_sensitive,
            } => Ok(replace_plain(text, pattern, *case_sensitive, replacement)),
            Matcher::Regex { regex, .. } => {
                deadline.check()?;
                let mut out = String::with_capacity(text.len());
                let mut last = 0;
                let mut count = 0;
                for caps in regex.captures_iter(text) {
                    deadline.check()?;
                    let Some(m) = caps.get(0) else { continue };
                    out.push_str(&text[last..m.start()]);
                    caps.expand(replacement, &mut out);
                    last = m.end();
                    count += 1;
                }
                out.push_str(&text[last..]);
                Ok((out, count))
            }
        }
    }
}

fn build_regex(pattern: &str, case_sensitive: bool) -> Result<Regex, SearchError> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()?)
}

/// `\A(?:pattern)\z`, or `None` if wrapping breaks the pattern (a trailing
/// `(?x)` comment swallows the closing group).
fn anchored_regex(regex: &Regex, case_sensitive: bool) -> Option<Regex> {
    build_regex(&format!(r"\A(?:{})\z", regex.as_str()), case_sensitive).ok()
}

/// Ordinal case folding: a char's single-char uppercase form, or itself
pub(crate) fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count() && a.chars().zip(b.chars()).all(|(x, y)| fold(x) == fold(y))
}

/// Byte length of the prefix of `hay` matching `pattern` char by char
fn prefix_len_ignore_case(hay: &str, pattern: &str) -> Option<usize> {
    let mut hay_chars = hay.char_indices();
    for p in pattern.chars() {
        let (_, h) = hay_chars.next()?;
        if fold(h) != fold(p) {
            return None;
        }
    }
    Some(hay_chars.next().map_or(hay.len(), |(i, _)| i))
}

pub(crate) fn find_plain(
    text: &str,
    pattern: &str,
    case_sensitive: bool,
    from: usize,
) -> Option<TextMatch> {
    if pattern.is_empty() || from > text.len() {
        return None;
    }
    let rest = &text[from..];
    if case_sensitive {
        return rest
            .find(pattern)
            .map(|i| TextMatch::new(from + i, pattern.len()));
    }
    rest.char_indices().find_map(|(i, _)| {
        prefix_len_ignore_case(&rest[i..], pattern).map(|len| TextMatch::new(from + i, len))
    })
}

/// Last occurrence lying entirely within `text[..before]`
fn rfind_plain(text: &str, pattern: &str, case_sensitive: bool, before: usize) -> Option<TextMatch> {
    if pattern.is_empty() {
        return None;
    }
    let head = &text[..before.min(text.len())];
    if case_sensitive {
        return head
            .rfind(pattern)
            .map(|i| TextMatch::new(i, pattern.len()));
    }
    head.char_indices().rev().find_map(|(i, _)| {
        prefix_len_ignore_case(&head[i..], pattern).map(|len| TextMatch::new(i, len))
    })
}

/// Moving-cursor replacement: copy the untouched prefix, append the
/// replacement, continue after the consumed match.
fn replace_plain(
    text: &str,
    pattern: &str,
    case_sensitive: bool,
    replacement: &str,
) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut count = 0;
    while let Some(m) = find_plain(text, pattern, case_sensitive, pos) {
        out.push_str(&text[pos..m.start]);
        out.push_str(replacement);
        pos = m.end();
        count += 1;
    }
    out.push_str(&text[pos..]);
    (out, count)
}
