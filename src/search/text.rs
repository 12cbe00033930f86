//! Find and replace over flat text
//!
//! Every function is stateless: the caller passes in its current selection
//! and gets back the next one.

use super::matcher::{Deadline, Matcher};
use super::options::{SearchOptions, TextCursor, TextMatch};
use crate::error::SearchError;

/// Next match after the cursor, wrapping around to the start of the text.
///
/// The search begins at the end of the current selection. When nothing is
/// found before the end of the text, it restarts at offset 0 and accepts the
/// first match that starts before the original origin, so a lone match is
/// found again.
pub fn find_next(
    text: &str,
    cursor: TextCursor,
    options: &SearchOptions,
) -> Result<Option<TextMatch>, SearchError> {
    if options.pattern.is_empty() {
        return Ok(None);
    }
    let matcher = Matcher::new(options)?;
    let deadline = matcher.deadline();
    let origin = cursor.clamp_to(text).end();

    if let Some(found) = find_from(&matcher, text, origin, &deadline)? {
        return Ok(Some(found));
    }

    // An empty match at offset 0 counts on the wrap pass
    let wrapped = matcher
        .find_at(text, 0, &deadline)?
        .filter(|m| m.start < origin);
    if let Some(m) = wrapped {
        tracing::debug!(origin, start = m.start, "find wrapped to start of text");
    }
    Ok(wrapped)
}

/// Previous match before the cursor, wrapping around to the last match.
pub fn find_prev(
    text: &str,
    cursor: TextCursor,
    options: &SearchOptions,
) -> Result<Option<TextMatch>, SearchError> {
    if options.pattern.is_empty() {
        return Ok(None);
    }
    let matcher = Matcher::new(options)?;
    let before = cursor.clamp_to(text).start;
    matcher.find_before(text, before, &matcher.deadline())
}

/// Replace the selection if it is exactly one match, then find the next one.
///
/// Returns the new text, the cursor covering the inserted replacement (or
/// the unchanged cursor when nothing was replaced) and the next match.
pub fn replace_current(
    text: &str,
    cursor: TextCursor,
    options: &SearchOptions,
    replacement: &str,
) -> Result<(String, TextCursor, Option<TextMatch>), SearchError> {
    let cursor = cursor.clamp_to(text);
    if options.pattern.is_empty() {
        return Ok((text.to_string(), cursor, None));
    }

    let matcher = Matcher::new(options)?;
    let deadline = matcher.deadline();
    let selected = &text[cursor.start..cursor.end()];

    let (new_text, new_cursor) = match matcher.replace_whole(selected, replacement, &deadline)? {
        Some(inserted) => {
            let mut out = String::with_capacity(text.len() - selected.len() + inserted.len());
            out.push_str(&text[..cursor.start]);
            out.push_str(&inserted);
            out.push_str(&text[cursor.end()..]);
            (out, TextCursor::new(cursor.start, inserted.len()))
        }
        None => (text.to_string(), cursor),
    };

    let next = find_next(&new_text, new_cursor, options)?;
    Ok((new_text, new_cursor, next))
}

/// Replace every non-overlapping match, returning the new text and the
/// number of replacements.
pub fn replace_all(
    text: &str,
    options: &SearchOptions,
    replacement: &str,
) -> Result<(String, usize), SearchError> {
    if options.pattern.is_empty() {
        return Ok((text.to_string(), 0));
    }
    let matcher = Matcher::new(options)?;
    let (replaced, count) = matcher.replace_all(text, replacement, &matcher.deadline())?;
    tracing::debug!(count, regex = options.use_regex, "replaced all matches");
    Ok((replaced, count))
}

/// First match at or after `origin`, stepping over an empty match sitting
/// exactly on the origin so repeated calls make progress.
fn find_from(
    matcher: &Matcher,
    text: &str,
    origin: usize,
    deadline: &Deadline,
) -> Result<Option<TextMatch>, SearchError> {
    match matcher.find_at(text, origin, deadline)? {
        Some(m) if m.is_empty() && m.start == origin => {
            let Some(c) = text[origin..].chars().next() else {
                return Ok(None);
            };
            matcher.find_at(text, origin + c.len_utf8(), deadline)
        }
        found => Ok(found),
    }
}
