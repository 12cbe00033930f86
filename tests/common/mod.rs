//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use textcore::table::Grid;

/// Build nested rows from string slices
pub fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Build a grid from string slices, padding ragged rows
pub fn grid(data: &[&[&str]]) -> Grid {
    Grid::from_rows(rows(data))
}

/// A small people table with a header row
pub fn people() -> Grid {
    grid(&[
        &["name", "city", "note"],
        &["Alice", "Paris", "likes cats"],
        &["Bob", "Lyon", ""],
        &["Carol", "paris", "Cat owner, two cats"],
        &["Dave", "Tokyo", "東京"],
    ])
}

/// Japanese sample text covering hiragana, katakana and kanji
pub const JAPANESE: &str = "こんにちは、カタカナと漢字のテスト。";

/// Encode with the given encoding_rs codec, panicking on unmappable input
pub fn encode_with(codec: &'static encoding_rs::Encoding, text: &str) -> Vec<u8> {
    let (bytes, _, unmappable) = codec.encode(text);
    assert!(!unmappable, "sample text must be representable");
    bytes.into_owned()
}

/// Byte offsets of every occurrence of `needle` in `haystack`
pub fn offsets(haystack: &str, needle: &str) -> Vec<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).collect()
}
