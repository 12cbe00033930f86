//! Row filtering for table views

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::model::Grid;
use crate::search::matcher::{eq_ignore_case, find_plain, fold};

/// How a cell value is compared with the filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    Equals,
    #[default]
    Contains,
    StartsWith,
    EndsWith,
    /// Cell has at least N characters
    LengthAtLeast,
    /// Cell has at most N characters
    LengthAtMost,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Equals,
        FilterKind::Contains,
        FilterKind::StartsWith,
        FilterKind::EndsWith,
        FilterKind::LengthAtLeast,
        FilterKind::LengthAtMost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Equals => "equals",
            FilterKind::Contains => "contains",
            FilterKind::StartsWith => "starts-with",
            FilterKind::EndsWith => "ends-with",
            FilterKind::LengthAtLeast => "length-at-least",
            FilterKind::LengthAtMost => "length-at-most",
        }
    }

    fn is_length(self) -> bool {
        matches!(self, FilterKind::LengthAtLeast | FilterKind::LengthAtMost)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown filter kind: {0}")]
pub struct ParseFilterKindError(pub String);

impl FromStr for FilterKind {
    type Err = ParseFilterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase().replace('_', "-");
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == label)
            .ok_or_else(|| ParseFilterKindError(s.to_string()))
    }
}

/// A filter condition over one column, or over any column when `column` is
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub column: Option<usize>,
    pub kind: FilterKind,
    pub value: String,
}

impl RowFilter {
    pub fn new(column: Option<usize>, kind: FilterKind, value: impl Into<String>) -> Self {
        Self {
            column,
            kind,
            value: value.into(),
        }
    }

    /// An empty value on a text comparison filters nothing out
    pub fn is_pass_through(&self) -> bool {
        self.value.is_empty() && !self.kind.is_length()
    }

    /// Test one cell value
    pub fn matches(&self, cell: &str) -> bool {
        let value = self.value.as_str();
        match self.kind {
            FilterKind::Equals => eq_ignore_case(cell, value),
            FilterKind::Contains => value.is_empty() || find_plain(cell, value, false, 0).is_some(),
            FilterKind::StartsWith => starts_with_ignore_case(cell, value),
            FilterKind::EndsWith => ends_with_ignore_case(cell, value),
            FilterKind::LengthAtLeast => parse_length(value).is_some_and(|n| char_len(cell) >= n),
            FilterKind::LengthAtMost => parse_length(value).is_some_and(|n| char_len(cell) <= n),
        }
    }

    fn matches_row(&self, grid: &Grid, row: usize) -> bool {
        match self.column {
            Some(col) if col < grid.column_count() => self.matches(grid.get(row, col)),
            Some(_) => false,
            None => grid
                .row(row)
                .is_some_and(|cells| cells.iter().any(|cell| self.matches(cell))),
        }
    }
}

/// Indices of the grid rows that satisfy `filter`.
///
/// With `skip_header` the first row is treated as a header and never
/// returned. Indices are grid rows, so the header (when present) is row 0.
pub fn filter_rows(grid: &Grid, filter: &RowFilter, skip_header: bool) -> Vec<usize> {
    let first = usize::from(skip_header).min(grid.row_count());
    let rows = first..grid.row_count();

    let kept: Vec<usize> = if filter.is_pass_through() {
        rows.collect()
    } else {
        rows.filter(|&row| filter.matches_row(grid, row)).collect()
    };
    tracing::debug!(
        kind = %filter.kind,
        column = ?filter.column,
        kept = kept.len(),
        total = grid.row_count() - first,
        "filtered rows"
    );
    kept
}

fn char_len(s: &str) -> i64 {
    i64::try_from(s.chars().count()).unwrap_or(i64::MAX)
}

fn parse_length(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn starts_with_ignore_case(hay: &str, prefix: &str) -> bool {
    let mut hay_chars = hay.chars();
    prefix
        .chars()
        .all(|p| hay_chars.next().is_some_and(|h| fold(h) == fold(p)))
}

fn ends_with_ignore_case(hay: &str, suffix: &str) -> bool {
    let mut hay_chars = hay.chars().rev();
    suffix
        .chars()
        .rev()
        .all(|s| hay_chars.next().is_some_and(|h| fold(h) == fold(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_rows(
            [
                ["name", "city"],
                ["Alice", "Paris"],
                ["Bob", "Lyon"],
                ["Carol", "Marseille"],
            ]
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
        )
    }

    #[test]
    fn test_text_kinds_ignore_case() {
        let f = |kind, value: &str| RowFilter::new(None, kind, value);
        assert!(f(FilterKind::Equals, "PARIS").matches("Paris"));
        assert!(!f(FilterKind::Equals, "Pari").matches("Paris"));
        assert!(f(FilterKind::Contains, "ARI").matches("Paris"));
        assert!(f(FilterKind::StartsWith, "pa").matches("Paris"));
        assert!(!f(FilterKind::StartsWith, "Parisian").matches("Paris"));
        assert!(f(FilterKind::EndsWith, "RIS").matches("Paris"));
        assert!(!f(FilterKind::EndsWith, "aris!").matches("Paris"));
    }

    #[test]
    fn test_length_kinds_count_chars() {
        let at_least = RowFilter::new(None, FilterKind::LengthAtLeast, "3");
        assert!(at_least.matches("東京都"));
        assert!(!at_least.matches("東京"));

        let at_most = RowFilter::new(None, FilterKind::LengthAtMost, " 2 ");
        assert!(at_most.matches("東京"));
        assert!(!at_most.matches("東京都"));
    }

    #[test]
    fn test_length_kind_with_bad_number_matches_nothing() {
        let filter = RowFilter::new(None, FilterKind::LengthAtLeast, "abc");
        assert!(filter_rows(&grid(), &filter, false).is_empty());
    }

    #[test]
    fn test_filter_any_column() {
        let filter = RowFilter::new(None, FilterKind::Contains, "o");
        assert_eq!(filter_rows(&grid(), &filter, true), vec![2, 3]);
        assert_eq!(filter_rows(&grid(), &filter, false), vec![2, 3]);
    }

    #[test]
    fn test_filter_one_column() {
        let filter = RowFilter::new(Some(1), FilterKind::StartsWith, "m");
        assert_eq!(filter_rows(&grid(), &filter, true), vec![3]);
        let outside = RowFilter::new(Some(7), FilterKind::Contains, "a");
        assert!(filter_rows(&grid(), &outside, true).is_empty());
    }

    #[test]
    fn test_empty_value_keeps_all_rows() {
        let filter = RowFilter::new(Some(0), FilterKind::Equals, "");
        assert_eq!(filter_rows(&grid(), &filter, true), vec![1, 2, 3]);
    }

    #[test]
    fn test_header_row_is_skipped() {
        let filter = RowFilter::new(None, FilterKind::Equals, "name");
        assert!(filter_rows(&grid(), &filter, true).is_empty());
        assert_eq!(filter_rows(&grid(), &filter, false), vec![0]);
    }

    #[test]
    fn test_parse_filter_kind() {
        assert_eq!("starts_with".parse::<FilterKind>(), Ok(FilterKind::StartsWith));
        assert_eq!("Length-At-Most".parse::<FilterKind>(), Ok(FilterKind::LengthAtMost));
        assert!("between".parse::<FilterKind>().is_err());
    }
}
