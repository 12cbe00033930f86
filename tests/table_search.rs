//! Column-scoped search over parsed tables

mod common;

use std::time::Duration;

use common::{grid, people};
use textcore::search::{find_next_row, replace_all_cells, replace_current_cell, SearchOptions};
use textcore::table::{parse, serialize, CellPosition, DelimiterConfig};
use textcore::SearchError;

/// Follow `find_next_row` until a cell repeats
fn walk(g: &textcore::Grid, col: Option<usize>, options: &SearchOptions) -> Vec<CellPosition> {
    let mut seen = Vec::new();
    let mut last_row = None;
    while let Some(cell) = find_next_row(g, last_row, col, options).unwrap() {
        if seen.contains(&cell) {
            break;
        }
        seen.push(cell);
        last_row = Some(cell.row);
    }
    seen
}

#[test]
fn test_walk_all_columns() {
    let options = SearchOptions::plain("cat");
    assert_eq!(
        walk(&people(), None, &options),
        vec![CellPosition::new(1, 2), CellPosition::new(3, 2)]
    );
}

#[test]
fn test_first_matching_column_per_row() {
    let g = grid(&[&["x", "a", "a"], &["a", "x", "a"]]);
    let options = SearchOptions::plain("a");
    assert_eq!(
        walk(&g, None, &options),
        vec![CellPosition::new(0, 1), CellPosition::new(1, 0)]
    );
}

#[test]
fn test_target_column_only() {
    let options = SearchOptions::plain("paris");
    assert_eq!(
        walk(&people(), Some(1), &options),
        vec![CellPosition::new(1, 1), CellPosition::new(3, 1)]
    );
    assert!(walk(&people(), Some(0), &options).is_empty());
}

#[test]
fn test_target_column_out_of_range() {
    let mut g = people();
    let options = SearchOptions::plain("a");
    assert_eq!(find_next_row(&g, None, Some(3), &options).unwrap(), None);
    assert_eq!(replace_all_cells(&mut g, Some(3), &options, "b").unwrap(), 0);
    assert_eq!(g, people());
}

#[test]
fn test_last_row_past_end_restarts_at_top() {
    let options = SearchOptions::plain("alice");
    assert_eq!(
        find_next_row(&people(), Some(99), None, &options).unwrap(),
        Some(CellPosition::new(1, 0))
    );
}

#[test]
fn test_single_match_found_again_after_wrap() {
    let options = SearchOptions::plain("tokyo");
    let g = people();
    let first = find_next_row(&g, None, None, &options).unwrap().unwrap();
    let again = find_next_row(&g, Some(first.row), None, &options).unwrap();
    assert_eq!(again, Some(first));
}

#[test]
fn test_regex_cells() {
    let options = SearchOptions::regex(r"^[A-Z]\w+$").matching_case(true);
    assert_eq!(
        walk(&people(), Some(1), &options),
        vec![
            CellPosition::new(1, 1),
            CellPosition::new(2, 1),
            CellPosition::new(4, 1),
        ]
    );
}

#[test]
fn test_replace_current_cell_then_next() {
    let mut g = people();
    let options = SearchOptions::plain("cat");
    let (replaced, next) =
        replace_current_cell(&mut g, CellPosition::new(1, 2), None, &options, "dog").unwrap();
    assert!(replaced);
    assert_eq!(g.get(1, 2), "likes dogs");
    assert_eq!(next, Some(CellPosition::new(3, 2)));

    let (replaced, next) =
        replace_current_cell(&mut g, CellPosition::new(3, 2), None, &options, "dog").unwrap();
    assert!(replaced);
    assert_eq!(g.get(3, 2), "dog owner, two dogs");
    assert_eq!(next, None);
}

#[test]
fn test_replace_current_cell_invalid_regex() {
    let mut g = people();
    let options = SearchOptions::regex("[");
    let err = replace_current_cell(&mut g, CellPosition::new(0, 0), None, &options, "x").unwrap_err();
    assert!(matches!(err, SearchError::InvalidPattern(_)));
    assert_eq!(g, people());
}

#[test]
fn test_replace_all_cells_counts_occurrences() {
    let mut g = people();
    let options = SearchOptions::plain("cat");
    // "likes cats" has one, "Cat owner, two cats" has two
    assert_eq!(replace_all_cells(&mut g, Some(2), &options, "dog").unwrap(), 3);
    assert_eq!(g.get(3, 2), "dog owner, two dogs");
}

#[test]
fn test_replace_all_cells_timeout_is_atomic() {
    let mut g = people();
    let options = SearchOptions::regex("a").with_timeout(Duration::ZERO);
    assert_eq!(
        replace_all_cells(&mut g, None, &options, "b"),
        Err(SearchError::Timeout(Duration::ZERO))
    );
    assert_eq!(g, people());
}

#[test]
fn test_replace_all_cells_then_serialize() {
    let config = DelimiterConfig::csv();
    let mut g = parse("name,city\nAnn,\"Paris, FR\"\nBen,Lyon\n", &config);
    let options = SearchOptions::plain(", FR");
    assert_eq!(replace_all_cells(&mut g, Some(1), &options, "").unwrap(), 1);
    assert_eq!(serialize(&g, &config), "name,city\nAnn,Paris\nBen,Lyon");
}
