//! Column-scoped search over a grid
//!
//! Matches are reported per cell. A search either covers every column or a
//! single target column; a target column outside the grid covers nothing.

use std::ops::Range;

use super::matcher::{Deadline, Matcher};
use super::options::SearchOptions;
use crate::error::SearchError;
use crate::table::{CellPosition, Grid};

/// First cell after `last_row` whose value contains a match.
///
/// Rows after `last_row` are scanned first, then the search wraps to row 0
/// and continues up to and including `last_row`. Within a row, columns are
/// visited left to right.
pub fn find_next_row(
    grid: &Grid,
    last_row: Option<usize>,
    target_col: Option<usize>,
    options: &SearchOptions,
) -> Result<Option<CellPosition>, SearchError> {
    if options.pattern.is_empty() {
        return Ok(None);
    }
    let matcher = Matcher::new(options)?;
    let deadline = matcher.deadline();
    find_in_grid(grid, last_row, &column_range(grid, target_col), &matcher, &deadline)
}

/// Replace every match inside `cell` if it contains one, then move on to the
/// next matching cell after its row.
///
/// Returns whether the cell changed and where the next match is. If the
/// follow-up search fails the cell is restored before the error is returned.
pub fn replace_current_cell(
    grid: &mut Grid,
    cell: CellPosition,
    target_col: Option<usize>,
    options: &SearchOptions,
    replacement: &str,
) -> Result<(bool, Option<CellPosition>), SearchError> {
    if options.pattern.is_empty() {
        return Ok((false, None));
    }
    let matcher = Matcher::new(options)?;
    let deadline = matcher.deadline();

    let value = grid.get(cell.row, cell.col).to_string();
    let mut replaced = false;
    if matcher.is_match(&value, &deadline)? {
        let (new_value, count) = matcher.replace_all(&value, replacement, &deadline)?;
        replaced = grid.set(cell.row, cell.col, new_value);
        tracing::trace!(row = cell.row, col = cell.col, count, "replaced in cell");
    }

    let columns = column_range(grid, target_col);
    match find_in_grid(grid, Some(cell.row), &columns, &matcher, &deadline) {
        Ok(next) => Ok((replaced, next)),
        Err(e) => {
            if replaced {
                grid.set(cell.row, cell.col, value);
            }
            Err(e)
        }
    }
}

/// Replace every match in every cell in range.
///
/// Returns the number of replaced occurrences. New values are staged and
/// written only once the whole grid has been scanned, so an error leaves the
/// grid untouched.
pub fn replace_all_cells(
    grid: &mut Grid,
    target_col: Option<usize>,
    options: &SearchOptions,
    replacement: &str,
) -> Result<usize, SearchError> {
    if options.pattern.is_empty() {
        return Ok(0);
    }
    let matcher = Matcher::new(options)?;
    let deadline = matcher.deadline();
    let columns = column_range(grid, target_col);

    let mut staged = Vec::new();
    let mut total = 0;
    for row in 0..grid.row_count() {
        for col in columns.clone() {
            let value = grid.get(row, col);
            let (new_value, count) = matcher.replace_all(value, replacement, &deadline)?;
            if count > 0 {
                total += count;
                staged.push((row, col, new_value));
            }
        }
    }

    let cells = staged.len();
    for (row, col, value) in staged {
        grid.set(row, col, value);
    }
    tracing::debug!(total, cells, "replaced all matches in grid");
    Ok(total)
}

fn column_range(grid: &Grid, target_col: Option<usize>) -> Range<usize> {
    match target_col {
        Some(col) if col < grid.column_count() => col..col + 1,
        Some(_) => 0..0,
        None => 0..grid.column_count(),
    }
}

fn find_in_grid(
    grid: &Grid,
    last_row: Option<usize>,
    columns: &Range<usize>,
    matcher: &Matcher,
    deadline: &Deadline,
) -> Result<Option<CellPosition>, SearchError> {
    let rows = grid.row_count();
    let start = last_row
        .map(|r| r + 1)
        .filter(|&r| r < rows)
        .unwrap_or(0);

    if let Some(found) = scan_rows(grid, start..rows, columns, matcher, deadline)? {
        return Ok(Some(found));
    }
    let wrapped = scan_rows(grid, 0..start, columns, matcher, deadline)?;
    if let Some(pos) = wrapped {
        tracing::debug!(row = pos.row, col = pos.col, "cell search wrapped to first row");
    }
    Ok(wrapped)
}

fn scan_rows(
    grid: &Grid,
    rows: Range<usize>,
    columns: &Range<usize>,
    matcher: &Matcher,
    deadline: &Deadline,
) -> Result<Option<CellPosition>, SearchError> {
    for row in rows {
        for col in columns.clone() {
            if matcher.is_match(grid.get(row, col), deadline)? {
                return Ok(Some(CellPosition::new(row, col)));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn grid(data: &[&[&str]]) -> Grid {
        Grid::from_rows(
            data.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn people() -> Grid {
        grid(&[
            &["name", "city"],
            &["Alice", "Paris"],
            &["Bob", "Lyon"],
            &["Carol", "paris"],
        ])
    }

    #[test]
    fn test_find_next_row_from_start() {
        let options = SearchOptions::plain("paris");
        assert_eq!(
            find_next_row(&people(), None, None, &options).unwrap(),
            Some(CellPosition::new(1, 1))
        );
    }

    #[test]
    fn test_find_next_row_advances_and_wraps() {
        let g = people();
        let options = SearchOptions::plain("paris");
        assert_eq!(
            find_next_row(&g, Some(1), None, &options).unwrap(),
            Some(CellPosition::new(3, 1))
        );
        assert_eq!(
            find_next_row(&g, Some(3), None, &options).unwrap(),
            Some(CellPosition::new(1, 1))
        );
    }

    #[test]
    fn test_wrap_includes_last_row() {
        let g = people();
        let options = SearchOptions::plain("bob");
        assert_eq!(
            find_next_row(&g, Some(2), None, &options).unwrap(),
            Some(CellPosition::new(2, 0))
        );
    }

    #[test]
    fn test_target_column_limits_search() {
        let g = people();
        let options = SearchOptions::plain("a");
        assert_eq!(
            find_next_row(&g, Some(0), Some(1), &options).unwrap(),
            Some(CellPosition::new(1, 1))
        );
        assert_eq!(find_next_row(&g, None, Some(5), &options).unwrap(), None);
    }

    #[test]
    fn test_replace_current_cell() {
        let mut g = people();
        let options = SearchOptions::plain("paris");
        let (replaced, next) =
            replace_current_cell(&mut g, CellPosition::new(1, 1), None, &options, "Nice").unwrap();
        assert!(replaced);
        assert_eq!(g.get(1, 1), "Nice");
        assert_eq!(next, Some(CellPosition::new(3, 1)));
    }

    #[test]
    fn test_replace_current_cell_without_match() {
        let mut g = people();
        let options = SearchOptions::plain("paris");
        let (replaced, next) =
            replace_current_cell(&mut g, CellPosition::new(2, 0), None, &options, "x").unwrap();
        assert!(!replaced);
        assert_eq!(g, people());
        assert_eq!(next, Some(CellPosition::new(3, 1)));
    }

    #[test]
    fn test_replace_current_cell_replaces_every_match_in_cell() {
        let mut g = grid(&[&["a-a-a"]]);
        let options = SearchOptions::plain("a");
        replace_current_cell(&mut g, CellPosition::new(0, 0), None, &options, "b").unwrap();
        assert_eq!(g.get(0, 0), "b-b-b");
    }

    #[test]
    fn test_replace_all_cells_counts_occurrences() {
        let mut g = grid(&[&["aa", "b"], &["a", "a"]]);
        let options = SearchOptions::plain("a");
        assert_eq!(replace_all_cells(&mut g, None, &options, "x").unwrap(), 4);
        assert_eq!(g.to_rows(), grid(&[&["xx", "b"], &["x", "x"]]).to_rows());
    }

    #[test]
    fn test_replace_all_cells_in_one_column() {
        let mut g = people();
        let options = SearchOptions::regex(r"^(\w)\w*$").matching_case(true);
        assert_eq!(replace_all_cells(&mut g, Some(0), &options, "$1.").unwrap(), 4);
        assert_eq!(g.get(1, 0), "A.");
        assert_eq!(g.get(1, 1), "Paris");
    }

    #[test]
    fn test_replace_all_cells_timeout_leaves_grid() {
        let mut g = people();
        let options = SearchOptions::regex("a").with_timeout(Duration::ZERO);
        let err = replace_all_cells(&mut g, None, &options, "x").unwrap_err();
        assert_eq!(err, SearchError::Timeout(Duration::ZERO));
        assert_eq!(g, people());
    }

    #[test]
    fn test_empty_grid() {
        let options = SearchOptions::plain("a");
        assert_eq!(find_next_row(&Grid::new(), None, None, &options).unwrap(), None);
        assert_eq!(replace_all_cells(&mut Grid::new(), None, &options, "b").unwrap(), 0);
    }
}
