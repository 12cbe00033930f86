//! Grid data model
//!
//! Cells live in one flat `Vec<String>` indexed by `row * column_count + col`,
//! so every row has the same width by construction.

use serde::Serialize;

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rectangular table of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<String>,
    row_count: usize,
    column_count: usize,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from possibly ragged rows, padding short rows with
    /// empty cells.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * column_count);
        for row in rows {
            let pad = column_count - row.len();
            cells.extend(row);
            cells.extend(std::iter::repeat_with(String::new).take(pad));
        }
        Self {
            cells,
            row_count,
            column_count,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.row_count && col < self.column_count).then(|| row * self.column_count + col)
    }

    /// Cell value, or `""` outside the grid
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.index(row, col)
            .map(|i| self.cells[i].as_str())
            .unwrap_or("")
    }

    /// Overwrite a cell. Returns false (and changes nothing) outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = value.into();
                true
            }
            None => false,
        }
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row >= self.row_count {
            return None;
        }
        let start = row * self.column_count;
        Some(&self.cells[start..start + self.column_count])
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        (0..self.row_count).filter_map(move |r| self.row(r))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows().map(<[String]>::to_vec).collect()
    }

    /// Append a row. A longer row widens the whole grid; a shorter one is
    /// padded.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.insert_row(self.row_count, row);
    }

    /// Insert a row before `index` (clamped to the end)
    pub fn insert_row(&mut self, index: usize, mut row: Vec<String>) {
        if row.len() > self.column_count {
            self.widen(row.len());
        }
        row.resize_with(self.column_count, String::new);

        let index = index.min(self.row_count);
        let at = index * self.column_count;
        self.cells.splice(at..at, row);
        self.row_count += 1;
    }

    /// Remove a row, returning its cells
    pub fn remove_row(&mut self, index: usize) -> Option<Vec<String>> {
        if index >= self.row_count {
            return None;
        }
        let start = index * self.column_count;
        let removed = self.cells.drain(start..start + self.column_count).collect();
        self.row_count -= 1;
        Some(removed)
    }

    /// Insert an empty column before `index` (clamped to the end)
    pub fn insert_column(&mut self, index: usize) {
        let index = index.min(self.column_count);
        let old_width = self.column_count;
        let mut cells = Vec::with_capacity(self.row_count * (old_width + 1));
        let mut old = std::mem::take(&mut self.cells).into_iter();
        for _ in 0..self.row_count {
            cells.extend(old.by_ref().take(index));
            cells.push(String::new());
            cells.extend(old.by_ref().take(old_width - index));
        }
        self.cells = cells;
        self.column_count += 1;
    }

    /// Remove a column, returning its cells top to bottom
    pub fn remove_column(&mut self, index: usize) -> Option<Vec<String>> {
        if index >= self.column_count {
            return None;
        }
        let width = self.column_count;
        let mut removed = Vec::with_capacity(self.row_count);
        let mut cells = Vec::with_capacity(self.row_count * (width - 1));
        for (i, cell) in std::mem::take(&mut self.cells).into_iter().enumerate() {
            if i % width == index {
                removed.push(cell);
            } else {
                cells.push(cell);
            }
        }
        self.cells = cells;
        self.column_count -= 1;
        Some(removed)
    }

    fn widen(&mut self, width: usize) {
        while self.column_count < width {
            self.insert_column(self.column_count);
        }
    }

    /// Text for copying the rectangle spanned by `from` and `to`.
    ///
    /// Cells are tab-separated and rows newline-separated, with no trailing
    /// newline. Corners are clamped to the grid.
    pub fn range_text(&self, from: CellPosition, to: CellPosition) -> String {
        if self.is_empty() || self.column_count == 0 {
            return String::new();
        }
        let last_row = self.row_count - 1;
        let last_col = self.column_count - 1;
        let top = from.row.min(to.row).min(last_row);
        let bottom = from.row.max(to.row).min(last_row);
        let left = from.col.min(to.col).min(last_col);
        let right = from.col.max(to.col).min(last_col);

        (top..=bottom)
            .map(|r| {
                (left..=right)
                    .map(|c| self.get(r, c))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Spreadsheet-style column name: A..Z, AA, AB, ...
pub fn column_name(index: usize) -> String {
    let mut name = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        name.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}
