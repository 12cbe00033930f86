//! Delimited text (CSV/TSV) codec
//!
//! Turns decoded text into a rectangular [`Grid`] and back:
//!
//! ```text
//! String ──parse(config)──▶ Vec<Vec<String>> ──normalize──▶ Grid
//!   ▲                         (ragged rows)                   │
//!   └──────────────────── serialize(config) ◀─────────────────┘
//! ```
//!
//! The grid is always rectangular; short rows are padded with empty cells.
//! Parsing never fails: any string yields a grid, however degenerate.

mod dialect;
mod filter;
mod model;
mod parser;
mod writer;

pub use dialect::{detect_delimiter, Delimiter, DelimiterConfig, ParseMode};
pub use filter::{filter_rows, FilterKind, ParseFilterKindError, RowFilter};
pub use model::{column_name, CellPosition, Grid};
pub use parser::{max_column_count, normalize, parse, parse_rows};
pub use writer::{escape_field, serialize};
