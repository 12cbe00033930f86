//! Find and replace
//!
//! Two engines share one [`Matcher`]:
//!
//! - [`text`] works on a flat string with a [`TextCursor`] selection and
//!   reports byte-offset [`TextMatch`]es
//! - [`grid`] works on a [`Grid`](crate::table::Grid) and reports whole
//!   cells, optionally restricted to one column
//!
//! Neither keeps state between calls. The caller threads the last cursor or
//! row back in.

pub mod grid;
pub mod matcher;
pub mod options;
pub mod text;

pub use grid::{find_next_row, replace_all_cells, replace_current_cell};
pub use matcher::{Deadline, Matcher};
pub use options::{SearchOptions, TextCursor, TextMatch, FIND_TIMEOUT, REPLACE_ALL_TIMEOUT};
pub use text::{find_next, find_prev, replace_all, replace_current};
