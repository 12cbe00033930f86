//! textcore - encoding detection, delimited text and find/replace
//!
//! The editing core behind a text editor with a table mode:
//!
//! - [`encoding`] guesses how a byte buffer is encoded (BOMs, ISO-2022-JP
//!   escapes, UTF-8, EUC-JP and Shift-JIS heuristics) and transcodes it
//! - [`table`] parses CSV/TSV into a rectangular [`Grid`] and writes it back
//! - [`search`] finds and replaces in flat text or in grid cells, with plain
//!   or regex patterns and wraparound
//!
//! Everything here is synchronous and stateless; callers own the text, the
//! grid and the cursor.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod encoding;
pub mod error;
pub mod search;
pub mod table;
pub mod tracing;

// Re-export commonly used types
pub use config::CoreConfig;
pub use encoding::{decode, detect, encode, DetectionMethod, DetectionResult, EncodingKind};
pub use error::{ConfigError, SearchError};
pub use search::{SearchOptions, TextCursor, TextMatch};
pub use table::{parse, serialize, CellPosition, DelimiterConfig, Grid};
