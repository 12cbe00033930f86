//! Command-line argument parsing for the `textcore` tool
//!
//! Supports:
//! - Reporting the detected encoding of a file
//! - Viewing a delimited file as a table, optionally filtered
//! - Finding and replacing in plain text or in table cells

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::encoding::EncodingKind;
use crate::table::{FilterKind, RowFilter};

/// Encoding detection, CSV/TSV and find/replace for text files
#[derive(Parser, Debug)]
#[command(name = "textcore", version, about = "Encoding-aware text and table tool")]
pub struct CliArgs {
    /// Decode input as LABEL instead of detecting (utf-8, sjis, euc-jp, jis, ...)
    #[arg(long, global = true, value_name = "LABEL")]
    pub encoding: Option<EncodingKind>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the detected encoding of a file
    Detect {
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Parse a delimited file and print it as a table
    Table(TableArgs),

    /// List every match, in wraparound order
    Find(FindArgs),

    /// Replace every match and write the re-encoded result
    Replace(ReplaceArgs),
}

/// How to split a file into cells
#[derive(Args, Debug, Clone, Default)]
pub struct DialectArgs {
    /// Field delimiter (defaults to the file extension, then the config)
    #[arg(long, value_name = "C")]
    pub delimiter: Option<char>,

    /// Quote character
    #[arg(long, value_name = "C")]
    pub quote: Option<char>,

    /// Treat quote characters as ordinary text
    #[arg(long)]
    pub no_quotes: bool,

    /// Allow quoted fields to span lines
    #[arg(long)]
    pub records: bool,
}

#[derive(Args, Debug)]
pub struct TableArgs {
    pub file: PathBuf,

    #[command(flatten)]
    pub dialect: DialectArgs,

    /// First row holds column names
    #[arg(long)]
    pub header: bool,

    /// Filter on column N (1-based); all columns when omitted
    #[arg(long, value_name = "N", requires = "value")]
    pub filter_column: Option<usize>,

    /// Filter comparison (equals, contains, starts-with, ends-with,
    /// length-at-least, length-at-most)
    #[arg(long, value_name = "KIND", requires = "value")]
    pub filter: Option<FilterKind>,

    /// Value to filter rows by
    #[arg(long, value_name = "V")]
    pub value: Option<String>,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

/// Pattern and scope shared by `find` and `replace`
#[derive(Args, Debug)]
pub struct SearchArgs {
    pub file: PathBuf,

    /// Text or regular expression to search for
    #[arg(short, long, value_name = "P")]
    pub pattern: String,

    /// Interpret the pattern as a regular expression
    #[arg(short, long)]
    pub regex: bool,

    /// Match case exactly
    #[arg(short, long)]
    pub case_sensitive: bool,

    /// Search table cells instead of raw text
    #[arg(long)]
    pub table: bool,

    /// Restrict a table search to column N (1-based)
    #[arg(long, value_name = "N", requires = "table")]
    pub column: Option<usize>,

    #[command(flatten)]
    pub dialect: DialectArgs,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    #[command(flatten)]
    pub search: SearchArgs,
}

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Replacement text; `$1` / `${name}` expand capture groups in regex mode
    #[arg(short = 'w', long = "with", value_name = "R")]
    pub replacement: String,

    /// Write to PATH instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Convert a 1-based column number from the user to a 0-based index
pub fn column_index(column: Option<usize>) -> Result<Option<usize>, String> {
    match column {
        None => Ok(None),
        Some(0) => Err("Column numbers start at 1".to_string()),
        Some(n) => Ok(Some(n - 1)),
    }
}

impl TableArgs {
    /// The row filter requested on the command line, if any
    pub fn row_filter(&self) -> Result<Option<RowFilter>, String> {
        let Some(value) = &self.value else {
            return Ok(None);
        };
        let column = column_index(self.filter_column)?;
        let kind = self.filter.unwrap_or_default();
        Ok(Some(RowFilter::new(column, kind, value.clone())))
    }
}
