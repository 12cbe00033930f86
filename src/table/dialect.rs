//! Delimiter and quoting configuration

use crate::error::ConfigError;

/// Common delimiter presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// How line breaks inside quoted fields are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Split into lines first, then scan each line for fields. A quoted field
    /// cannot contain a line break.
    #[default]
    Lines,
    /// Scan the whole buffer as RFC 4180 records so quoted fields may span
    /// lines. Blank lines are skipped. Needs an ASCII delimiter and quote.
    Records,
}

/// Field delimiter and optional quoting.
///
/// The delimiter and quote character always differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterConfig {
    delimiter: char,
    use_quotes: bool,
    quote_char: char,
    mode: ParseMode,
}

impl DelimiterConfig {
    pub fn new(delimiter: char, use_quotes: bool, quote_char: char) -> Result<Self, ConfigError> {
        if delimiter == quote_char {
            return Err(ConfigError::DelimiterIsQuote(delimiter));
        }
        Ok(Self {
            delimiter,
            use_quotes,
            quote_char,
            mode: ParseMode::Lines,
        })
    }

    /// Comma-separated, `"`-quoted
    pub fn csv() -> Self {
        Self::from(Delimiter::Comma)
    }

    /// Tab-separated, `"`-quoted
    pub fn tsv() -> Self {
        Self::from(Delimiter::Tab)
    }

    pub fn with_quotes(mut self, use_quotes: bool) -> Self {
        self.use_quotes = use_quotes;
        self
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn use_quotes(&self) -> bool {
        self.use_quotes
    }

    pub fn quote_char(&self) -> char {
        self.quote_char
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }
}

impl Default for DelimiterConfig {
    fn default() -> Self {
        Self::csv()
    }
}

impl From<Delimiter> for DelimiterConfig {
    fn from(delimiter: Delimiter) -> Self {
        Self {
            delimiter: delimiter.char(),
            use_quotes: true,
            quote_char: '"',
            mode: ParseMode::Lines,
        }
    }
}
