//! User configuration
//!
//! Read from `~/.config/textcore/config.yaml`. The file is optional and never
//! written; every field falls back to its default.
//!
//! ```yaml
//! table:
//!   delimiter: "\t"
//!   first_row_header: true
//! search:
//!   case_sensitive: true
//!   find_timeout_ms: 2000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::{SearchOptions, FIND_TIMEOUT, REPLACE_ALL_TIMEOUT};
use crate::table::{DelimiterConfig, ParseMode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Defaults for table mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub delimiter: char,
    pub use_quotes: bool,
    pub quote_char: char,
    /// Treat the first row as column headers
    pub first_row_header: bool,
    /// Parse quoted fields across line breaks
    pub records: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            use_quotes: true,
            quote_char: '"',
            first_row_header: false,
            records: false,
        }
    }
}

impl TableConfig {
    pub fn delimiter_config(&self) -> Result<DelimiterConfig, ConfigError> {
        let mode = if self.records {
            ParseMode::Records
        } else {
            ParseMode::Lines
        };
        Ok(DelimiterConfig::new(self.delimiter, self.use_quotes, self.quote_char)?.with_mode(mode))
    }
}

/// Defaults for find/replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub case_sensitive: bool,
    pub use_regex: bool,
    pub find_timeout_ms: u64,
    pub replace_all_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            use_regex: false,
            find_timeout_ms: millis(FIND_TIMEOUT),
            replace_all_timeout_ms: millis(REPLACE_ALL_TIMEOUT),
        }
    }
}

impl SearchConfig {
    /// Options for a single find or replace
    pub fn find_options(&self, pattern: impl Into<String>) -> SearchOptions {
        SearchOptions {
            pattern: pattern.into(),
            case_sensitive: self.case_sensitive,
            use_regex: self.use_regex,
            regex_timeout: Duration::from_millis(self.find_timeout_ms),
        }
    }

    /// Options for replace-all, with the longer budget
    pub fn replace_all_options(&self, pattern: impl Into<String>) -> SearchOptions {
        self.find_options(pattern)
            .with_timeout(Duration::from_millis(self.replace_all_timeout_ms))
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl CoreConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
