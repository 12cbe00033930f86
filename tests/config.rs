//! Configuration system tests
//!
//! Tests for config paths and loading `config.yaml`.

use std::fs;
use std::time::Duration;

use textcore::config::{CoreConfig, SearchConfig, TableConfig};
use textcore::config_paths;
use textcore::search::{FIND_TIMEOUT, REPLACE_ALL_TIMEOUT};
use textcore::table::ParseMode;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("textcore"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Core Config Tests
// ========================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, CoreConfig::default());
}

#[test]
fn test_load_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
table:
  delimiter: ";"
  use_quotes: false
  quote_char: "'"
  first_row_header: true
  records: true
search:
  case_sensitive: true
  use_regex: true
  find_timeout_ms: 250
  replace_all_timeout_ms: 1000
"#,
    )
    .unwrap();

    let config = CoreConfig::load_from(&path);
    assert_eq!(
        config.table,
        TableConfig {
            delimiter: ';',
            use_quotes: false,
            quote_char: '\'',
            first_row_header: true,
            records: true,
        }
    );

    let dialect = config.table.delimiter_config().unwrap();
    assert_eq!(dialect.delimiter(), ';');
    assert_eq!(dialect.mode(), ParseMode::Records);

    let find = config.search.find_options("x+");
    assert!(find.use_regex && find.case_sensitive);
    assert_eq!(find.regex_timeout, Duration::from_millis(250));
    assert_eq!(
        config.search.replace_all_options("x+").regex_timeout,
        Duration::from_secs(1)
    );
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "search:\n  case_sensitive: true\n").unwrap();

    let config = CoreConfig::load_from(&path);
    assert!(config.search.case_sensitive);
    assert_eq!(config.table, TableConfig::default());
    assert_eq!(
        Duration::from_millis(config.search.find_timeout_ms),
        FIND_TIMEOUT
    );
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "table: [this is: not, a map").unwrap();
    assert_eq!(CoreConfig::load_from(&path), CoreConfig::default());
}

#[test]
fn test_default_timeouts() {
    let search = SearchConfig::default();
    assert_eq!(Duration::from_millis(search.find_timeout_ms), FIND_TIMEOUT);
    assert_eq!(
        Duration::from_millis(search.replace_all_timeout_ms),
        REPLACE_ALL_TIMEOUT
    );
}
