use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use textcore::cli::{column_index, CliArgs, Command, DialectArgs, SearchArgs, TableArgs};
use textcore::config::CoreConfig;
use textcore::encoding::{self, DetectionResult, EncodingKind};
use textcore::search::{self, SearchOptions, TextCursor};
use textcore::table::{self, column_name, Delimiter, DelimiterConfig, Grid};

/// A file read from disk and decoded
struct Loaded {
    text: String,
    encoding: EncodingKind,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    textcore::tracing::init(args.verbose);
    let config = CoreConfig::load();

    match &args.command {
        Command::Detect { file, json } => run_detect(file, *json),
        Command::Table(table) => run_table(table, args.encoding, &config),
        Command::Find(find) => run_find(&find.search, args.encoding, &config),
        Command::Replace(replace) => {
            let options = search_options(&replace.search, &config, true);
            let loaded = load(&replace.search.file, args.encoding)?;
            let (text, count) = if replace.search.table {
                replace_in_table(&replace.search, &loaded.text, &options, &replace.replacement, &config)?
            } else {
                search::replace_all(&loaded.text, &options, &replace.replacement)?
            };
            eprintln!("{} replacement(s)", count);
            write_encoded(&text, loaded.encoding, replace.output.as_deref())
        }
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load(path: &Path, encoding: Option<EncodingKind>) -> Result<Loaded> {
    let bytes = read_bytes(path)?;
    let encoding = encoding.unwrap_or_else(|| encoding::detect(&bytes).encoding);
    let decoded = encoding::decode(&bytes, encoding);
    tracing::debug!(
        path = %path.display(),
        %encoding,
        had_errors = decoded.had_errors,
        "loaded file"
    );
    Ok(Loaded {
        text: decoded.text,
        encoding,
    })
}

fn run_detect(path: &Path, json: bool) -> Result<()> {
    let detection = encoding::detect(&read_bytes(path)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&detection)?);
    } else {
        println!("{}: {}", path.display(), describe(&detection));
    }
    Ok(())
}

fn describe(detection: &DetectionResult) -> String {
    if detection.detected {
        format!("{} ({})", detection.encoding.display_name(), detection.method)
    } else {
        format!(
            "{} (not detected: {})",
            detection.encoding.display_name(),
            detection.method
        )
    }
}

/// Command-line flags over the file extension over the config file
fn delimiter_config(path: &Path, dialect: &DialectArgs, config: &CoreConfig) -> Result<DelimiterConfig> {
    let mut table = config.table.clone();
    if let Some(delimiter) = dialect.delimiter.or_else(|| extension_delimiter(path)) {
        table.delimiter = delimiter;
    }
    if let Some(quote) = dialect.quote {
        table.quote_char = quote;
    }
    if dialect.no_quotes {
        table.use_quotes = false;
    }
    if dialect.records {
        table.records = true;
    }
    Ok(table.delimiter_config()?)
}

fn extension_delimiter(path: &Path) -> Option<char> {
    let ext = path.extension()?.to_str()?;
    match Delimiter::from_extension(ext) {
        Delimiter::Comma => None,
        other => Some(other.char()),
    }
}

fn run_table(args: &TableArgs, encoding: Option<EncodingKind>, config: &CoreConfig) -> Result<()> {
    let loaded = load(&args.file, encoding)?;
    let dialect = delimiter_config(&args.file, &args.dialect, config)?;
    let grid = table::parse(&loaded.text, &dialect);
    let header = args.header || config.table.first_row_header;

    let first = usize::from(header).min(grid.row_count());
    let filter = args.row_filter().map_err(anyhow::Error::msg)?;
    let rows: Vec<usize> = match &filter {
        Some(filter) => table::filter_rows(&grid, filter, header),
        None => (first..grid.row_count()).collect(),
    };

    let columns = column_titles(&grid, header);
    let mut out = io::stdout().lock();
    if args.json {
        let body = serde_json::json!({
            "columns": columns,
            "rows": rows.iter().filter_map(|&r| grid.row(r)).collect::<Vec<_>>(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    } else {
        write_aligned(&mut out, &grid, &columns, &rows)?;
    }

    if filter.is_some() {
        eprintln!("Filtered: {}/{} rows", rows.len(), grid.row_count() - first);
    }
    Ok(())
}

/// Header cells, or spreadsheet letters where a header is missing or blank
fn column_titles(grid: &Grid, header: bool) -> Vec<String> {
    (0..grid.column_count())
        .map(|c| {
            let title = if header { grid.get(0, c) } else { "" };
            if title.is_empty() {
                column_name(c)
            } else {
                title.to_string()
            }
        })
        .collect()
}

fn display_cell(cell: &str) -> String {
    cell.replace(['\r', '\n'], " ")
}

fn write_aligned(out: &mut impl Write, grid: &Grid, columns: &[String], rows: &[usize]) -> Result<()> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for &r in rows {
        for (c, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(display_cell(grid.get(r, c)).chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(columns.to_vec()))?;
    writeln!(
        out,
        "{}",
        widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-")
    )?;
    for &r in rows {
        let cells = (0..grid.column_count())
            .map(|c| display_cell(grid.get(r, c)))
            .collect();
        writeln!(out, "{}", line(cells))?;
    }
    Ok(())
}

fn search_options(args: &SearchArgs, config: &CoreConfig, bulk: bool) -> SearchOptions {
    let mut options = if bulk {
        config.search.replace_all_options(args.pattern.as_str())
    } else {
        config.search.find_options(args.pattern.as_str())
    };
    options.use_regex |= args.regex;
    options.case_sensitive |= args.case_sensitive;
    options
}

fn run_find(args: &SearchArgs, encoding: Option<EncodingKind>, config: &CoreConfig) -> Result<()> {
    let loaded = load(&args.file, encoding)?;
    let options = search_options(args, config, false);
    let mut out = io::stdout().lock();

    if args.table {
        let dialect = delimiter_config(&args.file, &args.dialect, config)?;
        let grid = table::parse(&loaded.text, &dialect);
        let target_col = column_index(args.column).map_err(anyhow::Error::msg)?;

        let mut seen = HashSet::new();
        let mut last_row = None;
        while let Some(cell) = search::find_next_row(&grid, last_row, target_col, &options)? {
            if !seen.insert(cell) {
                break;
            }
            writeln!(
                out,
                "{}{}: {}",
                column_name(cell.col),
                cell.row + 1,
                display_cell(grid.get(cell.row, cell.col))
            )?;
            last_row = Some(cell.row);
        }
        eprintln!("{} matching cell(s)", seen.len());
        return Ok(());
    }

    let text = loaded.text.as_str();
    let mut seen = HashSet::new();
    let mut cursor = TextCursor::at(0);
    while let Some(m) = search::find_next(text, cursor, &options)? {
        if !seen.insert((m.start, m.length)) {
            break;
        }
        let (line, col) = line_col(text, m.start);
        writeln!(out, "{}:{}: {:?}", line, col, m.text_in(text))?;
        cursor = m.into();
    }
    eprintln!("{} match(es)", seen.len());
    Ok(())
}

/// 1-based line and character column of a byte offset
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}

fn replace_in_table(
    args: &SearchArgs,
    text: &str,
    options: &SearchOptions,
    replacement: &str,
    config: &CoreConfig,
) -> Result<(String, usize)> {
    let dialect = delimiter_config(&args.file, &args.dialect, config)?;
    let mut grid = table::parse(text, &dialect);
    let target_col = column_index(args.column).map_err(anyhow::Error::msg)?;
    let count = search::replace_all_cells(&mut grid, target_col, options, replacement)?;

    let mut out = table::serialize(&grid, &dialect);
    if text.ends_with('\n') && !out.is_empty() {
        out.push('\n');
    }
    Ok((out, count))
}

fn write_encoded(text: &str, encoding: EncodingKind, output: Option<&Path>) -> Result<()> {
    let encoded = encoding::encode(text, encoding);
    if encoded.had_unmappable {
        tracing::warn!(%encoding, "some characters were written as numeric references");
    }
    match output {
        Some(path) => fs::write(path, &encoded.bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&encoded.bytes)?;
            out.flush()?;
            Ok(())
        }
    }
}
