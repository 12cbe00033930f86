//! Benchmarks for find/replace
//!
//! Run with: cargo bench --bench search

use textcore::search::{
    find_next, find_next_row, replace_all, replace_all_cells, SearchOptions, TextCursor,
};
use textcore::table::{parse, DelimiterConfig};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn text(line_count: usize) -> String {
    "The quick brown fox jumps over the lazy dog.\n".repeat(line_count)
}

// ============================================================================
// Flat text
// ============================================================================

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn find_last_match_plain(bencher: divan::Bencher, line_count: usize) {
    let text = text(line_count);
    let options = SearchOptions::plain("lazy").matching_case(true);
    let cursor = TextCursor::at(text.len() - 20);
    bencher.bench(|| find_next(divan::black_box(&text), cursor, &options));
}

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn find_last_match_ignore_case(bencher: divan::Bencher, line_count: usize) {
    let text = text(line_count);
    let options = SearchOptions::plain("LAZY");
    let cursor = TextCursor::at(text.len() - 20);
    bencher.bench(|| find_next(divan::black_box(&text), cursor, &options));
}

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn find_regex(bencher: divan::Bencher, line_count: usize) {
    let text = text(line_count);
    let options = SearchOptions::regex(r"\bl\w+y\b");
    let cursor = TextCursor::at(text.len() - 20);
    bencher.bench(|| find_next(divan::black_box(&text), cursor, &options));
}

#[divan::bench(args = [1_000, 10_000])]
fn replace_all_plain(bencher: divan::Bencher, line_count: usize) {
    let text = text(line_count);
    let options = SearchOptions::plain("the");
    bencher.bench(|| replace_all(divan::black_box(&text), &options, "a"));
}

#[divan::bench(args = [1_000, 10_000])]
fn replace_all_regex_captures(bencher: divan::Bencher, line_count: usize) {
    let text = text(line_count);
    let options = SearchOptions::regex(r"(\w+) (fox|dog)").for_replace_all();
    bencher.bench(|| replace_all(divan::black_box(&text), &options, "$2 $1"));
}

// ============================================================================
// Grid cells
// ============================================================================

fn table_text(row_count: usize) -> String {
    (0..row_count)
        .map(|i| format!("{i},name {i},city {},\"note, {i}\"\n", i % 17))
        .collect()
}

#[divan::bench(args = [1_000, 10_000])]
fn find_next_row_no_match(bencher: divan::Bencher, row_count: usize) {
    let grid = parse(&table_text(row_count), &DelimiterConfig::csv());
    let options = SearchOptions::plain("missing");
    bencher.bench(|| find_next_row(divan::black_box(&grid), None, None, &options));
}

#[divan::bench(args = [1_000, 10_000])]
fn replace_all_cells_one_column(bencher: divan::Bencher, row_count: usize) {
    let grid = parse(&table_text(row_count), &DelimiterConfig::csv());
    let options = SearchOptions::plain("city").for_replace_all();
    bencher
        .with_inputs(|| grid.clone())
        .bench_local_values(|mut g| {
            let _ = replace_all_cells(&mut g, Some(2), &options, "town");
            g
        });
}
