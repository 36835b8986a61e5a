//! Functional-style sequence processing cookbook.
//!
//! Fourteen independent, numbered pipelines over integer ranges, literal
//! collections and two small flat files (a band-name list and a
//! `name,age,score` CSV), each printing its result to stdout.
//!
//! Run with: cargo run

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use thiserror::Error;

//==============================================================================
// Line streams: lazy, single-pass, scoped to an open file handle
//==============================================================================

/// Lazy stream of lines backed by an open file handle.
///
/// Single-pass: consuming adapters take the stream by value, and the handle
/// closes when the stream drops, on every exit path. A second pass over the
/// same file requires a fresh `open`.
pub struct LineStream {
    lines: io::Lines<BufReader<File>>,
}

impl LineStream {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(LineStream {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for LineStream {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

//==============================================================================
// Errors
//==============================================================================

/// Errors surfaced by the file-backed pipelines. Both variants are fatal:
/// the run aborts on the first one, with no per-line recovery.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("second field '{value}' is not an integer")]
    NotAnInteger { value: String },
}

//==============================================================================
// In-memory pipelines
//==============================================================================

/// Names with the given case-sensitive prefix, sorted ascending.
pub fn with_prefix_sorted(names: &[&str], prefix: char) -> Vec<String> {
    names
        .iter()
        .filter(|name| name.starts_with(prefix))
        .sorted()
        .map(|name| name.to_string())
        .collect()
}

/// Lowercased names keeping the given prefix, in original relative order.
pub fn lowercased_with_prefix(names: &[&str], prefix: char) -> Vec<String> {
    names
        .iter()
        .map(|name| name.to_lowercase())
        .filter(|name| name.starts_with(prefix))
        .collect()
}

/// Arithmetic mean of the squares, or `None` for an empty slice.
pub fn squares_average(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|x| x * x).sum();
    Some(sum as f64 / values.len() as f64)
}

//==============================================================================
// File-backed pipelines
//==============================================================================

/// All lines of the band file, sorted ascending, kept if longer than
/// `cutoff` characters.
pub fn long_band_names(path: &Path, cutoff: usize) -> Result<Vec<String>, PipelineError> {
    let bands: Vec<String> = LineStream::open(path)?.collect::<io::Result<_>>()?;
    Ok(bands
        .into_iter()
        .sorted()
        .filter(|band| band.len() > cutoff)
        .collect())
}

/// Lines of the band file containing `fragment`, in file order.
pub fn bands_containing(path: &Path, fragment: &str) -> Result<Vec<String>, PipelineError> {
    let bands = LineStream::open(path)?
        .filter_ok(|band| band.contains(fragment))
        .collect::<io::Result<Vec<_>>>()?;
    Ok(bands)
}

/// Count of rows that split on `,` into exactly `width` fields.
pub fn well_formed_row_count(path: &Path, width: usize) -> Result<usize, PipelineError> {
    let mut count = 0;
    for line in LineStream::open(path)? {
        if line?.split(',').count() == width {
            count += 1;
        }
    }
    Ok(count)
}

/// Three-field rows whose second field parses as an integer above `cutoff`,
/// as `(name, age, score)` in file order.
///
/// Rows with a different field count are filtered out, not repaired. A
/// non-numeric second field on a three-field row aborts the scan.
pub fn rows_above_age(
    path: &Path,
    cutoff: i64,
) -> Result<Vec<(String, i64, String)>, PipelineError> {
    let mut rows = Vec::new();
    for line in LineStream::open(path)? {
        let line = line?;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            continue;
        }
        let age: i64 = fields[1].parse().map_err(|_| PipelineError::NotAnInteger {
            value: fields[1].to_string(),
        })?;
        if age > cutoff {
            rows.push((fields[0].to_string(), age, fields[2].to_string()));
        }
    }
    Ok(rows)
}

/// Same filters as [`rows_above_age`], collected into a name -> age map.
/// Later rows win on duplicate names; iteration order is not a contract.
pub fn ages_by_name(path: &Path, cutoff: i64) -> Result<HashMap<String, i64>, PipelineError> {
    Ok(rows_above_age(path, cutoff)?
        .into_iter()
        .map(|(name, age, _score)| (name, age))
        .collect())
}

//==============================================================================
// Summary statistics
//==============================================================================

/// One-pass aggregate over an integer sequence: count, sum, min, max, with
/// the average derived from sum and count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntSummary {
    pub count: usize,
    pub sum: i64,
    pub min: i64,
    pub max: i64,
}

impl IntSummary {
    /// Fold the sequence in a single pass; `None` for an empty input.
    pub fn of(values: impl IntoIterator<Item = i64>) -> Option<Self> {
        let mut values = values.into_iter();
        let first = values.next()?;
        let mut summary = IntSummary {
            count: 1,
            sum: first,
            min: first,
            max: first,
        };
        for value in values {
            summary.count += 1;
            summary.sum += value;
            summary.min = summary.min.min(value);
            summary.max = summary.max.max(value);
        }
        Some(summary)
    }

    pub fn average(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

impl fmt::Display for IntSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IntSummary{{count={}, sum={}, min={}, average={:.6}, max={}}}",
            self.count,
            self.sum,
            self.min,
            self.average(),
            self.max
        )
    }
}

//==============================================================================
// The runner: fourteen blocks, fixed order
//==============================================================================

/// Execute all fourteen pipelines in order, printing each result. Any file
/// or parse failure aborts the remaining blocks.
pub fn run(bands: &Path, scores: &Path) -> anyhow::Result<()> {
    // 1. Integer range, printed without separators
    (1..10).for_each(|x| print!("{x}"));
    println!();

    // 2. Same range, skip the first five
    (1..10).skip(5).for_each(|x| println!("{x}"));
    println!();

    // 3. Range sum
    println!("{}", (1..5).sum::<i32>());
    println!();

    // 4. Sort a literal collection, keep the first element
    if let Some(first) = ["Ava", "Aneri", "Alberto"].into_iter().sorted().next() {
        println!("{first}");
    }

    // 5. Filter by prefix, then sort
    let names = [
        "Al", "Ankit", "Kushal", "Brent", "Sarika", "amanda", "Hans", "Shivika", "Sarah",
    ];
    for name in with_prefix_sorted(&names, 'S') {
        println!("{name}");
    }

    // 6. Average of squares
    if let Some(average) = squares_average(&[2, 4, 6, 8, 10]) {
        println!("{average:?}");
    }

    // 7. Lowercase, then filter by prefix, original order kept
    let people = [
        "Al", "Ankit", "Brent", "Sarika", "amanda", "Hans", "Shivika", "Sarah",
    ];
    for person in lowercased_with_prefix(&people, 'a') {
        println!("{person}");
    }

    // 8. Band names longer than 13 chars, sorted
    for band in long_band_names(bands, 13).context("reading the band file")? {
        println!("{band}");
    }

    // 9. Band names containing a fragment, fresh pass over the file
    for band in bands_containing(bands, "jit")? {
        println!("{band}");
    }

    // 10. Count of well-formed score rows
    println!(
        "{}",
        well_formed_row_count(scores, 3).context("reading the score file")?
    );

    // 11. Rows above the age cutoff, space-joined in file order
    for (name, age, score) in rows_above_age(scores, 15)? {
        println!("{name} {age} {score}");
    }

    // 12. Same rows keyed by name; map order is not a contract
    for (name, age) in &ages_by_name(scores, 15)? {
        println!("{name} {age}");
    }

    // 13. Left-fold sum, exact IEEE-754 accumulation
    let total = [7.3, 1.5, 4.8].iter().fold(0.0, |acc, x| acc + x);
    println!("{total:?}");

    // 14. One-pass summary statistics
    if let Some(summary) = IntSummary::of([7, 2, 19, 88, 73, 4, 10]) {
        println!("{summary}");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    run(Path::new("data/bands.txt"), Path::new("data/scores.csv"))
}
