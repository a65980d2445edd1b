//! End-to-end conversion: CSV file in, nested JSON file out.
//!
//! # Example
//!
//! ```rust,no_run
//! use career_compass::{convert_file, ConvertOptions};
//!
//! let summary = convert_file(&ConvertOptions::new("occupations.csv", "career_compass_data.json"))?;
//! println!("Wrote {} records", summary.records);
//! # Ok::<(), career_compass::PipelineError>(())
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::row::{split_attribute_column, transform_row};
use crate::error::{PipelineResult, TransformError, TransformResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{JobRecord, Row, FIXED_COLUMNS};
use crate::output::write_records;
use crate::parser::{parse_csv_file, ParsedTable, DEFAULT_DELIMITER};

/// Options for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// CSV file to read.
    pub input: PathBuf,
    /// JSON file to write.
    pub output: PathBuf,
    /// Field delimiter.
    pub delimiter: char,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Rows read from the CSV.
    pub rows: usize,
    /// Records written (one per row).
    pub records: usize,
    /// Attribute entries across all records.
    pub attribute_entries: usize,
    /// Distinct categories across all records.
    pub categories: usize,
    /// Detected input encoding.
    pub encoding: String,
    /// Bytes written.
    pub bytes: usize,
    /// Where the JSON was saved.
    pub output: PathBuf,
}

/// Fail unless every fixed column is in the header.
pub fn check_required_columns(headers: &[String]) -> TransformResult<()> {
    match FIXED_COLUMNS
        .iter()
        .find(|required| !headers.iter().any(|h| h == *required))
    {
        Some(missing) => Err(TransformError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

/// Transform rows in order. Row numbers in errors are 1-based data rows.
pub fn transform_rows(rows: &[Row]) -> TransformResult<Vec<JobRecord>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            transform_row(row).map_err(|e| match e {
                TransformError::MissingColumn(column) => TransformError::MissingField { row: i + 1, column },
                other => other,
            })
        })
        .collect()
}

/// Check the header, then transform every row.
pub fn transform_table(table: &ParsedTable) -> TransformResult<Vec<JobRecord>> {
    check_required_columns(&table.headers)?;
    transform_rows(&table.rows)
}

/// Headers that are neither fixed nor `Category_Name` attributes.
pub fn ignored_columns(headers: &[String]) -> Vec<&str> {
    headers
        .iter()
        .map(String::as_str)
        .filter(|h| !FIXED_COLUMNS.contains(h) && split_attribute_column(h).is_none())
        .collect()
}

/// Read, transform and write. Nothing is written unless reading and
/// transforming both succeed.
pub fn convert_file(options: &ConvertOptions) -> PipelineResult<ConversionSummary> {
    log_info(format!("Reading {}...", display_name(&options.input)));
    let table = parse_csv_file(&options.input, options.delimiter)?;
    log_success(format!(
        "Read {} rows, {} columns ({})",
        table.rows.len(),
        table.headers.len(),
        table.encoding
    ));

    let ignored = ignored_columns(&table.headers);
    if !ignored.is_empty() {
        log_warning(format!(
            "{} column(s) without a category prefix ignored: {}",
            ignored.len(),
            ignored.join(", ")
        ));
    }

    log_info("Converting to JSON structure...");
    let records = transform_table(&table)?;

    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for category in records.iter().flat_map(|r| r.attributes.keys()) {
        if seen.insert(category.as_str()) {
            categories.push(category.as_str());
        }
    }
    let attribute_entries: usize = records.iter().map(JobRecord::entry_count).sum();

    log_success(format!(
        "{} records, {} attribute entries in {} categories",
        records.len(),
        attribute_entries,
        categories.len()
    ));
    for category in &categories {
        log_info_indent(*category, 1);
    }

    log_info(format!("Saving to {}...", display_name(&options.output)));
    let bytes = write_records(&options.output, &records)?;
    log_success(format!("Success! Saved to: {}", options.output.display()));

    Ok(ConversionSummary {
        rows: table.rows.len(),
        records: records.len(),
        attribute_entries,
        categories: categories.len(),
        encoding: table.encoding,
        bytes,
        output: options.output.clone(),
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
