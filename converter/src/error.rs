//! Error types for the Career Compass conversion pipeline.
//!
//! - [`CsvError`] - reading and decoding the input table
//! - [`TransformError`] - turning rows into job records
//! - [`OutputError`] - serializing and writing the JSON document
//! - [`SelectionError`] - choosing input and output paths
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the input table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content could not be decoded.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Malformed CSV record.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Delimiter is not a single byte.
    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(char),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,
}

impl CsvError {
    /// Wrap a `csv` crate error, keeping the line it was raised on.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
                format!("expected at most {} fields, found {}", expected_len, len)
            }
            _ => err.to_string(),
        };
        CsvError::Parse { line, message }
    }
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while building job records.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A fixed column is absent from the header or the row.
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    /// A fixed column is absent from one specific row.
    #[error("Row {row}: missing required column '{column}'")]
    MissingField { row: usize, column: String },
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while producing the output document.
#[derive(Debug, Error)]
pub enum OutputError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the temporary file failed.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving the finished file into place failed.
    #[error("Failed to save '{}': {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Selection Errors
// =============================================================================

/// Which path the operator was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Input,
    Output,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Input => write!(f, "input"),
            Selection::Output => write!(f, "output"),
        }
    }
}

/// Errors while resolving input and output paths.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The operator gave no path.
    #[error("No {0} file selected")]
    Cancelled(Selection),

    /// The terminal prompt itself failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::convert_file`]
/// and by the CLI's path selection.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("Error reading CSV: {0}")]
    Csv(#[from] CsvError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Output error.
    #[error("Error saving JSON: {0}")]
    Output(#[from] OutputError),

    /// Path selection error.
    #[error("{0}")]
    Selection(#[from] SelectionError),
}

impl PipelineError {
    /// Cancelled selections end the run without being failures.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PipelineError::Selection(SelectionError::Cancelled(_)))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
