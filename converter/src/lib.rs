//! # Career Compass - occupation table to nested JSON
//!
//! Converts a wide occupation table (one row per occupation, one column per
//! scored attribute such as `Skills_Mathematics`) into a JSON array where
//! each occupation carries its attributes grouped by category and ranked by
//! score.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│  JSON File  │
//! │  (ISO/UTF8) │     │ (typed cols)│     │ (group/rank)│     │  (atomic)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use career_compass::{convert_file, ConvertOptions};
//!
//! let summary = convert_file(&ConvertOptions::new("merged.csv", "career_compass_data.json")).unwrap();
//! println!("Converted {} occupations", summary.records);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Cell values, rows and job records
//! - [`parser`] - CSV reading with encoding detection and column typing
//! - [`transform`] - Row transform and file pipeline
//! - [`output`] - JSON rendering and atomic writes
//! - [`prompt`] - Input/output path selection
//! - [`logs`] - Console logging

// Core modules
pub mod error;
pub mod models;

// Reading
pub mod parser;

// Transformation
pub mod transform;

// Writing
pub mod output;

// Shell
pub mod logs;
pub mod prompt;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError, OutputError, PipelineError, Selection, SelectionError, TransformError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{AttributeEntry, CellValue, JobRecord, Row, Score, FIXED_COLUMNS};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{parse_bytes, parse_csv_file, parse_str, ParsedTable, DEFAULT_DELIMITER};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    check_required_columns, convert_file, transform_row, transform_rows, transform_table,
    ConversionSummary, ConvertOptions,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use output::{render_json, write_atomic, write_records, DEFAULT_OUTPUT_FILE};
