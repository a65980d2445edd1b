//! Domain models for the Career Compass conversion pipeline.
//!
//! - [`CellValue`] - Typed cell produced by the CSV reader
//! - [`Row`] - One input row, columns in header order
//! - [`AttributeEntry`] - One scored attribute (`Skills_Mathematics` → `Mathematics`)
//! - [`Score`] - Integer or float score, as typed by the reader
//! - [`JobRecord`] - One occupation with its attributes grouped by category

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Fixed Columns
// =============================================================================

/// Occupation code column, copied to `id`.
pub const ID_COLUMN: &str = "O*NET-SOC Code";
/// Occupation title column, copied to `title`.
pub const TITLE_COLUMN: &str = "Title";
/// Occupation description column, copied to `description`.
pub const DESCRIPTION_COLUMN: &str = "Description";
/// Job Zone column, copied to `job_zone`.
pub const JOB_ZONE_COLUMN: &str = "Job Zone";

/// Columns every input table must carry, in output order.
pub const FIXED_COLUMNS: [&str; 4] = [ID_COLUMN, TITLE_COLUMN, DESCRIPTION_COLUMN, JOB_ZONE_COLUMN];

// =============================================================================
// Cell Values
// =============================================================================

/// A single cell, tagged with the type the reader inferred for its column.
///
/// Serialized untagged, so `Integer(5)` becomes `5`, `Text("x")` becomes
/// `"x"` and `Null` becomes `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Cell from a column where every value is an integer.
    Integer(i64),
    /// Cell from a numeric column with decimals or gaps.
    Float(f64),
    /// Cell from a column with at least one non-numeric value.
    Text(String),
    /// Empty cell.
    Null,
}

impl CellValue {
    /// Numeric value of the cell, if its tag is numeric.
    ///
    /// Text is never numeric, even when it looks like a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(_) | CellValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// One input row. Iteration order is the header order.
pub type Row = IndexMap<String, CellValue>;

// =============================================================================
// Output Records
// =============================================================================

/// An attribute score, keeping the numeric type of its column.
///
/// Integer columns stay integers (`3`), float columns stay floats (`3.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Integer(i64),
    Float(f64),
}

impl Score {
    /// Value used for ordering and positivity checks.
    pub fn value(self) -> f64 {
        match self {
            Score::Integer(i) => i as f64,
            Score::Float(f) => f,
        }
    }
}

impl From<i64> for Score {
    fn from(i: i64) -> Self {
        Score::Integer(i)
    }
}

impl From<f64> for Score {
    fn from(f: f64) -> Self {
        Score::Float(f)
    }
}

/// A scored attribute inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeEntry {
    /// Column name after the first underscore.
    pub name: String,
    /// Score, floats rounded to two decimals, always > 0.
    pub score: Score,
}

/// One occupation, as written to the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: CellValue,
    pub title: CellValue,
    pub description: CellValue,
    pub job_zone: CellValue,
    /// Category → entries sorted by descending score.
    ///
    /// Categories keep the order their first column appeared in. A category
    /// is only present when it has at least one entry.
    pub attributes: IndexMap<String, Vec<AttributeEntry>>,
}

impl JobRecord {
    /// Total number of attribute entries across all categories.
    pub fn entry_count(&self) -> usize {
        self.attributes.values().map(Vec::len).sum()
    }
}
