//! Turn one wide occupation row into a nested [`JobRecord`].
//!
//! ```text
//! Row (wide)                                 JobRecord (nested)
//! ┌──────────────────────────────────┐       ┌──────────────────────────────┐
//! │ Title: CEO                       │       │ title: CEO                   │
//! │ Skills_Math: 4.567               │  →    │ attributes:                  │
//! │ Skills_Writing: 0                │       │   Skills: [Math 4.57]        │
//! │ Knowledge_Biology: 2.1           │       │   Knowledge: [Biology 2.1]   │
//! └──────────────────────────────────┘       └──────────────────────────────┘
//! ```
//!
//! Attribute columns are named `Category_Name`. Only the first underscore
//! splits, so `Abilities_Eye_Hand_Coordination` lands in `Abilities` under
//! `Eye_Hand_Coordination`. Columns without an underscore are not attributes.

use indexmap::IndexMap;

use crate::error::{TransformError, TransformResult};
use crate::models::{
    AttributeEntry, CellValue, JobRecord, Row, Score, DESCRIPTION_COLUMN, ID_COLUMN,
    JOB_ZONE_COLUMN, TITLE_COLUMN,
};

/// Split an attribute column name on its first underscore.
///
/// Returns `None` for columns without an underscore.
pub fn split_attribute_column(column: &str) -> Option<(&str, &str)> {
    column.split_once('_')
}

/// Score of a cell if it qualifies as an attribute entry.
///
/// Qualifying cells are numeric (by tag, not by content), finite and
/// strictly positive. The score keeps the cell's integer or float tag.
pub fn qualifying_score(value: &CellValue) -> Option<Score> {
    let score = match value {
        CellValue::Integer(i) => Score::Integer(*i),
        CellValue::Float(f) => Score::Float(*f),
        CellValue::Text(_) | CellValue::Null => return None,
    };
    let number = score.value();
    (number.is_finite() && number > 0.0).then_some(score)
}

/// Round to two decimals, ties to even on the exact binary value.
///
/// `4.567` becomes `4.57`; `2.675` (stored as 2.67499…) becomes `2.67`.
pub fn round_score(score: f64) -> f64 {
    // Precision formatting rounds the exact decimal expansion of the float.
    format!("{:.2}", score).parse().unwrap_or(score)
}

/// Integers are already whole; only floats are rounded.
fn round_entry_score(score: Score) -> Score {
    match score {
        Score::Float(f) => Score::Float(round_score(f)),
        integer => integer,
    }
}

/// Build a [`JobRecord`] from one row.
///
/// Fails only when one of the four fixed columns is absent; anything odd in
/// an attribute column is skipped silently.
pub fn transform_row(row: &Row) -> TransformResult<JobRecord> {
    let mut attributes: IndexMap<String, Vec<AttributeEntry>> = IndexMap::new();

    for (column, value) in row {
        let Some((category, name)) = split_attribute_column(column) else {
            continue;
        };

        // Claim the category's slot on first sight, even if this value is skipped.
        let entries = attributes.entry(category.to_string()).or_default();

        let Some(score) = qualifying_score(value).map(round_entry_score) else {
            continue;
        };
        // Scores below 0.005 round to zero and would break positivity.
        if score.value() <= 0.0 {
            continue;
        }

        entries.push(AttributeEntry {
            name: name.to_string(),
            score,
        });
    }

    attributes.retain(|_, entries| !entries.is_empty());

    // Vec::sort_by is stable: equal scores keep column order.
    for entries in attributes.values_mut() {
        entries.sort_by(|a, b| b.score.value().total_cmp(&a.score.value()));
    }

    Ok(JobRecord {
        id: fixed_field(row, ID_COLUMN)?,
        title: fixed_field(row, TITLE_COLUMN)?,
        description: fixed_field(row, DESCRIPTION_COLUMN)?,
        job_zone: fixed_field(row, JOB_ZONE_COLUMN)?,
        attributes,
    })
}

fn fixed_field(row: &Row, column: &str) -> TransformResult<CellValue> {
    row.get(column)
        .cloned()
        .ok_or_else(|| TransformError::MissingColumn(column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_row() -> Row {
        let mut row = Row::new();
        row.insert(ID_COLUMN.into(), "11-1011.00".into());
        row.insert(TITLE_COLUMN.into(), "CEO".into());
        row.insert(DESCRIPTION_COLUMN.into(), "Leads".into());
        row.insert(JOB_ZONE_COLUMN.into(), CellValue::Integer(5));
        row
    }

    fn with(mut row: Row, column: &str, value: CellValue) -> Row {
        row.insert(column.into(), value);
        row
    }

    #[test]
    fn test_groups_filters_and_rounds() {
        let row = with(base_row(), "Skills_Math", CellValue::Float(4.567));
        let row = with(row, "Skills_Writing", CellValue::Float(0.0));
        let row = with(row, "Knowledge_Biology", CellValue::Float(2.1));

        let record = transform_row(&row).unwrap();

        assert_eq!(
            serde_json::to_value(&record.attributes).unwrap(),
            json!({
                "Skills": [{ "name": "Math", "score": 4.57 }],
                "Knowledge": [{ "name": "Biology", "score": 2.1 }]
            })
        );
        assert_eq!(record.id, CellValue::from("11-1011.00"));
        assert_eq!(record.job_zone, CellValue::Integer(5));
    }

    #[test]
    fn test_column_without_underscore_ignored() {
        let row = with(base_row(), "Tools", CellValue::Float(3.0));
        let record = transform_row(&row).unwrap();

        assert!(record.attributes.is_empty());
    }

    #[test]
    fn test_splits_on_first_underscore_only() {
        let row = with(base_row(), "Abilities_Eye_Hand_Coordination", CellValue::Float(3.25));
        let record = transform_row(&row).unwrap();

        let abilities = &record.attributes["Abilities"];
        assert_eq!(abilities[0].name, "Eye_Hand_Coordination");
        assert_eq!(split_attribute_column("Tools"), None);
        assert_eq!(split_attribute_column("_x"), Some(("", "x")));
    }

    #[test]
    fn test_equal_scores_keep_column_order() {
        let row = with(base_row(), "Skills_A", CellValue::Float(3.0));
        let row = with(row, "Skills_B", CellValue::Float(3.0));

        let record = transform_row(&row).unwrap();

        assert_eq!(
            serde_json::to_string(&record.attributes["Skills"]).unwrap(),
            r#"[{"name":"A","score":3.0},{"name":"B","score":3.0}]"#
        );
    }

    #[test]
    fn test_sorted_descending() {
        let row = with(base_row(), "Skills_Low", CellValue::Float(1.5));
        let row = with(row, "Skills_High", CellValue::Float(4.0));
        let row = with(row, "Skills_Mid", CellValue::Integer(3));

        let record = transform_row(&row).unwrap();
        let names: Vec<&str> = record.attributes["Skills"]
            .iter()
            .map(|e| e.name.as_str())
            .collect();

        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_non_qualifying_values_skipped() {
        let row = with(base_row(), "Skills_Text", CellValue::from("4.5"));
        let row = with(row, "Skills_Null", CellValue::Null);
        let row = with(row, "Skills_Negative", CellValue::Float(-1.0));
        let row = with(row, "Skills_Zero", CellValue::Integer(0));
        let row = with(row, "Skills_Inf", CellValue::Float(f64::INFINITY));
        let row = with(row, "Skills_NaN", CellValue::Float(f64::NAN));

        let record = transform_row(&row).unwrap();

        assert!(!record.attributes.contains_key("Skills"));
        assert_eq!(record.entry_count(), 0);
    }

    #[test]
    fn test_category_order_is_first_encounter() {
        let row = with(base_row(), "Knowledge_Law", CellValue::Float(0.0));
        let row = with(row, "Skills_Math", CellValue::Float(2.0));
        let row = with(row, "Knowledge_Biology", CellValue::Float(1.0));

        let record = transform_row(&row).unwrap();
        let categories: Vec<&str> = record.attributes.keys().map(String::as_str).collect();

        assert_eq!(categories, vec!["Knowledge", "Skills"]);
    }

    #[test]
    fn test_missing_fixed_column_fails() {
        let mut row = base_row();
        row.shift_remove(TITLE_COLUMN);

        let err = transform_row(&row).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn(ref c) if c == "Title"));
    }

    #[test]
    fn test_null_fixed_field_copied() {
        let row = with(base_row(), JOB_ZONE_COLUMN, CellValue::Null);
        let record = transform_row(&row).unwrap();

        assert!(record.job_zone.is_null());
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(4.567), 4.57);
        assert_eq!(round_score(2.1), 2.1);
        assert_eq!(round_score(2.675), 2.67);
        assert_eq!(round_score(1.005), 1.0);
        assert_eq!(round_score(3.0), 3.0);
        assert_eq!(round_score(0.004), 0.0);
    }

    #[test]
    fn test_score_rounding_to_zero_dropped() {
        let row = with(base_row(), "Skills_Tiny", CellValue::Float(0.001));
        let row = with(row, "Skills_Small", CellValue::Float(0.005001));

        let record = transform_row(&row).unwrap();

        assert_eq!(record.attributes["Skills"].len(), 1);
        assert_eq!(record.attributes["Skills"][0].name, "Small");
        assert_eq!(record.attributes["Skills"][0].score, Score::Float(0.01));
    }

    #[test]
    fn test_integer_scores_stay_integers() {
        let row = with(base_row(), "Skills_A", CellValue::Float(3.0));
        let row = with(row, "Skills_B", CellValue::Integer(3));
        let row = with(row, "Skills_C", CellValue::Integer(4));

        let record = transform_row(&row).unwrap();

        assert_eq!(
            serde_json::to_string(&record.attributes["Skills"]).unwrap(),
            r#"[{"name":"C","score":4},{"name":"A","score":3.0},{"name":"B","score":3}]"#
        );
    }
}
