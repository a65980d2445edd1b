//! Transformation module.
//!
//! - Row: one wide CSV row to one nested job record
//! - Pipeline: file-level conversion built on top of it

pub mod pipeline;
pub mod row;

pub use pipeline::*;
pub use row::{qualifying_score, round_score, split_attribute_column, transform_row};
