//! Column Encoding and Scaling
//!
//! Fitted transform mapping tabular records to fixed-length numeric vectors:
//! standardization for numeric columns, one-hot expansion for categorical
//! columns, with a column ordering fixed at fit time.

mod encoder;
mod schema;

pub use encoder::{ColumnEncoder, NumericStats};
pub use schema::{ColumnKind, ColumnSchema, ColumnSpec};

use thiserror::Error;

/// Errors while encoding a record or handling the encoder artifact
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A schema-required column is absent from the input record.
    #[error("required {kind} column '{column}' missing from input")]
    MissingColumn { column: String, kind: &'static str },

    /// A column is present but holds the wrong kind of value.
    #[error("column '{column}' has the wrong type, expected {expected}")]
    WrongType {
        column: String,
        expected: &'static str,
    },

    /// The encoder artifact is missing, unreadable, or inconsistent.
    #[error("encoder artifact error: {0}")]
    Artifact(String),
}
