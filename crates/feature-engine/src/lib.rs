//! Feature Engineering
//!
//! Record types and the stateless derived-feature transform applied before
//! column encoding.

mod engineer;
mod record;

pub use engineer::{FeatureEngineer, ID_COLUMN, STUDY_EFFICIENCY};
pub use record::{FieldValue, Record};
