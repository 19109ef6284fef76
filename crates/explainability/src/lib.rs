//! Feature Importance Extraction
//!
//! Best-effort recovery of a ranked, human-readable feature influence report
//! from fitted artifacts. Every failure mode in this crate degrades to an
//! empty report; the reporting endpoint stays available regardless of model
//! or artifact state.

mod extractor;

pub use extractor::{
    extract_from_artifacts, extract_importance, ImportanceRecord, DEFAULT_TOP, FULL_REPORT_TOP,
};
