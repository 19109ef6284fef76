//! Derived Feature Computation

use crate::record::Record;
use tracing::debug;

/// Identifier column dropped before encoding.
pub const ID_COLUMN: &str = "student_id";
/// Name of the derived efficiency feature.
pub const STUDY_EFFICIENCY: &str = "study_efficiency";
/// Offset keeping the efficiency ratio finite when sleep hours are zero.
const SLEEP_OFFSET: f64 = 0.1;

/// Stateless derived-feature transform.
///
/// Applied to every record before encoding, at fit time and at inference
/// time. Holds no fitted state: the same input always yields the same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Create a new feature engineer.
    pub fn new() -> Self {
        Self
    }

    /// Apply feature engineering to a single record.
    ///
    /// Adds `study_efficiency = study_hours / (sleep_hours + 0.1)` when both
    /// source fields are present; a missing source simply leaves the derived
    /// field absent. The identifier column is dropped if present.
    pub fn transform(&self, mut record: Record) -> Record {
        if let (Some(study), Some(sleep)) = (
            record.numeric("study_hours"),
            record.numeric("sleep_hours"),
        ) {
            record.insert(STUDY_EFFICIENCY, study / (sleep + SLEEP_OFFSET));
        }

        if record.remove(ID_COLUMN).is_some() {
            debug!("dropped identifier column '{}'", ID_COLUMN);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_study_efficiency_added() {
        let record = Record::new()
            .with("study_hours", 6.0)
            .with("sleep_hours", 7.5);

        let out = FeatureEngineer::new().transform(record);
        let efficiency = out.numeric(STUDY_EFFICIENCY).unwrap();
        assert!((efficiency - 6.0 / 7.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sleep_stays_finite() {
        let record = Record::new()
            .with("study_hours", 5.0)
            .with("sleep_hours", 0.0);

        let out = FeatureEngineer::new().transform(record);
        assert_eq!(out.numeric(STUDY_EFFICIENCY), Some(50.0));
    }

    #[test]
    fn test_missing_source_skips_derived_feature() {
        let record = Record::new().with("study_hours", 5.0);

        let out = FeatureEngineer::new().transform(record);
        assert!(!out.contains(STUDY_EFFICIENCY));
    }

    #[test]
    fn test_identifier_dropped() {
        let record = Record::new()
            .with(ID_COLUMN, "S-042")
            .with("age", 21.0);

        let out = FeatureEngineer::new().transform(record);
        assert!(!out.contains(ID_COLUMN));
        assert_eq!(out.numeric("age"), Some(21.0));
    }

    #[test]
    fn test_transform_is_pure() {
        let record = Record::new()
            .with("study_hours", 4.0)
            .with("sleep_hours", 6.0);

        let engineer = FeatureEngineer::new();
        assert_eq!(
            engineer.transform(record.clone()),
            engineer.transform(record)
        );
    }

    proptest! {
        #[test]
        fn prop_efficiency_always_finite(
            study in 0.0_f64..=24.0,
            sleep in 0.0_f64..=24.0,
        ) {
            let record = Record::new()
                .with("study_hours", study)
                .with("sleep_hours", sleep);

            let out = FeatureEngineer::new().transform(record);
            let efficiency = out.numeric(STUDY_EFFICIENCY).unwrap();
            prop_assert!(efficiency.is_finite());
            prop_assert!(efficiency >= 0.0);
        }
    }
}
