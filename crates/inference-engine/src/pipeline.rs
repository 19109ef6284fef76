//! Pipeline Composition and Artifact Loading

use crate::model::RegressorArtifact;
use crate::PipelineError;
use feature_engine::{FeatureEngineer, Record};
use preprocessor::ColumnEncoder;
use std::path::Path;
use tracing::{debug, info};

/// Encoder artifact file name inside the model directory.
pub const ENCODER_ARTIFACT: &str = "encoder.json";
/// Model artifact file name inside the model directory.
pub const MODEL_ARTIFACT: &str = "model.json";

/// Fitted prediction pipeline: feature engineering, encoding, regression.
///
/// Immutable after construction, so a single instance can be shared across
/// concurrent requests without synchronization.
#[derive(Debug)]
pub struct PredictPipeline {
    engineer: FeatureEngineer,
    encoder: ColumnEncoder,
    model: RegressorArtifact,
}

impl PredictPipeline {
    /// Load both artifacts from a model directory.
    pub fn load(model_dir: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let dir = model_dir.as_ref();
        let encoder = ColumnEncoder::load(dir.join(ENCODER_ARTIFACT))
            .map_err(|e| PipelineError::ArtifactLoad(e.to_string()))?;
        let model = RegressorArtifact::load(dir.join(MODEL_ARTIFACT))?;
        info!(dir = %dir.display(), "loaded prediction artifacts");
        Self::from_parts(encoder, model)
    }

    /// Build a pipeline from already-loaded artifacts, checking that the
    /// encoder output and the model input agree on width.
    pub fn from_parts(
        encoder: ColumnEncoder,
        model: RegressorArtifact,
    ) -> Result<Self, PipelineError> {
        if let Some(expected) = model.input_dimension() {
            let actual = encoder.output_dimension();
            if expected != actual {
                return Err(PipelineError::DimensionMismatch { expected, actual });
            }
        }
        Ok(Self {
            engineer: FeatureEngineer::new(),
            encoder,
            model,
        })
    }

    /// Predict an exam score for one raw record, rounded to 2 decimals.
    pub fn predict(&self, record: &Record) -> Result<f64, PipelineError> {
        let engineered = self.engineer.transform(record.clone());
        let encoded = self.encoder.transform(&engineered)?;
        let score = (self.model.predict(&encoded) * 100.0).round() / 100.0;
        debug!(score, "prediction complete");
        Ok(score)
    }

    /// Fitted encoder backing this pipeline.
    pub fn encoder(&self) -> &ColumnEncoder {
        &self.encoder
    }

    /// Fitted model backing this pipeline.
    pub fn model(&self) -> &RegressorArtifact {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preprocessor::ColumnSchema;

    fn fitted_encoder() -> ColumnEncoder {
        let schema = ColumnSchema::new()
            .numeric("study_hours")
            .numeric("sleep_hours")
            .numeric("study_efficiency")
            .categorical("internet_access");
        let records = vec![
            Record::new()
                .with("study_hours", 2.0)
                .with("sleep_hours", 6.0)
                .with("study_efficiency", 2.0 / 6.1)
                .with("internet_access", "yes"),
            Record::new()
                .with("study_hours", 8.0)
                .with("sleep_hours", 8.0)
                .with("study_efficiency", 8.0 / 8.1)
                .with("internet_access", "no"),
        ];
        ColumnEncoder::fit(schema, &records).unwrap()
    }

    fn sample_record() -> Record {
        Record::new()
            .with("study_hours", 5.0)
            .with("sleep_hours", 7.0)
            .with("internet_access", "yes")
    }

    #[test]
    fn test_predict_composes_engineer_and_encoder() {
        let encoder = fitted_encoder();
        // Coefficient only on the one-hot "yes" column so the expected score
        // is easy to state.
        let model = RegressorArtifact::Linear {
            coefficients: vec![0.0, 0.0, 0.0, 30.0, 0.0],
            intercept: 40.0,
        };
        let pipeline = PredictPipeline::from_parts(encoder, model).unwrap();

        let score = pipeline.predict(&sample_record()).unwrap();
        assert_eq!(score, 70.0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = RegressorArtifact::Linear {
            coefficients: vec![3.1, -1.2, 0.7, 5.0, -5.0],
            intercept: 55.5,
        };
        let pipeline = PredictPipeline::from_parts(fitted_encoder(), model).unwrap();

        let first = pipeline.predict(&sample_record()).unwrap();
        let second = pipeline.predict(&sample_record()).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_prediction_rounded_to_two_decimals() {
        let pipeline = PredictPipeline::from_parts(
            fitted_encoder(),
            RegressorArtifact::Baseline { mean: 66.666_666 },
        )
        .unwrap();

        let score = pipeline.predict(&sample_record()).unwrap();
        assert_eq!(score, 66.67);
    }

    #[test]
    fn test_zero_sleep_hours_yields_finite_score() {
        let model = RegressorArtifact::Linear {
            coefficients: vec![1.0, 1.0, 1.0, 1.0, 1.0],
            intercept: 50.0,
        };
        let pipeline = PredictPipeline::from_parts(fitted_encoder(), model).unwrap();

        let record = Record::new()
            .with("study_hours", 5.0)
            .with("sleep_hours", 0.0)
            .with("internet_access", "yes");
        let score = pipeline.predict(&record).unwrap();
        assert!(score.is_finite());
    }

    #[test]
    fn test_dimension_mismatch_rejected_at_construction() {
        let model = RegressorArtifact::Linear {
            coefficients: vec![1.0, 2.0],
            intercept: 0.0,
        };
        let result = PredictPipeline::from_parts(fitted_encoder(), model);
        assert!(matches!(
            result,
            Err(PipelineError::DimensionMismatch {
                expected: 2,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_missing_required_column_surfaces_as_error() {
        let pipeline = PredictPipeline::from_parts(
            fitted_encoder(),
            RegressorArtifact::Baseline { mean: 60.0 },
        )
        .unwrap();

        let record = Record::new().with("study_hours", 5.0);
        assert!(matches!(
            pipeline.predict(&record),
            Err(PipelineError::Encode(_))
        ));
    }

    #[test]
    fn test_load_from_model_directory() {
        let dir = std::env::temp_dir().join(format!("pipeline-load-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        fitted_encoder().save(dir.join(ENCODER_ARTIFACT)).unwrap();
        RegressorArtifact::Baseline { mean: 72.0 }
            .save(dir.join(MODEL_ARTIFACT))
            .unwrap();

        let pipeline = PredictPipeline::load(&dir).unwrap();
        let score = pipeline.predict(&sample_record()).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(score, 72.0);
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let result = PredictPipeline::load("/nonexistent/models");
        assert!(matches!(result, Err(PipelineError::ArtifactLoad(_))));
    }
}
