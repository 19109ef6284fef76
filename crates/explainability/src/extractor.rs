//! Importance Extraction and Name Recovery

use inference_engine::{RegressorArtifact, Signal};
use preprocessor::ColumnEncoder;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use tracing::warn;

/// Entries returned by the API report.
pub const DEFAULT_TOP: usize = 10;
/// Entries returned by the full offline report.
pub const FULL_REPORT_TOP: usize = 15;

/// One ranked feature with its absolute importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceRecord {
    pub feature: String,
    pub importance: f64,
}

/// Rank encoded features by the model's importance signal.
///
/// Expanded column names are paired with the signal by positional index and
/// humanized. Importance is the absolute value of the raw signal, sorted
/// descending with ties keeping encoder column order, truncated to `limit`.
/// A model without a signal, or a name/signal count mismatch, yields an
/// empty report.
pub fn extract_importance(
    model: &RegressorArtifact,
    encoder: &ColumnEncoder,
    limit: usize,
) -> Vec<ImportanceRecord> {
    let signal = match model.importance_signal() {
        Signal::Linear(values) | Signal::Impurity(values) => values,
        Signal::Unsupported => {
            warn!("model exposes no importance signal");
            return Vec::new();
        }
    };

    let names = encoder.feature_names();
    if names.len() != signal.len() {
        warn!(
            names = names.len(),
            signal = signal.len(),
            "feature name count does not match signal length"
        );
        return Vec::new();
    }

    let mut records: Vec<ImportanceRecord> = names
        .iter()
        .zip(signal)
        .map(|(name, value)| ImportanceRecord {
            feature: humanize(name),
            importance: value.abs(),
        })
        .collect();

    // Stable sort keeps encoder column order on ties.
    records.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(Ordering::Equal)
    });
    records.truncate(limit);
    records
}

/// Load both artifacts and extract the top [`DEFAULT_TOP`] features.
///
/// Missing or corrupt artifacts yield an empty report rather than an error.
pub fn extract_from_artifacts(
    model_path: impl AsRef<Path>,
    encoder_path: impl AsRef<Path>,
) -> Vec<ImportanceRecord> {
    let model = match RegressorArtifact::load(model_path.as_ref()) {
        Ok(model) => model,
        Err(e) => {
            warn!(error = %e, "skipping importance report, model artifact unavailable");
            return Vec::new();
        }
    };
    let encoder = match ColumnEncoder::load(encoder_path.as_ref()) {
        Ok(encoder) => encoder,
        Err(e) => {
            warn!(error = %e, "skipping importance report, encoder artifact unavailable");
            return Vec::new();
        }
    };
    extract_importance(&model, &encoder, DEFAULT_TOP)
}

/// Turn an expanded column name into a display label: strip transformer
/// block prefixes, split on underscores, title-case each word.
fn humanize(name: &str) -> String {
    let stripped = name
        .trim_start_matches("num__")
        .trim_start_matches("cat__");
    stripped
        .split('_')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
