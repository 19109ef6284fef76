//! Fitted Encoder/Scaler

use crate::schema::{ColumnKind, ColumnSchema};
use crate::EncodeError;
use feature_engine::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Fitted mean and standard deviation for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Fitted column encoder/scaler.
///
/// Immutable once fitted or loaded; the schema, per-column statistics, and
/// category orderings are exactly those observed at fit time. Output column
/// ordering is numeric block first (schema order), then one categorical
/// one-hot block per column (schema order, categories in fit order), then
/// passthrough columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnEncoder {
    schema: ColumnSchema,
    numeric_stats: BTreeMap<String, NumericStats>,
    categories: BTreeMap<String, Vec<String>>,
}

impl ColumnEncoder {
    /// Fit statistics and category orderings from training records.
    ///
    /// Numeric columns get population mean and standard deviation over the
    /// records that carry them; categorical columns get lower-cased
    /// categories in first-seen order. A column no record carries cannot be
    /// fitted and is an error.
    pub fn fit(schema: ColumnSchema, records: &[Record]) -> Result<Self, EncodeError> {
        let mut numeric_stats = BTreeMap::new();
        let mut categories = BTreeMap::new();

        for col in schema.of_kind(ColumnKind::Numeric) {
            let values: Vec<f64> = records.iter().filter_map(|r| r.numeric(&col.name)).collect();
            if values.is_empty() {
                return Err(EncodeError::MissingColumn {
                    column: col.name.clone(),
                    kind: "numeric",
                });
            }
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
            numeric_stats.insert(
                col.name.clone(),
                NumericStats {
                    mean,
                    std_dev: variance.sqrt(),
                },
            );
        }

        for col in schema.of_kind(ColumnKind::Categorical) {
            let mut seen: Vec<String> = Vec::new();
            for record in records {
                if let Some(value) = record.text(&col.name) {
                    let value = value.to_lowercase();
                    if !seen.contains(&value) {
                        seen.push(value);
                    }
                }
            }
            if seen.is_empty() {
                return Err(EncodeError::MissingColumn {
                    column: col.name.clone(),
                    kind: "categorical",
                });
            }
            categories.insert(col.name.clone(), seen);
        }

        info!(
            columns = schema.len(),
            records = records.len(),
            "fitted column encoder"
        );

        Ok(Self {
            schema,
            numeric_stats,
            categories,
        })
    }

    /// Encode one record into a fixed-length numeric vector.
    ///
    /// Numeric values are standardized as `(value - mean) / std_dev`; a
    /// zero fitted standard deviation encodes to 0.0. A categorical value
    /// outside the fit-time categories encodes to an all-zero block rather
    /// than failing. A schema-required numeric or categorical column absent
    /// from the record is a [`EncodeError::MissingColumn`].
    pub fn transform(&self, record: &Record) -> Result<Vec<f64>, EncodeError> {
        let mut out = Vec::with_capacity(self.output_dimension());

        for col in self.schema.of_kind(ColumnKind::Numeric) {
            let value = record
                .get(&col.name)
                .ok_or_else(|| EncodeError::MissingColumn {
                    column: col.name.clone(),
                    kind: "numeric",
                })?
                .as_numeric()
                .ok_or_else(|| EncodeError::WrongType {
                    column: col.name.clone(),
                    expected: "numeric",
                })?;
            let stats = self.numeric_stats.get(&col.name).ok_or_else(|| {
                EncodeError::Artifact(format!("no fitted statistics for column '{}'", col.name))
            })?;
            if stats.std_dev == 0.0 {
                out.push(0.0);
            } else {
                out.push((value - stats.mean) / stats.std_dev);
            }
        }

        for col in self.schema.of_kind(ColumnKind::Categorical) {
            let known = self.categories.get(&col.name).ok_or_else(|| {
                EncodeError::Artifact(format!("no fitted categories for column '{}'", col.name))
            })?;
            let value = record
                .get(&col.name)
                .ok_or_else(|| EncodeError::MissingColumn {
                    column: col.name.clone(),
                    kind: "categorical",
                })?
                .as_text()
                .ok_or_else(|| EncodeError::WrongType {
                    column: col.name.clone(),
                    expected: "text",
                })?
                .to_lowercase();

            let hit = known.iter().position(|c| *c == value);
            if hit.is_none() {
                debug!(
                    column = %col.name,
                    value = %value,
                    "unknown category, emitting zero block"
                );
            }
            for index in 0..known.len() {
                out.push(if hit == Some(index) { 1.0 } else { 0.0 });
            }
        }

        for col in self.schema.of_kind(ColumnKind::Passthrough) {
            // Passthrough columns are optional; absent encodes as 0.0 so the
            // output length stays fixed.
            out.push(record.numeric(&col.name).unwrap_or(0.0));
        }

        Ok(out)
    }

    /// Expanded output column names, in the exact order [`transform`] emits
    /// values: numeric names unchanged, then `<column>_<category>` per
    /// categorical column, then passthrough names.
    ///
    /// [`transform`]: ColumnEncoder::transform
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.output_dimension());
        for col in self.schema.of_kind(ColumnKind::Numeric) {
            names.push(col.name.clone());
        }
        for col in self.schema.of_kind(ColumnKind::Categorical) {
            if let Some(known) = self.categories.get(&col.name) {
                for category in known {
                    names.push(format!("{}_{}", col.name, category));
                }
            }
        }
        for col in self.schema.of_kind(ColumnKind::Passthrough) {
            names.push(col.name.clone());
        }
        names
    }

    /// Length of the encoded vector.
    pub fn output_dimension(&self) -> usize {
        let numeric = self.schema.of_kind(ColumnKind::Numeric).count();
        let categorical: usize = self
            .schema
            .of_kind(ColumnKind::Categorical)
            .map(|c| self.categories.get(&c.name).map_or(0, Vec::len))
            .sum();
        let passthrough = self.schema.of_kind(ColumnKind::Passthrough).count();
        numeric + categorical + passthrough
    }

    /// Fitted schema.
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Fitted categories for a column, in fit order.
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.categories.get(column).map(Vec::as_slice)
    }

    /// Fitted statistics for a numeric column.
    pub fn numeric_stats(&self, column: &str) -> Option<NumericStats> {
        self.numeric_stats.get(column).copied()
    }

    /// Persist the encoder as a JSON artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EncodeError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EncodeError::Artifact(e.to_string()))?;
        fs::write(path.as_ref(), json).map_err(|e| {
            EncodeError::Artifact(format!("{}: {}", path.as_ref().display(), e))
        })?;
        info!(path = %path.as_ref().display(), "saved encoder artifact");
        Ok(())
    }

    /// Load a persisted encoder artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EncodeError> {
        let raw = fs::read_to_string(path.as_ref()).map_err(|e| {
            EncodeError::Artifact(format!("{}: {}", path.as_ref().display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            EncodeError::Artifact(format!("{}: {}", path.as_ref().display(), e))
        })
    }
}
