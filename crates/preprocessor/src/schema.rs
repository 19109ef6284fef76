//! Column Schema

use serde::{Deserialize, Serialize};

/// How a column is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Standardized with fitted mean and standard deviation.
    Numeric,
    /// One-hot expanded over fit-time categories.
    Categorical,
    /// Emitted unchanged after the categorical blocks.
    Passthrough,
}

impl ColumnKind {
    /// String form used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Passthrough => "passthrough",
        }
    }
}

/// One column declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name as it appears in input records.
    pub name: String,
    /// Encoding kind.
    pub kind: ColumnKind,
}

/// Ordered column declarations, fixed at fit time and embedded in the
/// persisted encoder artifact. Never re-inferred at inference time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<ColumnSpec>,
}

impl ColumnSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a numeric column, builder style.
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnKind::Numeric)
    }

    /// Declare a categorical column, builder style.
    pub fn categorical(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnKind::Categorical)
    }

    /// Declare a passthrough column, builder style.
    pub fn passthrough(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnKind::Passthrough)
    }

    /// Declare a column of the given kind.
    pub fn column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            kind,
        });
        self
    }

    /// All declared columns in declaration order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Declared columns of one kind, preserving declaration order.
    pub fn of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(move |c| c.kind == kind)
    }

    /// Number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
