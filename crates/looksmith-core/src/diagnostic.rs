//! Diagnostic codes and non-fatal run findings
//!
//! IMPORTANT: Diagnostic codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the public API.
//! Add new codes with new names only.

use crate::dialect::Dialect;
use serde::{Deserialize, Serialize};

/// Diagnostic code registry (v1)
///
/// These codes are STABLE and VERSIONED.
/// Do NOT rename or remove codes - only add new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Type mapping
    /// A column's native type has no entry in the dialect's type map
    UnmappedColumnType,

    /// A model-level dimension declares a type the dialect does not map
    UnmappedDimensionType,

    // Catalog merge
    /// A selected model has no node in catalog.json
    ModelNotInCatalog,

    /// No column of the model has a native type after the catalog merge
    ModelWithoutTypedColumns,

    // General
    /// General informational message
    Info,
}

impl DiagnosticCode {
    /// Get the diagnostic code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnmappedColumnType => "UNMAPPED_COLUMN_TYPE",
            Self::UnmappedDimensionType => "UNMAPPED_DIMENSION_TYPE",
            Self::ModelNotInCatalog => "MODEL_NOT_IN_CATALOG",
            Self::ModelWithoutTypedColumns => "MODEL_WITHOUT_TYPED_COLUMNS",
            Self::Info => "INFO",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic severity level
///
/// There is no error level: anything fatal is a `Result::Err` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Warning - output was generated but something was skipped
    Warn,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

/// A diagnostic message with structured metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable diagnostic code
    pub code: DiagnosticCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Model unique_id the finding is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Column (or model-level dimension) name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Dialect in effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
}

impl Diagnostic {
    /// Create a new diagnostic with minimal fields
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            model: None,
            column: None,
            dialect: None,
        }
    }

    /// Warning for a native type that the dialect does not map
    pub fn unmapped_column_type(
        dialect: Dialect,
        model: impl Into<String>,
        column: impl Into<String>,
        native_type: &str,
    ) -> Self {
        let column = column.into();
        Self::new(
            DiagnosticCode::UnmappedColumnType,
            Severity::Warn,
            format!(
                "Column type {} not supported for conversion from {} to looker. \
                 No dimension will be created for column '{}'.",
                native_type, dialect, column
            ),
        )
        .with_model(model)
        .with_column(column)
        .with_dialect(dialect)
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the column
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(model) = &self.model {
            write!(f, " ({})", model)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_code_stability() {
        // Ensure codes are stable strings
        assert_eq!(DiagnosticCode::UnmappedColumnType.as_str(), "UNMAPPED_COLUMN_TYPE");
        assert_eq!(DiagnosticCode::ModelNotInCatalog.as_str(), "MODEL_NOT_IN_CATALOG");
    }

    #[test]
    fn unmapped_type_names_column_and_dialect() {
        let diag = Diagnostic::unmapped_column_type(
            Dialect::Postgres,
            "model.shop.orders",
            "location",
            "POINT",
        );

        assert_eq!(diag.severity, Severity::Warn);
        assert_eq!(diag.column.as_deref(), Some("location"));
        assert_eq!(diag.dialect, Some(Dialect::Postgres));
        assert!(diag.message.contains("POINT"));
        assert!(diag.message.contains("postgres"));
        assert!(diag.message.contains("location"));
    }

    #[test]
    fn diagnostic_serialization() {
        let diag = Diagnostic::new(DiagnosticCode::ModelNotInCatalog, Severity::Warn, "missing")
            .with_model("model.shop.orders");

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("MODEL_NOT_IN_CATALOG"));
        assert!(json.contains("\"warn\""));
        assert!(!json.contains("column"));
    }
}
