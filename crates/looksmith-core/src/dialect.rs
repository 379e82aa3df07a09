//! Supported dbt adapters
//!
//! The adapter declared in `manifest.json` decides which type map is used
//! to translate native column types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// dbt adapter (database dialect) with a known type vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Google BigQuery
    BigQuery,

    /// PostgreSQL
    Postgres,

    /// Amazon Redshift
    Redshift,

    /// Snowflake
    Snowflake,

    /// Apache Spark / Databricks
    Spark,
}

impl Dialect {
    /// Every supported dialect, in a stable order
    pub const ALL: [Dialect; 5] = [
        Dialect::BigQuery,
        Dialect::Postgres,
        Dialect::Redshift,
        Dialect::Snowflake,
        Dialect::Spark,
    ];

    /// The adapter name as written by dbt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BigQuery => "bigquery",
            Self::Postgres => "postgres",
            Self::Redshift => "redshift",
            Self::Snowflake => "snowflake",
            Self::Spark => "spark",
        }
    }

    /// Whether native type names carry a parenthesized precision suffix
    /// that must be stripped before lookup, e.g. `decimal(10,2)`
    pub fn strips_precision(&self) -> bool {
        matches!(self, Self::Spark)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bigquery" => Ok(Self::BigQuery),
            "postgres" => Ok(Self::Postgres),
            "redshift" => Ok(Self::Redshift),
            "snowflake" => Ok(Self::Snowflake),
            "spark" => Ok(Self::Spark),
            other => Err(AdapterError::Unsupported(other.to_string())),
        }
    }
}

/// Adapter errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("{0} is not a supported dbt adapter")]
    Unsupported(String),
}
