//! Semantic field types and the per-dialect type map catalog
//!
//! Maps warehouse-specific column types to the small LookML type vocabulary.
//! The tables are built once per process and never mutated afterwards, so
//! they can be shared freely between threads translating different models.

use crate::dialect::Dialect;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// LookML-facing type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Numeric scalar
    Number,

    /// Boolean
    YesNo,

    /// Anything rendered as text
    String,

    /// Calendar date without a time component
    Date,

    /// Date and time without time zone semantics
    DateTime,

    /// Point in time
    Timestamp,
}

impl SemanticType {
    /// Name used in LookML `type:` and `datatype:` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::YesNo => "yesno",
            Self::String => "string",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
        }
    }

    /// Types that become a plain `dimension`
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Number | Self::YesNo | Self::String)
    }

    /// Types that become a `dimension_group` by default
    pub fn is_date_time(&self) -> bool {
        matches!(self, Self::DateTime | Self::Timestamp)
    }

    /// Date-only type; dimension groups for these are opt-in
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date)
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

type TypeMap = HashMap<&'static str, SemanticType>;

static PRECISION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^(]*").expect("static regex"));

static TYPE_MAPS: LazyLock<HashMap<Dialect, TypeMap>> = LazyLock::new(|| {
    Dialect::ALL
        .into_iter()
        .map(|dialect| (dialect, build_type_map(dialect)))
        .collect()
});

fn build_type_map(dialect: Dialect) -> TypeMap {
    use SemanticType::*;

    let entries: &[(&'static str, SemanticType)] = match dialect {
        Dialect::BigQuery => &[
            ("INT64", Number),
            ("INTEGER", Number),
            ("FLOAT", Number),
            ("FLOAT64", Number),
            ("NUMERIC", Number),
            ("BIGNUMERIC", Number),
            ("BOOLEAN", YesNo),
            ("BOOL", YesNo),
            ("STRING", String),
            ("TIMESTAMP", Timestamp),
            ("DATETIME", DateTime),
            ("DATE", Date),
            // Time of day has no LookML time type
            ("TIME", String),
            ("ARRAY", String),
            ("GEOGRAPHY", String),
            ("BYTES", String),
        ],
        Dialect::Snowflake => &[
            ("NUMBER", Number),
            ("DECIMAL", Number),
            ("NUMERIC", Number),
            ("INT", Number),
            ("INTEGER", Number),
            ("BIGINT", Number),
            ("SMALLINT", Number),
            ("FLOAT", Number),
            ("FLOAT4", Number),
            ("FLOAT8", Number),
            ("DOUBLE", Number),
            ("DOUBLE PRECISION", Number),
            ("REAL", Number),
            ("VARCHAR", String),
            ("CHAR", String),
            ("CHARACTER", String),
            ("STRING", String),
            ("TEXT", String),
            ("BINARY", String),
            ("VARBINARY", String),
            ("BOOLEAN", YesNo),
            ("DATE", Date),
            ("DATETIME", DateTime),
            ("TIME", String),
            ("TIMESTAMP", Timestamp),
            // TIMESTAMP_LTZ and TIMESTAMP_TZ cannot back a dimension group
            ("TIMESTAMP_NTZ", Timestamp),
            ("VARIANT", String),
            ("OBJECT", String),
            ("ARRAY", String),
            ("GEOGRAPHY", String),
        ],
        Dialect::Redshift => &[
            ("SMALLINT", Number),
            ("INT2", Number),
            ("INTEGER", Number),
            ("INT", Number),
            ("INT4", Number),
            ("BIGINT", Number),
            ("INT8", Number),
            ("DECIMAL", Number),
            ("NUMERIC", Number),
            ("REAL", Number),
            ("FLOAT4", Number),
            ("DOUBLE PRECISION", Number),
            ("FLOAT8", Number),
            ("FLOAT", Number),
            ("BOOLEAN", YesNo),
            ("BOOL", YesNo),
            ("CHAR", String),
            ("CHARACTER", String),
            ("NCHAR", String),
            ("BPCHAR", String),
            ("VARCHAR", String),
            ("CHARACTER VARYING", String),
            ("NVARCHAR", String),
            ("TEXT", String),
            ("DATE", Date),
            ("TIMESTAMP", Timestamp),
            ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
            ("GEOMETRY", String),
            ("TIME", String),
            ("TIME WITHOUT TIME ZONE", String),
        ],
        Dialect::Postgres => &[
            ("XML", String),
            ("UUID", String),
            ("PG_LSN", String),
            ("MACADDR", String),
            ("JSON", String),
            ("JSONB", String),
            ("CIDR", String),
            ("INET", String),
            ("MONEY", Number),
            ("SMALLINT", Number),
            ("INT2", Number),
            ("SMALLSERIAL", Number),
            ("SERIAL2", Number),
            ("INTEGER", Number),
            ("INT", Number),
            ("INT4", Number),
            ("SERIAL", Number),
            ("SERIAL4", Number),
            ("BIGINT", Number),
            ("INT8", Number),
            ("BIGSERIAL", Number),
            ("SERIAL8", Number),
            ("DECIMAL", Number),
            ("NUMERIC", Number),
            ("REAL", Number),
            ("FLOAT4", Number),
            ("DOUBLE PRECISION", Number),
            ("FLOAT8", Number),
            ("FLOAT", Number),
            ("BOOLEAN", YesNo),
            ("BOOL", YesNo),
            ("CHAR", String),
            ("CHARACTER", String),
            ("NCHAR", String),
            ("BPCHAR", String),
            ("VARCHAR", String),
            ("CHARACTER VARYING", String),
            ("NVARCHAR", String),
            ("TEXT", String),
            ("DATE", Date),
            ("TIMESTAMP", Timestamp),
            ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
            ("GEOMETRY", String),
            ("TIME", String),
            ("TIME WITHOUT TIME ZONE", String),
            ("STRING", String),
        ],
        Dialect::Spark => &[
            ("BYTE", Number),
            ("SHORT", Number),
            ("INTEGER", Number),
            ("LONG", Number),
            ("FLOAT", Number),
            ("DOUBLE", Number),
            ("DECIMAL", Number),
            ("STRING", String),
            ("VARCHAR", String),
            ("CHAR", String),
            ("BOOLEAN", YesNo),
            ("TIMESTAMP", Timestamp),
            ("DATE", DateTime),
        ],
    };

    entries.iter().copied().collect()
}

/// Read-only view over the per-dialect type maps
pub struct TypeCatalog;

impl TypeCatalog {
    /// Resolve a native column type to its semantic type
    ///
    /// Returns `None` both for a missing native type and for a type the
    /// dialect does not map; callers distinguish the two when reporting.
    pub fn resolve(dialect: Dialect, native_type: Option<&str>) -> Option<SemanticType> {
        native_type.and_then(|native| Self::lookup(dialect, native))
    }

    /// Look up a present native type name (case-insensitive)
    pub fn lookup(dialect: Dialect, native_type: &str) -> Option<SemanticType> {
        let key = Self::normalize(dialect, native_type);
        TYPE_MAPS
            .get(&dialect)
            .and_then(|map| map.get(key.as_str()))
            .copied()
    }

    /// Normalize a native type name into a type map key
    pub fn normalize(dialect: Dialect, native_type: &str) -> String {
        let base = if dialect.strips_precision() {
            PRECISION_PREFIX
                .find(native_type)
                .map(|m| m.as_str().trim_end())
                .unwrap_or(native_type)
        } else {
            native_type
        };

        base.to_uppercase()
    }
}
