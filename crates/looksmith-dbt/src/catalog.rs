//! dbt catalog.json parsing
//!
//! The catalog records the warehouse's view of each materialized node,
//! including the native type of every column.

use crate::validate::normalize_column_names;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// dbt catalog.json structure (subset of fields we care about)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Materialized nodes keyed by unique_id
    pub nodes: IndexMap<String, CatalogNode>,
}

impl Catalog {
    /// Load catalog from file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse catalog from JSON string, lowercasing column names
    pub fn from_str(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        for node in catalog.nodes.values_mut() {
            let columns = std::mem::take(&mut node.columns);
            node.columns = normalize_column_names(columns, |column, name| column.name = name);
        }

        Ok(catalog)
    }

    /// Get a node by unique_id
    pub fn get_node(&self, unique_id: &str) -> Option<&CatalogNode> {
        self.nodes.get(unique_id)
    }

    /// Native type of a column, if the catalog knows the node and column
    pub fn column_type(&self, unique_id: &str, column: &str) -> Option<&str> {
        self.get_node(unique_id)
            .and_then(|node| node.columns.get(column))
            .map(|column| column.native_type.as_str())
    }
}

/// A materialized relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogNode {
    pub metadata: CatalogNodeMetadata,
    pub columns: IndexMap<String, CatalogColumn>,
}

/// Relation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogNodeMetadata {
    /// Relation kind (e.g., "BASE TABLE", "VIEW")
    #[serde(rename = "type")]
    pub relation_type: String,
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// A column as reported by the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogColumn {
    #[serde(rename = "type")]
    pub native_type: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub index: i64,
    pub name: String,
}

/// Catalog parsing errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse catalog JSON: {0}")]
    ParseError(String),
}
