//! dbt manifest.json parsing
//!
//! Parses the raw manifest document. Node bodies are kept as JSON values
//! here; the validator turns model nodes into typed entities.

use crate::meta::{ModelMeta, RawColumnMeta};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// dbt manifest.json structure (subset of fields we care about)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Metadata about the manifest
    pub metadata: ManifestMetadata,

    /// All nodes (models, tests, seeds, ...) keyed by unique_id
    pub nodes: IndexMap<String, serde_json::Value>,
}

impl Manifest {
    /// Load manifest from file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse manifest from JSON string
    pub fn from_str(json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(|e| ManifestError::ParseError(e.to_string()))
    }
}

/// Manifest metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// dbt adapter the project was compiled with
    pub adapter_type: String,

    #[serde(default)]
    pub dbt_version: Option<String>,
}

/// Shape shared by every manifest node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub unique_id: String,
    pub resource_type: String,
}

/// A model node as written in the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawModel {
    pub unique_id: String,
    pub name: String,
    pub schema: String,
    #[serde(default)]
    pub relation_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub columns: IndexMap<String, RawColumn>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub config: Option<RawModelConfig>,
}

/// Model configuration block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawModelConfig {
    #[serde(default)]
    pub meta: Option<ModelMeta>,
}

/// Column definition from manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Data type (if declared in the model YAML)
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub meta: RawColumnMeta,
}

/// Manifest parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse manifest JSON: {0}")]
    ParseError(String),
}
