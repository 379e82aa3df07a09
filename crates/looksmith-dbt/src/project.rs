//! dbt_project.yml parsing

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The parts of dbt_project.yml we use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbtProject {
    /// Project name; the default explore connection
    pub name: String,
}

impl DbtProject {
    /// Load project config from file
    pub fn from_file(path: &Path) -> Result<Self, ProjectError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProjectError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&contents)
    }

    /// Parse project config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ProjectError> {
        serde_yaml::from_str(yaml).map_err(|e| ProjectError::ParseError(e.to_string()))
    }
}

/// Project config errors
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Failed to read dbt project file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse dbt_project.yml: {0}")]
    ParseError(String),
}
