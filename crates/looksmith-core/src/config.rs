//! Configuration schema (looksmith.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "looksmith.toml";

/// Main configuration structure
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory containing dbt_project.yml
    pub project_dir: PathBuf,

    /// Directory containing manifest.json and catalog.json
    pub target_dir: PathBuf,

    /// Directory LookML files are written to
    pub output_dir: PathBuf,

    /// Only translate models carrying this tag
    pub tag: Option<String>,

    /// Connection name for generated explores (defaults to the dbt project name)
    pub connection: Option<String>,

    /// Include pattern written into each model file
    pub include: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            target_dir: PathBuf::from("./target"),
            output_dir: PathBuf::from("./lookml"),
            tag: None,
            connection: None,
            include: "/views/*".to_string(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Path of manifest.json inside the target directory
    pub fn manifest_path(&self) -> PathBuf {
        self.target_dir.join("manifest.json")
    }

    /// Path of catalog.json inside the target directory
    pub fn catalog_path(&self) -> PathBuf {
        self.target_dir.join("catalog.json")
    }

    /// Path of dbt_project.yml inside the project directory
    pub fn project_file_path(&self) -> PathBuf {
        self.project_dir.join("dbt_project.yml")
    }

    /// Directory view files are written to
    pub fn views_dir(&self) -> PathBuf {
        self.output_dir.join("views")
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}
