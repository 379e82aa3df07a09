//! dbt artifact parsing and validation
//!
//! This crate handles:
//! - Parsing manifest.json, catalog.json and dbt_project.yml
//! - The Looker annotation schema carried in `meta` blocks
//! - Validating model nodes into typed entities
//! - Filling column types from the catalog and selecting models by tag

pub mod catalog;
pub mod manifest;
pub mod merge;
pub mod meta;
pub mod model;
pub mod project;
pub mod validate;

pub use catalog::{Catalog, CatalogColumn, CatalogError, CatalogNode, CatalogNodeMetadata};
pub use manifest::{Manifest, ManifestError, ManifestMetadata};
pub use merge::{apply_catalog_types, select_models, TypedModels};
pub use meta::{
    DimensionMeta, JoinMeta, JoinRelationship, JoinType, MeasureType, ModelMeta, ValueFormatName,
    YesNo,
};
pub use model::{
    ColumnMeta, DbtColumn, DbtModel, DbtNode, ManifestNode, Measure, MeasureFilter,
    ValidatedManifest,
};
pub use project::{DbtProject, ProjectError};
pub use validate::{validate_manifest, ValidationError};
