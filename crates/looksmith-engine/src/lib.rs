//! looksmith engine - dbt models to LookML
//!
//! This crate implements the translation itself:
//! - Field classification (dimensions and time dimension groups)
//! - Measure assembly from the synonym measure maps
//! - View and model document assembly
//! - Per-run generation of the rendered files

pub mod assemble;
pub mod classify;
pub mod generator;
pub mod lookml;
pub mod measure;
mod text;

pub use assemble::{details_set, model_document, view_from_model, DEFAULT_INCLUDE, DETAILS_SET};
pub use classify::{classify, classify_model, ClassifiedFields, FieldKind, TIMEFRAMES};
pub use generator::{Generator, ModelTranslation, Translation};
pub use lookml::{
    Dimension, DimensionGroup, Explore, ExploreJoin, FieldSet, LookmlFile, MeasureField,
    ModelDocument, View,
};
pub use measure::{measure_field, measures_from_model, merge_measure_maps};
