//! Manifest validation
//!
//! Turns the raw manifest into typed entities. Each rule is a named
//! function so it can be exercised on its own:
//! - the adapter must be a supported dialect
//! - every measure filter must hold exactly one `field: expression` pair
//! - column names are lowercased; on collision the later column wins
//! - nodes that are not models pass through untyped

use crate::manifest::{Manifest, RawColumn, RawModel, RawNode};
use crate::meta::{RawColumnMeta, RawMeasure};
use crate::model::{
    ColumnMeta, DbtColumn, DbtModel, DbtNode, ManifestNode, Measure, MeasureFilter,
    ValidatedManifest,
};
use indexmap::IndexMap;
use looksmith_core::{AdapterError, Dialect};

/// Resource type of translatable nodes
pub const MODEL_RESOURCE_TYPE: &str = "model";

/// Validation errors; all are fatal to the run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    UnsupportedAdapter(#[from] AdapterError),

    #[error(
        "Model {node}, column '{column}', measure '{measure}': each filter must name exactly one field, found {keys} ({filter})"
    )]
    MalformedFilter {
        node: String,
        column: String,
        measure: String,
        keys: usize,
        filter: String,
    },

    #[error("Cannot parse model with id \"{node}\" - is the model file empty?")]
    EmptyModel { node: String },

    #[error("Invalid node {node}: {message}")]
    Structural { node: String, message: String },
}

/// Validate a whole manifest
pub fn validate_manifest(manifest: &Manifest) -> Result<ValidatedManifest, ValidationError> {
    let dialect = validate_adapter(&manifest.metadata.adapter_type)?;

    let mut nodes = IndexMap::with_capacity(manifest.nodes.len());
    for (unique_id, value) in &manifest.nodes {
        let node = validate_node(unique_id, value)?;
        nodes.insert(unique_id.clone(), node);
    }

    let model_count = nodes.values().filter(|n| n.as_model().is_some()).count();
    tracing::debug!(
        dialect = %dialect,
        nodes = nodes.len(),
        models = model_count,
        "validated manifest"
    );

    Ok(ValidatedManifest { dialect, nodes })
}

/// The adapter must be one of the supported dialects
pub fn validate_adapter(adapter_type: &str) -> Result<Dialect, ValidationError> {
    Ok(adapter_type.parse::<Dialect>()?)
}

/// Validate one manifest node; non-model nodes are kept untyped
pub fn validate_node(unique_id: &str, value: &serde_json::Value) -> Result<ManifestNode, ValidationError> {
    let raw: RawNode = serde_json::from_value(value.clone()).map_err(|e| ValidationError::Structural {
        node: unique_id.to_string(),
        message: e.to_string(),
    })?;

    if raw.resource_type != MODEL_RESOURCE_TYPE {
        return Ok(ManifestNode::Other(DbtNode {
            unique_id: raw.unique_id,
            resource_type: raw.resource_type,
        }));
    }

    // Empty model files compile to nodes without most attributes
    if value.get("name").is_none() {
        return Err(ValidationError::EmptyModel {
            node: unique_id.to_string(),
        });
    }

    let model: RawModel = serde_json::from_value(value.clone()).map_err(|e| ValidationError::Structural {
        node: unique_id.to_string(),
        message: e.to_string(),
    })?;

    validate_model(model).map(|m| ManifestNode::Model(Box::new(m)))
}

/// Build a typed model from its raw form
pub fn validate_model(raw: RawModel) -> Result<DbtModel, ValidationError> {
    let mut columns = Vec::with_capacity(raw.columns.len());
    for (key, column) in raw.columns {
        let column = validate_column(&raw.unique_id, column)?;
        columns.push((key, column));
    }

    let meta = raw.config.and_then(|c| c.meta).unwrap_or_default();
    if let Some(index) = meta.dimensions.iter().position(|d| d.name.is_none()) {
        return Err(ValidationError::Structural {
            node: raw.unique_id,
            message: format!("config.meta.dimensions[{index}]: missing field `name`"),
        });
    }

    Ok(DbtModel {
        columns: normalize_column_names(columns, |column, name| column.name = name),
        unique_id: raw.unique_id,
        name: raw.name,
        schema: raw.schema,
        relation_name: raw.relation_name,
        description: raw.description.unwrap_or_default(),
        tags: raw.tags,
        meta,
    })
}

fn validate_column(node: &str, raw: RawColumn) -> Result<DbtColumn, ValidationError> {
    let meta = validate_column_meta(node, &raw.name, raw.meta)?;

    Ok(DbtColumn {
        name: raw.name,
        description: raw.description.unwrap_or_default(),
        data_type: raw.data_type,
        meta,
    })
}

fn validate_column_meta(node: &str, column: &str, raw: RawColumnMeta) -> Result<ColumnMeta, ValidationError> {
    let convert = |map: IndexMap<String, RawMeasure>| -> Result<IndexMap<String, Measure>, ValidationError> {
        map.into_iter()
            .map(|(name, measure)| {
                let measure = validate_measure(node, column, &name, measure)?;
                Ok((name, measure))
            })
            .collect()
    };

    Ok(ColumnMeta {
        measures: convert(raw.measures)?,
        measure: convert(raw.measure)?,
        metrics: convert(raw.metrics)?,
        metric: convert(raw.metric)?,
        dimension: raw.dimension,
    })
}

/// Validate a measure's filters and build the typed measure
pub fn validate_measure(
    node: &str,
    column: &str,
    name: &str,
    raw: RawMeasure,
) -> Result<Measure, ValidationError> {
    let filters = raw
        .filters
        .unwrap_or_default()
        .iter()
        .map(|filter| {
            single_key_filter(filter).ok_or_else(|| ValidationError::MalformedFilter {
                node: node.to_string(),
                column: column.to_string(),
                measure: name.to_string(),
                keys: filter.len(),
                filter: format!("{:?}", filter),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Measure {
        measure_type: raw.measure_type,
        filters,
        description: raw.description,
        sql: raw.sql,
        value_format_name: raw.value_format_name,
        value_format: raw.value_format,
        group_label: raw.group_label,
        view_label: raw.view_label,
        label: raw.label,
        hidden: raw.hidden,
        drill_fields: raw.drill_fields,
        list_field: raw.list_field,
        sql_distinct_key: raw.sql_distinct_key,
    })
}

/// A filter map is valid only with exactly one key
pub fn single_key_filter(filter: &IndexMap<String, String>) -> Option<MeasureFilter> {
    if filter.len() != 1 {
        return None;
    }
    filter.iter().next().map(|(field, expression)| MeasureFilter {
        field: field.clone(),
        expression: expression.clone(),
    })
}

/// Lowercase column keys and names
///
/// Keys that collide after lowercasing keep the position of the first
/// occurrence and the value of the last.
pub fn normalize_column_names<T>(
    columns: impl IntoIterator<Item = (String, T)>,
    mut rename: impl FnMut(&mut T, String),
) -> IndexMap<String, T> {
    let mut normalized = IndexMap::new();
    for (key, mut column) in columns {
        let key = key.to_lowercase();
        rename(&mut column, key.clone());
        normalized.insert(key, column);
    }
    normalized
}
