//! Validated dbt entities
//!
//! Produced once by the validator and never mutated afterwards, except
//! for the catalog type merge which fills in missing native types.

use crate::meta::{DimensionMeta, MeasureType, ModelMeta, ValueFormatName, YesNo};
use indexmap::IndexMap;
use looksmith_core::Dialect;

/// A single-key measure filter, `field: expression`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureFilter {
    pub field: String,
    pub expression: String,
}

/// A measure after filter validation
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub measure_type: MeasureType,
    pub filters: Vec<MeasureFilter>,
    pub description: Option<String>,
    pub sql: Option<String>,
    pub value_format_name: Option<ValueFormatName>,
    pub value_format: Option<String>,
    pub group_label: Option<String>,
    pub view_label: Option<String>,
    pub label: Option<String>,
    pub hidden: Option<YesNo>,
    pub drill_fields: Option<Vec<String>>,
    pub list_field: Option<String>,
    pub sql_distinct_key: Option<String>,
}

impl Measure {
    /// A measure of the given type with nothing else set
    pub fn new(measure_type: MeasureType) -> Self {
        Self {
            measure_type,
            filters: Vec::new(),
            description: None,
            sql: None,
            value_format_name: None,
            value_format: None,
            group_label: None,
            view_label: None,
            label: None,
            hidden: None,
            drill_fields: None,
            list_field: None,
            sql_distinct_key: None,
        }
    }
}

/// Annotation block of a column
///
/// The four measure maps are synonyms; the measure assembler merges them
/// in declaration order `measures`, `measure`, `metrics`, `metric`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMeta {
    pub measures: IndexMap<String, Measure>,
    pub measure: IndexMap<String, Measure>,
    pub metrics: IndexMap<String, Measure>,
    pub metric: IndexMap<String, Measure>,
    pub dimension: DimensionMeta,
}

/// A model column
#[derive(Debug, Clone, PartialEq)]
pub struct DbtColumn {
    /// Lowercased column name
    pub name: String,
    pub description: String,
    /// Native (dialect-specific) type, if known
    pub data_type: Option<String>,
    pub meta: ColumnMeta,
}

impl DbtColumn {
    /// An untyped column without annotations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            data_type: None,
            meta: ColumnMeta::default(),
        }
    }

    /// Set the native type
    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A dbt model: one translatable relation
#[derive(Debug, Clone, PartialEq)]
pub struct DbtModel {
    /// Unique identifier (e.g., "model.shop.orders")
    pub unique_id: String,
    pub name: String,
    pub schema: String,
    /// Fully qualified relation, used as `sql_table_name`
    pub relation_name: Option<String>,
    pub description: String,
    /// Columns keyed by lowercased name, in manifest order
    pub columns: IndexMap<String, DbtColumn>,
    pub tags: Vec<String>,
    /// Model-level `config.meta`
    pub meta: ModelMeta,
}

impl DbtModel {
    /// Name of the generated view (and explore)
    pub fn view_name(&self) -> &str {
        self.meta.view_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether any column has a native type
    pub fn has_typed_columns(&self) -> bool {
        self.columns.values().any(|c| c.data_type.is_some())
    }
}

/// Any manifest node that is not a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbtNode {
    pub unique_id: String,
    pub resource_type: String,
}

/// A validated manifest node
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestNode {
    Model(Box<DbtModel>),
    Other(DbtNode),
}

impl ManifestNode {
    pub fn as_model(&self) -> Option<&DbtModel> {
        match self {
            Self::Model(model) => Some(model),
            Self::Other(_) => None,
        }
    }
}

/// A manifest whose adapter and model nodes passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedManifest {
    pub dialect: Dialect,
    pub nodes: IndexMap<String, ManifestNode>,
}

impl ValidatedManifest {
    /// Model nodes, in manifest order
    pub fn models(&self) -> impl Iterator<Item = &DbtModel> {
        self.nodes.values().filter_map(ManifestNode::as_model)
    }

    /// Owned copies of all models
    pub fn into_models(self) -> Vec<DbtModel> {
        self.nodes
            .into_values()
            .filter_map(|node| match node {
                ManifestNode::Model(model) => Some(*model),
                ManifestNode::Other(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(view_name: Option<&str>) -> DbtModel {
        DbtModel {
            unique_id: "model.shop.orders".to_string(),
            name: "orders".to_string(),
            schema: "analytics".to_string(),
            relation_name: None,
            description: String::new(),
            columns: IndexMap::new(),
            tags: Vec::new(),
            meta: ModelMeta {
                view_name: view_name.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[test]
    fn view_name_override() {
        assert_eq!(model(None).view_name(), "orders");
        assert_eq!(model(Some("fct_orders")).view_name(), "fct_orders");
    }

    #[test]
    fn typed_columns() {
        let mut m = model(None);
        m.columns.insert("id".to_string(), DbtColumn::new("id"));
        assert!(!m.has_typed_columns());

        m.columns.insert("amount".to_string(), DbtColumn::new("amount").with_type("NUMERIC"));
        assert!(m.has_typed_columns());
    }
}
