//! Catalog type merge and model selection
//!
//! Manifest columns only carry a type when the model YAML declares one;
//! the catalog fills in the rest from the warehouse.

use crate::catalog::Catalog;
use crate::model::DbtModel;
use looksmith_core::{Diagnostic, DiagnosticCode, Dialect, Severity};

/// Models whose native types are known, plus what was dropped on the way
#[derive(Debug, Clone, PartialEq)]
pub struct TypedModels {
    pub models: Vec<DbtModel>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Fill missing column types from the catalog
///
/// Models absent from the catalog are dropped with a warning. Columns
/// already typed in the manifest keep their type.
pub fn apply_catalog_types(models: Vec<DbtModel>, catalog: &Catalog, dialect: Dialect) -> TypedModels {
    let total = models.len();
    let mut diagnostics = Vec::new();
    let mut typed = Vec::with_capacity(total);

    for mut model in models {
        if catalog.get_node(&model.unique_id).is_none() {
            let relation = model.relation_name.as_deref().unwrap_or(&model.name);
            let diagnostic = Diagnostic::new(
                DiagnosticCode::ModelNotInCatalog,
                Severity::Warn,
                format!(
                    "Model {} not found in catalog. No looker view will be generated. \
                     Check if model has materialized in {} at {}",
                    model.unique_id, dialect, relation
                ),
            )
            .with_model(&model.unique_id)
            .with_dialect(dialect);
            tracing::warn!("{}", diagnostic.message);
            diagnostics.push(diagnostic);
            continue;
        }

        for column in model.columns.values_mut() {
            if column.data_type.is_none() {
                column.data_type = catalog
                    .column_type(&model.unique_id, &column.name)
                    .map(str::to_string);
            }
        }

        if !model.has_typed_columns() {
            tracing::debug!(model = %model.unique_id, "model has no typed columns");
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::ModelWithoutTypedColumns,
                    Severity::Info,
                    format!(
                        "Model {} has no typed columns, no dimensions will be generated",
                        model.unique_id
                    ),
                )
                .with_model(&model.unique_id),
            );
        }

        typed.push(model);
    }

    tracing::debug!(
        found = typed.len(),
        missing = total - typed.len(),
        "merged catalog types"
    );

    TypedModels {
        models: typed,
        diagnostics,
    }
}

/// Keep only models carrying `tag`; all models when no tag is given
pub fn select_models(models: Vec<DbtModel>, tag: Option<&str>) -> Vec<DbtModel> {
    match tag {
        None => models,
        Some(tag) => models
            .into_iter()
            .filter(|model| model.tags.iter().any(|t| t == tag))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::ModelMeta;
    use crate::model::DbtColumn;
    use indexmap::IndexMap;

    fn model(unique_id: &str, tags: &[&str], columns: Vec<DbtColumn>) -> DbtModel {
        DbtModel {
            unique_id: unique_id.to_string(),
            name: unique_id.rsplit('.').next().unwrap_or(unique_id).to_string(),
            schema: "analytics".to_string(),
            relation_name: None,
            description: String::new(),
            columns: columns.into_iter().map(|c| (c.name.clone(), c)).collect::<IndexMap<_, _>>(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            meta: ModelMeta::default(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_str(
            r#"{"nodes": {"model.shop.orders": {
                "metadata": {"type": "BASE TABLE", "schema": "analytics", "name": "orders"},
                "columns": {
                    "id": {"type": "INTEGER", "index": 1, "name": "id"},
                    "amount": {"type": "NUMERIC", "index": 2, "name": "amount"}
                }
            }}}"#,
        )
        .unwrap()
    }

    #[test]
    fn fills_missing_types_only() {
        let orders = model(
            "model.shop.orders",
            &[],
            vec![DbtColumn::new("id"), DbtColumn::new("amount").with_type("DECIMAL")],
        );

        let typed = apply_catalog_types(vec![orders], &catalog(), Dialect::Postgres);
        let columns = &typed.models[0].columns;
        assert_eq!(columns["id"].data_type.as_deref(), Some("INTEGER"));
        assert_eq!(columns["amount"].data_type.as_deref(), Some("DECIMAL"));
        assert!(typed.diagnostics.is_empty());
    }

    #[test]
    fn models_missing_from_catalog_are_dropped() {
        let customers = model("model.shop.customers", &[], vec![DbtColumn::new("id")]);

        let typed = apply_catalog_types(vec![customers], &catalog(), Dialect::Snowflake);
        assert!(typed.models.is_empty());
        assert_eq!(typed.diagnostics.len(), 1);
        assert_eq!(typed.diagnostics[0].code, DiagnosticCode::ModelNotInCatalog);
        assert_eq!(typed.diagnostics[0].model.as_deref(), Some("model.shop.customers"));
    }

    #[test]
    fn untyped_model_is_reported() {
        let orders = model("model.shop.orders", &[], vec![DbtColumn::new("note")]);

        let typed = apply_catalog_types(vec![orders], &catalog(), Dialect::Postgres);
        assert_eq!(typed.models.len(), 1);
        assert_eq!(typed.diagnostics[0].code, DiagnosticCode::ModelWithoutTypedColumns);
        assert_eq!(typed.diagnostics[0].severity, Severity::Info);
    }

    #[test]
    fn tag_selection() {
        let models = vec![
            model("model.shop.orders", &["finance", "daily"], vec![]),
            model("model.shop.customers", &["crm"], vec![]),
        ];

        assert_eq!(select_models(models.clone(), None).len(), 2);

        let finance = select_models(models.clone(), Some("finance"));
        assert_eq!(finance.len(), 1);
        assert_eq!(finance[0].name, "orders");

        assert!(select_models(models, Some("fin")).is_empty());
    }
}
