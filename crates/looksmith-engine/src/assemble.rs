//! View and model document assembly

use crate::classify::classify_model;
use crate::lookml::{Dimension, DimensionGroup, Explore, ExploreJoin, FieldSet, ModelDocument, View};
use crate::measure::measures_from_model;
use crate::text::{indent_description, EXPLORE_DESCRIPTION_INDENT};
use looksmith_core::{Diagnostic, Dialect};
use looksmith_dbt::{DbtModel, JoinMeta};

/// Name of the synthetic field set every view carries
pub const DETAILS_SET: &str = "details";

/// Default `include:` of a model document
pub const DEFAULT_INCLUDE: &str = "/views/*";

/// Fields listed in the details set
///
/// One `<group>_<first timeframe>` per dimension group, then every
/// dimension without an explicit `hidden` attribute.
pub fn details_set(dimension_groups: &[DimensionGroup], dimensions: &[Dimension]) -> FieldSet {
    let group_fields = dimension_groups
        .iter()
        .filter_map(DimensionGroup::first_timeframe_field);
    let dimension_fields = dimensions
        .iter()
        .filter(|d| d.hidden.is_none())
        .map(|d| d.name.clone());

    FieldSet {
        name: DETAILS_SET.to_string(),
        fields: group_fields.chain(dimension_fields).collect(),
    }
}

/// Build the view document of a model
pub fn view_from_model(model: &DbtModel, dialect: Dialect, diagnostics: &mut Vec<Diagnostic>) -> View {
    let fields = classify_model(model, dialect, diagnostics);
    let measures = measures_from_model(model);
    let set = details_set(&fields.dimension_groups, &fields.dimensions);

    let view = View {
        name: model.view_name().to_string(),
        sql_table_name: model.relation_name.clone(),
        dimension_groups: fields.dimension_groups,
        dimensions: fields.dimensions,
        measures,
        set,
    };

    tracing::debug!(
        "Created view from model {} with {} measures, {} dimensions",
        view.name,
        view.measures.len(),
        view.dimensions.len()
    );

    view
}

fn explore_join(join: &JoinMeta) -> ExploreJoin {
    ExploreJoin {
        name: join.join.clone(),
        join_type: join.join_type,
        relationship: join.relationship,
        sql_on: join.sql_on.clone(),
        foreign_key: join.foreign_key.clone(),
        view_label: join.view_label.clone(),
    }
}

/// Build the model document (one explore) of a model
pub fn model_document(model: &DbtModel, connection: &str, include: &str) -> ModelDocument {
    let description = Some(model.description.as_str())
        .filter(|d| !d.is_empty())
        .map(|d| indent_description(d, EXPLORE_DESCRIPTION_INDENT));

    ModelDocument {
        connection: connection.to_string(),
        include: include.to_string(),
        explore: Explore {
            name: model.view_name().to_string(),
            label: model.meta.label.clone(),
            view_label: model.meta.view_label.clone(),
            description,
            joins: model.meta.joins.iter().map(explore_join).collect(),
        },
    }
}
