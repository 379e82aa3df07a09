//! Measure assembly
//!
//! Columns carry measures under four synonym keys. They are merged into a
//! single map before any output is produced.

use crate::classify::table_reference;
use crate::lookml::MeasureField;
use crate::text::{capitalize, indent_description, non_empty, DESCRIPTION_INDENT};
use indexmap::IndexMap;
use looksmith_dbt::{ColumnMeta, DbtColumn, DbtModel, Measure};

/// Merge the synonym measure maps of a column
///
/// Precedence, lowest first: `measures`, `measure`, `metrics`, `metric`.
/// A later map replaces an earlier definition of the same name; the name
/// keeps the position where it first appeared.
pub fn merge_measure_maps(meta: &ColumnMeta) -> IndexMap<&str, &Measure> {
    let mut merged = IndexMap::new();

    for map in [&meta.measures, &meta.measure, &meta.metrics, &meta.metric] {
        for (name, measure) in map {
            merged.insert(name.as_str(), measure);
        }
    }

    merged
}

/// Build the output field for one named measure of a column
pub fn measure_field(name: &str, column: &DbtColumn, measure: &Measure) -> MeasureField {
    let description = non_empty(measure.description.as_deref())
        .or_else(|| non_empty(Some(column.description.as_str())))
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!("{} of {}", capitalize(measure.measure_type.as_str()), column.name)
        });

    MeasureField {
        name: name.to_string(),
        measure_type: measure.measure_type,
        sql: non_empty(measure.sql.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| table_reference(&column.name)),
        description: indent_description(&description, DESCRIPTION_INDENT),
        filters: measure.filters.clone(),
        value_format_name: measure.value_format_name,
        value_format: measure.value_format.clone(),
        group_label: measure.group_label.clone(),
        view_label: measure.view_label.clone(),
        label: measure.label.clone(),
        hidden: measure.hidden,
        drill_fields: measure.drill_fields.clone(),
        list_field: measure.list_field.clone(),
        sql_distinct_key: measure.sql_distinct_key.clone(),
    }
}

/// All measures of a model, column by column
pub fn measures_from_model(model: &DbtModel) -> Vec<MeasureField> {
    model
        .columns
        .values()
        .flat_map(|column| {
            merge_measure_maps(&column.meta)
                .into_iter()
                .map(move |(name, measure)| measure_field(name, column, measure))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use looksmith_dbt::{MeasureFilter, MeasureType};
    use pretty_assertions::assert_eq;

    fn measure(measure_type: MeasureType, description: Option<&str>) -> Measure {
        Measure {
            description: description.map(str::to_string),
            ..Measure::new(measure_type)
        }
    }

    #[test]
    fn later_synonyms_override_earlier() {
        let mut meta = ColumnMeta::default();
        meta.measures.insert("total".to_string(), measure(MeasureType::Sum, Some("first")));
        meta.measures.insert("rows".to_string(), measure(MeasureType::Count, None));
        meta.metric.insert("total".to_string(), measure(MeasureType::Average, Some("last")));

        let merged = merge_measure_maps(&meta);

        let names: Vec<&str> = merged.keys().copied().collect();
        assert_eq!(names, vec!["total", "rows"]);
        assert_eq!(merged["total"].measure_type, MeasureType::Average);
        assert_eq!(merged["total"].description.as_deref(), Some("last"));
    }

    #[test]
    fn defaults_for_sum_measure() {
        let column = DbtColumn::new("amount").with_type("NUMERIC");
        let field = measure_field("total_amount", &column, &Measure::new(MeasureType::Sum));

        assert_eq!(field.name, "total_amount");
        assert_eq!(field.measure_type, MeasureType::Sum);
        assert_eq!(field.sql, "${TABLE}.amount");
        assert_eq!(field.description, "Sum of amount");
        assert!(field.filters.is_empty());
    }

    #[test]
    fn description_fallback_order() {
        let column = DbtColumn::new("customer_id").with_description("Customer key");

        let own = measure_field("a", &column, &measure(MeasureType::CountDistinct, Some("Unique buyers")));
        assert_eq!(own.description, "Unique buyers");

        let inherited = measure_field("b", &column, &Measure::new(MeasureType::CountDistinct));
        assert_eq!(inherited.description, "Customer key");

        let bare = DbtColumn::new("customer_id");
        let generated = measure_field("c", &bare, &Measure::new(MeasureType::CountDistinct));
        assert_eq!(generated.description, "Count_distinct of customer_id");
    }

    #[test]
    fn sql_override_and_filters_pass_through() {
        let column = DbtColumn::new("status");
        let source = Measure {
            sql: Some("${TABLE}.id".to_string()),
            filters: vec![MeasureFilter {
                field: "status".to_string(),
                expression: "complete".to_string(),
            }],
            ..Measure::new(MeasureType::Count)
        };

        let field = measure_field("completed", &column, &source);

        assert_eq!(field.sql, "${TABLE}.id");
        assert_eq!(field.filters, source.filters);
    }

    #[test]
    fn distinct_synonym_names_are_unioned() {
        let mut column = DbtColumn::new("amount").with_type("numeric");
        column.meta.measures.insert("a".to_string(), Measure::new(MeasureType::Sum));
        column.meta.measure.insert("b".to_string(), Measure::new(MeasureType::Max));
        column.meta.metrics.insert("c".to_string(), Measure::new(MeasureType::Min));
        column.meta.metric.insert("d".to_string(), Measure::new(MeasureType::Average));
        let model = DbtModel {
            unique_id: "model.shop.orders".to_string(),
            name: "orders".to_string(),
            schema: "analytics".to_string(),
            relation_name: None,
            description: String::new(),
            columns: [(column.name.clone(), column)].into_iter().collect(),
            tags: Vec::new(),
            meta: Default::default(),
        };

        let fields = measures_from_model(&model);

        let summary: Vec<(&str, &str, &str)> = fields
            .iter()
            .map(|f| (f.name.as_str(), f.sql.as_str(), f.description.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", "${TABLE}.amount", "Sum of amount"),
                ("b", "${TABLE}.amount", "Max of amount"),
                ("c", "${TABLE}.amount", "Min of amount"),
                ("d", "${TABLE}.amount", "Average of amount"),
            ]
        );
    }
}
