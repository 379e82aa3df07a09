//! Field classification
//!
//! Decides, per column and per model-level dimension, whether it becomes a
//! scalar `dimension`, a time `dimension_group`, or nothing at all.

use crate::lookml::{Dimension, DimensionGroup};
use crate::text::{indent_description, non_empty, DESCRIPTION_INDENT};
use looksmith_core::{Diagnostic, DiagnosticCode, Dialect, SemanticType, Severity, TypeCatalog};
use looksmith_dbt::{DbtColumn, DbtModel, DimensionMeta, YesNo};

/// Timeframes used when a dimension group does not list its own
pub const TIMEFRAMES: [&str; 14] = [
    "raw",
    "time",
    "hour",
    "date",
    "day_of_week",
    "day_of_year",
    "week",
    "week_of_year",
    "month",
    "month_num",
    "month_name",
    "quarter",
    "quarter_of_year",
    "year",
];

/// What a field turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Dimension(SemanticType),
    DimensionGroup(SemanticType),
    Skipped,
}

/// Decide the kind of field for a resolved type and its annotation
///
/// Timestamp and datetime groups are opt-out, date groups are opt-in,
/// scalar dimensions are opt-out.
pub fn classify(semantic: Option<SemanticType>, meta: &DimensionMeta) -> FieldKind {
    match semantic {
        Some(t) if t.is_date_time() && meta.is_enabled() => FieldKind::DimensionGroup(t),
        Some(t) if t.is_date() && meta.is_explicitly_enabled() => FieldKind::DimensionGroup(t),
        Some(t) if t.is_scalar() && meta.is_enabled() => FieldKind::Dimension(t),
        _ => FieldKind::Skipped,
    }
}

/// Fields produced for one model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedFields {
    pub dimension_groups: Vec<DimensionGroup>,
    pub dimensions: Vec<Dimension>,
}

impl ClassifiedFields {
    fn push(&mut self, kind: FieldKind, source: FieldSource<'_>) {
        match kind {
            FieldKind::DimensionGroup(datatype) => {
                self.dimension_groups.push(source.dimension_group(datatype))
            }
            FieldKind::Dimension(field_type) => self.dimensions.push(source.dimension(field_type)),
            FieldKind::Skipped => {}
        }
    }
}

/// Classify every column and model-level dimension of a model
///
/// Unmapped native types are reported once per column; a column without a
/// native type is skipped silently. Dimension groups keep column order
/// whatever their datatype.
pub fn classify_model(
    model: &DbtModel,
    dialect: Dialect,
    diagnostics: &mut Vec<Diagnostic>,
) -> ClassifiedFields {
    let mut fields = ClassifiedFields::default();

    for column in model.columns.values() {
        let semantic = resolve_column(model, column, dialect, diagnostics);
        let kind = classify(semantic, &column.meta.dimension);
        fields.push(kind, FieldSource::Column(column));
    }

    for (index, meta) in model.meta.dimensions.iter().enumerate() {
        let Some(name) = meta.name.as_deref() else {
            continue;
        };
        let semantic = resolve_model_dimension(model, index, name, meta, dialect, diagnostics);
        fields.push(classify(semantic, meta), FieldSource::Formula { name, meta });
    }

    fields
}

fn resolve_column(
    model: &DbtModel,
    column: &DbtColumn,
    dialect: Dialect,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<SemanticType> {
    let semantic = TypeCatalog::resolve(dialect, column.data_type.as_deref());

    if let (None, Some(native)) = (semantic, column.data_type.as_deref()) {
        let diagnostic =
            Diagnostic::unmapped_column_type(dialect, &model.unique_id, &column.name, native);
        tracing::warn!("{}", diagnostic.message);
        diagnostics.push(diagnostic);
    }

    semantic
}

fn resolve_model_dimension(
    model: &DbtModel,
    index: usize,
    name: &str,
    meta: &DimensionMeta,
    dialect: Dialect,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<SemanticType> {
    let semantic = TypeCatalog::resolve(dialect, meta.data_type.as_deref());

    if let (None, Some(native)) = (semantic, meta.data_type.as_deref()) {
        let diagnostic = Diagnostic::new(
            DiagnosticCode::UnmappedDimensionType,
            Severity::Warn,
            format!(
                "Dimension type {} not supported for conversion from {} to looker. \
                 No dimension will be created for config.meta.dimensions[{}] '{}'.",
                native, dialect, index, name
            ),
        )
        .with_model(&model.unique_id)
        .with_dialect(dialect);
        tracing::warn!("{}", diagnostic.message);
        diagnostics.push(diagnostic);
    }

    semantic
}

/// Where a field's defaults come from
enum FieldSource<'a> {
    Column(&'a DbtColumn),
    Formula { name: &'a str, meta: &'a DimensionMeta },
}

impl FieldSource<'_> {
    fn meta(&self) -> &DimensionMeta {
        match self {
            Self::Column(column) => &column.meta.dimension,
            Self::Formula { meta, .. } => meta,
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Column(column) => non_empty(column.meta.dimension.name.as_deref())
                .unwrap_or(&column.name)
                .to_string(),
            Self::Formula { name, .. } => name.to_string(),
        }
    }

    fn sql(&self) -> Option<String> {
        let sql = non_empty(self.meta().sql.as_deref()).map(str::to_string);
        match self {
            Self::Column(column) => sql.or_else(|| Some(table_reference(&column.name))),
            Self::Formula { .. } => sql,
        }
    }

    fn description(&self) -> String {
        let fallback = match self {
            Self::Column(column) => column.description.as_str(),
            Self::Formula { .. } => "",
        };
        let description = non_empty(self.meta().description.as_deref()).unwrap_or(fallback);
        indent_description(description, DESCRIPTION_INDENT)
    }

    fn dimension_group(&self, datatype: SemanticType) -> DimensionGroup {
        let meta = self.meta();
        let timeframes = meta
            .timeframes
            .as_ref()
            .filter(|t| !t.is_empty())
            .cloned()
            .unwrap_or_else(|| TIMEFRAMES.iter().map(|t| t.to_string()).collect());

        DimensionGroup {
            name: self.name(),
            datatype,
            sql: self.sql(),
            description: self.description(),
            timeframes,
            label: meta.label.clone(),
            view_label: meta.view_label.clone(),
            convert_tz: meta.convert_tz.filter(|c| *c == YesNo::No),
        }
    }

    fn dimension(&self, field_type: SemanticType) -> Dimension {
        let meta = self.meta();
        let numeric = field_type == SemanticType::Number;

        Dimension {
            name: self.name(),
            field_type,
            sql: self.sql(),
            description: self.description(),
            hidden: meta.hidden,
            value_format_name: meta.value_format_name.filter(|_| numeric),
            value_format: meta.value_format.clone().filter(|_| numeric),
            label: meta.label.clone(),
            group_label: meta.group_label.clone(),
            group_item_label: meta.group_item_label.clone(),
            view_label: meta.view_label.clone(),
            suggestions: meta.suggestions.clone(),
            required_access_grants: meta.required_access_grants.clone(),
            primary_key: meta.primary_key,
        }
    }
}

/// Default SQL for a field backed by a column of the view's table
pub fn table_reference(column: &str) -> String {
    format!("${{TABLE}}.{}", column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use looksmith_dbt::ValueFormatName;
    use pretty_assertions::assert_eq;

    fn model(columns: Vec<DbtColumn>) -> DbtModel {
        DbtModel {
            unique_id: "model.shop.orders".to_string(),
            name: "orders".to_string(),
            schema: "analytics".to_string(),
            relation_name: Some("\"shop\".\"analytics\".\"orders\"".to_string()),
            description: String::new(),
            columns: columns.into_iter().map(|c| (c.name.clone(), c)).collect(),
            tags: Vec::new(),
            meta: Default::default(),
        }
    }

    fn enabled(enabled: Option<bool>) -> DimensionMeta {
        DimensionMeta {
            enabled,
            ..Default::default()
        }
    }

    #[test]
    fn classify_policy() {
        use FieldKind::*;
        use SemanticType::*;

        assert_eq!(classify(Some(Timestamp), &enabled(None)), DimensionGroup(Timestamp));
        assert_eq!(classify(Some(DateTime), &enabled(None)), DimensionGroup(DateTime));
        assert_eq!(classify(Some(Timestamp), &enabled(Some(false))), Skipped);

        assert_eq!(classify(Some(Date), &enabled(None)), Skipped);
        assert_eq!(classify(Some(Date), &enabled(Some(true))), DimensionGroup(Date));

        assert_eq!(classify(Some(Number), &enabled(None)), Dimension(Number));
        assert_eq!(classify(Some(String), &enabled(Some(false))), Skipped);
        assert_eq!(classify(None, &enabled(Some(true))), Skipped);
    }

    #[test]
    fn string_column_defaults() {
        let column = DbtColumn::new("status")
            .with_type("text")
            .with_description("Order status");
        let mut diagnostics = Vec::new();

        let fields = classify_model(&model(vec![column]), Dialect::Postgres, &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert!(fields.dimension_groups.is_empty());
        assert_eq!(fields.dimensions.len(), 1);
        let dimension = &fields.dimensions[0];
        assert_eq!(dimension.name, "status");
        assert_eq!(dimension.field_type, SemanticType::String);
        assert_eq!(dimension.sql.as_deref(), Some("${TABLE}.status"));
        assert_eq!(dimension.description, "Order status");
        assert_eq!(dimension.hidden, None);
    }

    #[test]
    fn timestamp_column_gets_full_timeframes() {
        let column = DbtColumn::new("created_at").with_type("TIMESTAMP");
        let mut diagnostics = Vec::new();

        let fields = classify_model(&model(vec![column]), Dialect::Postgres, &mut diagnostics);

        assert!(fields.dimensions.is_empty());
        let group = &fields.dimension_groups[0];
        assert_eq!(group.name, "created_at");
        assert_eq!(group.datatype, SemanticType::Timestamp);
        assert_eq!(group.timeframes, TIMEFRAMES.to_vec());
        assert_eq!(group.convert_tz, None);
    }

    #[test]
    fn convert_tz_only_kept_when_disabled() {
        let mut column = DbtColumn::new("created_at").with_type("timestamp");
        column.meta.dimension.convert_tz = Some(YesNo::Yes);
        let mut diagnostics = Vec::new();
        let fields = classify_model(&model(vec![column.clone()]), Dialect::Postgres, &mut diagnostics);
        assert_eq!(fields.dimension_groups[0].convert_tz, None);

        column.meta.dimension.convert_tz = Some(YesNo::No);
        let fields = classify_model(&model(vec![column]), Dialect::Postgres, &mut diagnostics);
        assert_eq!(fields.dimension_groups[0].convert_tz, Some(YesNo::No));
    }

    #[test]
    fn unknown_type_warns_once() {
        let column = DbtColumn::new("shape").with_type("GEOGRAPHY");
        let mut diagnostics = Vec::new();

        let fields = classify_model(&model(vec![column]), Dialect::Postgres, &mut diagnostics);

        assert!(fields.dimensions.is_empty());
        assert!(fields.dimension_groups.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnmappedColumnType);
        assert_eq!(diagnostics[0].column.as_deref(), Some("shape"));
        assert!(diagnostics[0].message.contains("postgres"));
    }

    #[test]
    fn untyped_column_is_silent() {
        let mut diagnostics = Vec::new();
        let fields = classify_model(
            &model(vec![DbtColumn::new("mystery")]),
            Dialect::Postgres,
            &mut diagnostics,
        );

        assert!(fields.dimensions.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn value_format_only_for_numbers() {
        let mut amount = DbtColumn::new("amount").with_type("numeric");
        amount.meta.dimension.value_format_name = Some(ValueFormatName::Usd);
        let mut status = DbtColumn::new("status").with_type("text");
        status.meta.dimension.value_format_name = Some(ValueFormatName::Usd);
        let mut diagnostics = Vec::new();

        let fields = classify_model(&model(vec![amount, status]), Dialect::Postgres, &mut diagnostics);

        assert_eq!(fields.dimensions[0].value_format_name, Some(ValueFormatName::Usd));
        assert_eq!(fields.dimensions[1].value_format_name, None);
    }

    #[test]
    fn model_dimensions_follow_columns() {
        let mut orders = model(vec![DbtColumn::new("id").with_type("integer")]);
        orders.meta.dimensions = vec![
            DimensionMeta {
                name: Some("is_large".to_string()),
                data_type: Some("boolean".to_string()),
                sql: Some("${TABLE}.amount > 100".to_string()),
                ..Default::default()
            },
            DimensionMeta {
                name: Some("geo".to_string()),
                data_type: Some("geometry".to_string()),
                ..Default::default()
            },
        ];
        let mut diagnostics = Vec::new();

        let fields = classify_model(&orders, Dialect::Postgres, &mut diagnostics);

        let names: Vec<&str> = fields.dimensions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["id", "is_large"]);
        assert_eq!(fields.dimensions[1].sql.as_deref(), Some("${TABLE}.amount > 100"));
        assert_eq!(fields.dimensions[1].field_type, SemanticType::YesNo);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnmappedDimensionType);
    }

    #[test]
    fn model_dimension_without_sql_has_no_sql() {
        let mut orders = model(Vec::new());
        orders.meta.dimensions = vec![DimensionMeta {
            name: Some("region".to_string()),
            data_type: Some("text".to_string()),
            ..Default::default()
        }];
        let mut diagnostics = Vec::new();

        let fields = classify_model(&orders, Dialect::Postgres, &mut diagnostics);

        assert_eq!(fields.dimensions[0].name, "region");
        assert_eq!(fields.dimensions[0].sql, None);
        assert!(!fields.dimensions[0].to_block().has("sql"));
    }

    #[test]
    fn dimension_groups_keep_column_order() {
        let mut day = DbtColumn::new("d").with_type("date");
        day.meta.dimension.enabled = Some(true);
        let ts = DbtColumn::new("ts").with_type("timestamp");
        let mut diagnostics = Vec::new();

        let fields = classify_model(&model(vec![day, ts]), Dialect::Postgres, &mut diagnostics);

        let groups: Vec<(&str, SemanticType)> = fields
            .dimension_groups
            .iter()
            .map(|g| (g.name.as_str(), g.datatype))
            .collect();
        assert_eq!(
            groups,
            vec![("d", SemanticType::Date), ("ts", SemanticType::Timestamp)]
        );
    }
}
