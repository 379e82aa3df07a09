//! Generated LookML documents
//!
//! Plain data produced once per model. Optional attributes are `Option`s;
//! `to_block` is the single place where unset attributes are dropped.

use looksmith_core::SemanticType;
use looksmith_dbt::{JoinRelationship, JoinType, MeasureFilter, MeasureType, ValueFormatName, YesNo};
use looksmith_lkml::{dump, Block, Field, Value};

/// A `dimension_group` of `type: time`
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGroup {
    pub name: String,
    /// `date`, `datetime` or `timestamp`
    pub datatype: SemanticType,
    /// Unset only for a model-level dimension that gives no `sql`
    pub sql: Option<String>,
    pub description: String,
    pub timeframes: Vec<String>,
    pub label: Option<String>,
    pub view_label: Option<String>,
    /// Set only when timezone conversion is switched off
    pub convert_tz: Option<YesNo>,
}

impl DimensionGroup {
    /// Field name used for this group in the details set
    pub fn first_timeframe_field(&self) -> Option<String> {
        self.timeframes
            .first()
            .map(|timeframe| format!("{}_{}", self.name, timeframe))
    }

    pub fn to_block(&self) -> Block {
        Block::named(&self.name)
            .bare("type", "time")
            .opt_quoted("label", self.label.as_deref())
            .opt_sql("sql", self.sql.as_deref())
            .quoted("description", &self.description)
            .bare("datatype", self.datatype.as_str())
            .list("timeframes", self.timeframes.clone())
            .opt_quoted("view_label", self.view_label.as_deref())
            .opt_bare("convert_tz", self.convert_tz.map(|c| c.as_str()))
    }
}

/// A scalar `dimension`
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    /// `number`, `yesno` or `string`
    pub field_type: SemanticType,
    pub sql: Option<String>,
    pub description: String,
    pub hidden: Option<YesNo>,
    pub value_format_name: Option<ValueFormatName>,
    pub value_format: Option<String>,
    pub label: Option<String>,
    pub group_label: Option<String>,
    pub group_item_label: Option<String>,
    pub view_label: Option<String>,
    pub suggestions: Option<Vec<String>>,
    pub required_access_grants: Option<Vec<String>>,
    pub primary_key: Option<YesNo>,
}

impl Dimension {
    pub fn to_block(&self) -> Block {
        Block::named(&self.name)
            .bare("type", self.field_type.as_str())
            .opt_sql("sql", self.sql.as_deref())
            .quoted("description", &self.description)
            .opt_bare("hidden", self.hidden.map(|h| h.as_str()))
            .opt_bare("value_format_name", self.value_format_name.map(|v| v.as_str()))
            .opt_quoted("value_format", self.value_format.as_deref())
            .opt_quoted("label", self.label.as_deref())
            .opt_quoted("group_label", self.group_label.as_deref())
            .opt_quoted("group_item_label", self.group_item_label.as_deref())
            .opt_quoted("view_label", self.view_label.as_deref())
            .opt_quoted_list("suggestions", self.suggestions.as_deref())
            .opt_list("required_access_grants", self.required_access_grants.as_deref())
            .opt_bare("primary_key", self.primary_key.map(|p| p.as_str()))
    }
}

/// An aggregation `measure`
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureField {
    pub name: String,
    pub measure_type: MeasureType,
    pub sql: String,
    pub description: String,
    pub filters: Vec<MeasureFilter>,
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

impl MeasureField {
    pub fn to_block(&self) -> Block {
        let filters = self
            .filters
            .iter()
            .map(|f| (f.field.clone(), f.expression.clone()))
            .collect();

        Block::named(&self.name)
            .bare("type", self.measure_type.as_str())
            .sql("sql", &self.sql)
            .quoted("description", &self.description)
            .pairs("filters", filters)
            .opt_bare("value_format_name", self.value_format_name.map(|v| v.as_str()))
            .opt_quoted("value_format", self.value_format.as_deref())
            .opt_quoted("group_label", self.group_label.as_deref())
            .opt_quoted("view_label", self.view_label.as_deref())
            .opt_quoted("label", self.label.as_deref())
            .opt_bare("hidden", self.hidden.map(|h| h.as_str()))
            .opt_list("drill_fields", self.drill_fields.as_deref())
            .opt_bare("list_field", self.list_field.as_deref())
            .opt_sql("sql_distinct_key", self.sql_distinct_key.as_deref())
    }
}

/// A named `set` of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub name: String,
    pub fields: Vec<String>,
}

impl FieldSet {
    pub fn to_block(&self) -> Block {
        Block::named(&self.name).list("fields", self.fields.clone())
    }
}

/// One view document
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub name: String,
    pub sql_table_name: Option<String>,
    pub dimension_groups: Vec<DimensionGroup>,
    pub dimensions: Vec<Dimension>,
    pub measures: Vec<MeasureField>,
    pub set: FieldSet,
}

impl View {
    pub fn filename(&self) -> String {
        format!("{}.view.lkml", self.name)
    }

    pub fn to_fields(&self) -> Vec<Field> {
        let view = Block::named(&self.name)
            .opt_sql("sql_table_name", self.sql_table_name.as_deref())
            .list("drill_fields", vec![format!("{}*", self.set.name)])
            .blocks("dimension_group", self.dimension_groups.iter().map(DimensionGroup::to_block))
            .blocks("dimension", self.dimensions.iter().map(Dimension::to_block))
            .blocks("measure", self.measures.iter().map(MeasureField::to_block))
            .block("set", self.set.to_block());

        vec![Field::new("view", Value::Block(view))]
    }

    pub fn render(&self) -> LookmlFile {
        LookmlFile {
            filename: self.filename(),
            contents: dump(&self.to_fields()),
        }
    }
}

/// A join inside an explore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreJoin {
    pub name: String,
    pub join_type: JoinType,
    pub relationship: JoinRelationship,
    pub sql_on: Option<String>,
    pub foreign_key: Option<String>,
    pub view_label: Option<String>,
}

impl ExploreJoin {
    pub fn to_block(&self) -> Block {
        Block::named(&self.name)
            .bare("type", self.join_type.as_str())
            .bare("relationship", self.relationship.as_str())
            .opt_sql("sql_on", self.sql_on.as_deref())
            .opt_bare("foreign_key", self.foreign_key.as_deref())
            .opt_quoted("view_label", self.view_label.as_deref())
    }
}

/// The explore of a model document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explore {
    pub name: String,
    pub label: Option<String>,
    pub view_label: Option<String>,
    pub description: Option<String>,
    pub joins: Vec<ExploreJoin>,
}

impl Explore {
    pub fn to_block(&self) -> Block {
        Block::named(&self.name)
            .opt_quoted("label", self.label.as_deref())
            .opt_quoted("view_label", self.view_label.as_deref())
            .opt_quoted("description", self.description.as_deref())
            .blocks("join", self.joins.iter().map(ExploreJoin::to_block))
    }
}

/// One model document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDocument {
    pub connection: String,
    pub include: String,
    pub explore: Explore,
}

impl ModelDocument {
    pub fn filename(&self) -> String {
        format!("{}.model.lkml", self.explore.name)
    }

    pub fn to_fields(&self) -> Vec<Field> {
        vec![
            Field::new("connection", Value::Quoted(self.connection.clone())),
            Field::new("include", Value::Quoted(self.include.clone())),
            Field::new("explore", Value::Block(self.explore.to_block())),
        ]
    }

    pub fn render(&self) -> LookmlFile {
        LookmlFile {
            filename: self.filename(),
            contents: dump(&self.to_fields()),
        }
    }
}

/// A rendered file, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookmlFile {
    pub filename: String,
    pub contents: String,
}
