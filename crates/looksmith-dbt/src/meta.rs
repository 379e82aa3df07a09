//! Looker annotations carried in dbt `meta` blocks
//!
//! Column-level `meta` may define measures and a dimension override;
//! model-level `config.meta` may define joins, explore labels and
//! formula dimensions. Enum-valued attributes are checked for membership
//! when the manifest node is deserialized.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// LookML measure types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureType {
    Number,
    String,
    Average,
    AverageDistinct,
    Count,
    CountDistinct,
    List,
    Max,
    Median,
    MedianDistinct,
    Min,
    Sum,
    SumDistinct,
}

impl MeasureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Average => "average",
            Self::AverageDistinct => "average_distinct",
            Self::Count => "count",
            Self::CountDistinct => "count_distinct",
            Self::List => "list",
            Self::Max => "max",
            Self::Median => "median",
            Self::MedianDistinct => "median_distinct",
            Self::Min => "min",
            Self::Sum => "sum",
            Self::SumDistinct => "sum_distinct",
        }
    }
}

impl std::fmt::Display for MeasureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Explore join types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    #[default]
    LeftOuter,
    FullOuter,
    Inner,
    Cross,
}

impl JoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftOuter => "left_outer",
            Self::FullOuter => "full_outer",
            Self::Inner => "inner",
            Self::Cross => "cross",
        }
    }
}

/// Explore join cardinality
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinRelationship {
    #[default]
    ManyToOne,
    ManyToMany,
    OneToMany,
    OneToOne,
}

impl JoinRelationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManyToOne => "many_to_one",
            Self::ManyToMany => "many_to_many",
            Self::OneToMany => "one_to_many",
            Self::OneToOne => "one_to_one",
        }
    }
}

/// Built-in LookML value formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormatName {
    #[serde(rename = "decimal_0")]
    Decimal0,
    #[serde(rename = "decimal_1")]
    Decimal1,
    #[serde(rename = "decimal_2")]
    Decimal2,
    #[serde(rename = "decimal_3")]
    Decimal3,
    #[serde(rename = "decimal_4")]
    Decimal4,
    #[serde(rename = "usd_0")]
    Usd0,
    Usd,
    #[serde(rename = "gbp_0")]
    Gbp0,
    Gbp,
    #[serde(rename = "eur_0")]
    Eur0,
    Eur,
    Id,
    #[serde(rename = "percent_0")]
    Percent0,
    #[serde(rename = "percent_1")]
    Percent1,
    #[serde(rename = "percent_2")]
    Percent2,
    #[serde(rename = "percent_3")]
    Percent3,
    #[serde(rename = "percent_4")]
    Percent4,
}

impl ValueFormatName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal0 => "decimal_0",
            Self::Decimal1 => "decimal_1",
            Self::Decimal2 => "decimal_2",
            Self::Decimal3 => "decimal_3",
            Self::Decimal4 => "decimal_4",
            Self::Usd0 => "usd_0",
            Self::Usd => "usd",
            Self::Gbp0 => "gbp_0",
            Self::Gbp => "gbp",
            Self::Eur0 => "eur_0",
            Self::Eur => "eur",
            Self::Id => "id",
            Self::Percent0 => "percent_0",
            Self::Percent1 => "percent_1",
            Self::Percent2 => "percent_2",
            Self::Percent3 => "percent_3",
            Self::Percent4 => "percent_4",
        }
    }
}

/// LookML `yes` / `no` flag
///
/// dbt reads YAML 1.1, where an unquoted `yes` becomes `true`, so both
/// booleans and the literal strings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "YesNoRepr")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YesNoRepr {
    Bool(bool),
    Text(String),
}

impl TryFrom<YesNoRepr> for YesNo {
    type Error = String;

    fn try_from(repr: YesNoRepr) -> Result<Self, Self::Error> {
        match repr {
            YesNoRepr::Bool(true) => Ok(Self::Yes),
            YesNoRepr::Bool(false) => Ok(Self::No),
            YesNoRepr::Text(text) => match text.as_str() {
                "yes" => Ok(Self::Yes),
                "no" => Ok(Self::No),
                other => Err(format!("expected `yes` or `no`, got `{other}`")),
            },
        }
    }
}

/// Dimension override on a column, or a formula dimension on a model
///
/// Every attribute is optional; unset attributes fall back to values
/// derived from the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionMeta {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub hidden: Option<YesNo>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub value_format_name: Option<ValueFormatName>,
    #[serde(default)]
    pub value_format: Option<String>,
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(default)]
    pub group_item_label: Option<String>,
    #[serde(default)]
    pub view_label: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Native type of a model-level dimension
    #[serde(default, rename = "type")]
    pub data_type: Option<String>,
    #[serde(default)]
    pub convert_tz: Option<YesNo>,
    #[serde(default)]
    pub timeframes: Option<Vec<String>>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub required_access_grants: Option<Vec<String>>,
    #[serde(default)]
    pub primary_key: Option<YesNo>,
}

impl DimensionMeta {
    /// Scalar dimensions are opt-out
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }

    /// Date-only dimension groups are opt-in
    pub fn is_explicitly_enabled(&self) -> bool {
        self.enabled == Some(true)
    }
}

/// A measure exactly as written in `meta`, before filter validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMeasure {
    #[serde(rename = "type")]
    pub measure_type: MeasureType,
    #[serde(default)]
    pub filters: Option<Vec<IndexMap<String, String>>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub value_format_name: Option<ValueFormatName>,
    #[serde(default)]
    pub value_format: Option<String>,
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(default)]
    pub view_label: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub hidden: Option<YesNo>,
    #[serde(default)]
    pub drill_fields: Option<Vec<String>>,
    #[serde(default)]
    pub list_field: Option<String>,
    #[serde(default)]
    pub sql_distinct_key: Option<String>,
}

/// Column `meta` as written, with its four synonym measure maps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawColumnMeta {
    #[serde(default)]
    pub measures: IndexMap<String, RawMeasure>,
    #[serde(default)]
    pub measure: IndexMap<String, RawMeasure>,
    #[serde(default)]
    pub metrics: IndexMap<String, RawMeasure>,
    #[serde(default)]
    pub metric: IndexMap<String, RawMeasure>,
    #[serde(default)]
    pub dimension: DimensionMeta,
}

/// A join from the model's explore to another view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinMeta {
    /// Name of the joined view
    pub join: String,
    #[serde(default, rename = "type")]
    pub join_type: JoinType,
    #[serde(default)]
    pub relationship: JoinRelationship,
    #[serde(default)]
    pub sql_on: Option<String>,
    #[serde(default)]
    pub foreign_key: Option<String>,
    #[serde(default)]
    pub view_label: Option<String>,
}

/// Model-level `config.meta`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    #[serde(default)]
    pub joins: Vec<JoinMeta>,
    #[serde(default)]
    pub view_name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub view_label: Option<String>,
    #[serde(default)]
    pub dimensions: Vec<DimensionMeta>,
}
