//! Structured filter criteria and their JSON wire format
//!
//! Callers send filters as a JSON array:
//!
//! ```json
//! [{"PropertyName": "Age", "Operator": "Equal", "Value": "25"}]
//! ```
//!
//! Criteria are combined with logical AND by the query engine.

use crate::core::error::QueryError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a filter criterion
///
/// The set is closed: unknown names are rejected, never ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Contains,
}

impl FilterOperator {
    /// Every operator, in wire order
    pub const ALL: [FilterOperator; 7] = [
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
        FilterOperator::GreaterThanOrEqual,
        FilterOperator::LessThanOrEqual,
        FilterOperator::Contains,
    ];

    /// Wire name of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Equal => "Equal",
            FilterOperator::NotEqual => "NotEqual",
            FilterOperator::GreaterThan => "GreaterThan",
            FilterOperator::LessThan => "LessThan",
            FilterOperator::GreaterThanOrEqual => "GreaterThanOrEqual",
            FilterOperator::LessThanOrEqual => "LessThanOrEqual",
            FilterOperator::Contains => "Contains",
        }
    }

    /// Whether the operator needs an orderable field type
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            FilterOperator::GreaterThan
                | FilterOperator::LessThan
                | FilterOperator::GreaterThanOrEqual
                | FilterOperator::LessThanOrEqual
        )
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| QueryError::MalformedFilter(format!("unknown filter operator '{}'", s)))
    }
}

impl Serialize for FilterOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| {
            de::Error::custom(format!("unknown filter operator '{}'", raw))
        })
    }
}

/// One predicate: "field X relates to value V via operator O"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// Name of the field to test
    #[serde(rename = "PropertyName", alias = "propertyName")]
    pub property_name: String,

    /// Comparison to apply
    #[serde(rename = "Operator", alias = "operator")]
    pub operator: FilterOperator,

    /// Raw value, parsed into the field's type by the engine
    #[serde(
        rename = "Value",
        alias = "value",
        deserialize_with = "deserialize_raw_value"
    )]
    pub value: String,
}

impl FilterCriterion {
    pub fn new(
        property_name: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            operator,
            value: value.into(),
        }
    }

    /// Shorthand for an `Equal` criterion
    pub fn equal(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property_name, FilterOperator::Equal, value)
    }

    /// Shorthand for a `Contains` criterion
    pub fn contains(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(property_name, FilterOperator::Contains, value)
    }

    /// Parse the JSON array wire format
    ///
    /// Empty input and `null` both mean "no filters".
    pub fn parse_list(raw: &str) -> Result<Vec<FilterCriterion>, QueryError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str::<Option<Vec<FilterCriterion>>>(raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| QueryError::MalformedFilter(e.to_string()))
    }
}

// Values travel as strings; numbers and booleans are accepted for leniency.
fn deserialize_raw_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "filter value must be a string, got {}",
            other
        ))),
    }
}
