//! Field value types and the per-entity field registry
//!
//! Every entity exposes a static list of [`FieldDef`]s describing the
//! fields that can be filtered, searched and sorted by name. Values are
//! extracted through [`FieldValue`], which carries the scalar in a form the
//! query engine can compare without knowing the entity's concrete type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total order used for sorting.
    ///
    /// `Null` sorts before every other value. Floats use `total_cmp` so that
    /// sorting never panics; strings compare ordinally. Values of different
    /// kinds only meet when a registry is inconsistent and fall back to a
    /// fixed rank per variant.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    /// Case-insensitive substring test. `needle` must already be lowercase.
    ///
    /// Non-string values never match.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::String(s) => s.to_lowercase().contains(needle),
            _ => false,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) | FieldValue::Float(_) => 2,
            FieldValue::Date(_) => 3,
            FieldValue::DateTime(_) => 4,
            FieldValue::Uuid(_) => 5,
            FieldValue::String(_) => 6,
        }
    }
}

/// Declared scalar type of an entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Uuid,
    DateTime,
    Date,
}

impl FieldKind {
    /// Whether `GreaterThan`/`LessThan` and friends are meaningful
    pub fn is_orderable(self) -> bool {
        matches!(
            self,
            FieldKind::Integer | FieldKind::Float | FieldKind::DateTime | FieldKind::Date
        )
    }

    /// Whether substring matching (`Contains`, free-text search) applies
    pub fn is_textual(self) -> bool {
        matches!(self, FieldKind::String)
    }

    /// Parse a raw filter value into a value of this kind
    pub fn parse(self, raw: &str) -> Result<FieldValue, FieldParseError> {
        let err = || FieldParseError {
            kind: self,
            raw: raw.to_string(),
        };

        match self {
            FieldKind::String => Ok(FieldValue::String(raw.to_string())),
            FieldKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| err()),
            FieldKind::Float => match raw.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(FieldValue::Float(f)),
                _ => Err(err()),
            },
            FieldKind::Boolean => {
                let trimmed = raw.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(FieldValue::Boolean(true))
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(FieldValue::Boolean(false))
                } else {
                    Err(err())
                }
            }
            FieldKind::Uuid => Uuid::parse_str(raw.trim())
                .map(FieldValue::Uuid)
                .map_err(|_| err()),
            FieldKind::DateTime => parse_datetime(raw.trim())
                .map(FieldValue::DateTime)
                .ok_or_else(err),
            FieldKind::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| err()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Uuid => "uuid",
            FieldKind::DateTime => "datetime",
            FieldKind::Date => "date",
        };
        f.write_str(name)
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A raw value that does not parse into the requested kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse '{raw}' as {kind}")]
pub struct FieldParseError {
    pub kind: FieldKind,
    pub raw: String,
}

/// One entry of an entity's static field registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust field name (snake_case)
    pub name: &'static str,

    /// Declared scalar type
    pub kind: FieldKind,

    /// Whether the field is an `Option<_>`
    pub nullable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind, nullable: bool) -> Self {
        Self {
            name,
            kind,
            nullable,
        }
    }
}

/// Maps a Rust field type onto the registry's scalar kinds
///
/// Implemented for every type the entity macro accepts as a field.
pub trait FieldType {
    const KIND: FieldKind;
    const NULLABLE: bool = false;

    fn to_field_value(&self) -> FieldValue;
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::String;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl FieldType for i64 {
    const KIND: FieldKind = FieldKind::Integer;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl FieldType for i32 {
    const KIND: FieldKind = FieldKind::Integer;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl FieldType for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl FieldType for Uuid {
    const KIND: FieldKind = FieldKind::Uuid;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl FieldType for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::DateTime;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl FieldType for NaiveDate {
    const KIND: FieldKind = FieldKind::Date;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const KIND: FieldKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// Compare a declared field name with a requested one.
///
/// Matching ignores ASCII case and underscores, so `FirstName`,
/// `firstname` and `first_name` all resolve to `first_name`.
pub fn field_names_match(declared: &str, requested: &str) -> bool {
    let declared = declared
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase());
    let requested = requested
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase());
    declared.eq(requested)
}

/// Look up a field in a registry, preferring an exact name match
pub fn find_field<'a>(fields: &'a [FieldDef], requested: &str) -> Option<&'a FieldDef> {
    if requested.is_empty() {
        return None;
    }
    fields
        .iter()
        .find(|def| def.name == requested)
        .or_else(|| fields.iter().find(|def| field_names_match(def.name, requested)))
}
