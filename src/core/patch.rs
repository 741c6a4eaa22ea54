//! Partial updates applied to a loaded record
//!
//! Two document formats are supported:
//!
//! - [`JsonPatch`]: RFC 6902 operations (`add`, `remove`, `replace`,
//!   `move`, `copy`, `test`) addressed by JSON pointers
//! - [`JsonMergePatch`]: an RFC 7396 merge document, where `null` removes
//!   a member
//!
//! Both operate on the record's JSON form; the result is deserialized back
//! into the record type. The record id is immutable.

use crate::core::entity::Data;
use crate::core::error::PatchError;
use json_patch::PatchErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A set of field-level mutations that can be applied to a record
pub trait PatchDocument: Send + Sync {
    /// Mutate the JSON form of a record in place
    fn apply_to(&self, document: &mut Value) -> Result<(), PatchError>;
}

/// RFC 6902 JSON Patch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPatch(pub json_patch::Patch);

impl JsonPatch {
    /// Parse a JSON array of patch operations
    pub fn from_value(value: Value) -> Result<Self, PatchError> {
        serde_json::from_value(value).map_err(|e| PatchError::InvalidDocument(e.to_string()))
    }
}

impl PatchDocument for JsonPatch {
    fn apply_to(&self, document: &mut Value) -> Result<(), PatchError> {
        json_patch::patch(document, &self.0.0).map_err(|e| match e.kind {
            PatchErrorKind::TestFailed => PatchError::TestFailed(e.to_string()),
            _ => PatchError::OperationFailed(e.to_string()),
        })
    }
}

/// RFC 7396 JSON Merge Patch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonMergePatch(pub Value);

impl JsonMergePatch {
    /// A merge document must be a JSON object to address record fields
    pub fn from_value(value: Value) -> Result<Self, PatchError> {
        if !value.is_object() {
            return Err(PatchError::InvalidDocument(
                "merge patch must be a JSON object".to_string(),
            ));
        }
        Ok(Self(value))
    }
}

impl PatchDocument for JsonMergePatch {
    fn apply_to(&self, document: &mut Value) -> Result<(), PatchError> {
        json_patch::merge(document, &self.0);
        Ok(())
    }
}

/// Either patch format, chosen from the shape of the request body
///
/// A JSON array is a [`JsonPatch`]; a JSON object is a [`JsonMergePatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    Json(JsonPatch),
    Merge(JsonMergePatch),
}

impl Patch {
    pub fn from_value(value: Value) -> Result<Self, PatchError> {
        match value {
            Value::Array(_) => JsonPatch::from_value(value).map(Patch::Json),
            Value::Object(_) => JsonMergePatch::from_value(value).map(Patch::Merge),
            other => Err(PatchError::InvalidDocument(format!(
                "expected a JSON Patch array or a merge patch object, got {}",
                other
            ))),
        }
    }
}

impl PatchDocument for Patch {
    fn apply_to(&self, document: &mut Value) -> Result<(), PatchError> {
        match self {
            Patch::Json(patch) => patch.apply_to(document),
            Patch::Merge(patch) => patch.apply_to(document),
        }
    }
}

/// Apply `patch` to a copy of `record`
///
/// Fails with [`PatchError::IdChanged`] when the patched record carries a
/// different id.
pub fn apply_patch<T, P>(record: &T, patch: &P) -> Result<T, PatchError>
where
    T: Data,
    P: PatchDocument + ?Sized,
{
    let mut document =
        serde_json::to_value(record).map_err(|e| PatchError::InvalidResult(e.to_string()))?;

    patch.apply_to(&mut document)?;

    let patched: T =
        serde_json::from_value(document).map_err(|e| PatchError::InvalidResult(e.to_string()))?;

    if patched.id() != record.id() {
        return Err(PatchError::IdChanged);
    }
    Ok(patched)
}
