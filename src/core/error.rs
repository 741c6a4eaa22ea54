//! Typed error handling for the registrar data-access layer
//!
//! Every operation reports a specific error kind instead of a generic
//! `anyhow::Error`, so the HTTP layer can translate it into the right
//! status code without inspecting messages.
//!
//! # Error Categories
//!
//! - [`QueryError`]: invalid filter, search, sort or paging input
//! - [`EntityError`]: single-record CRUD failures (not found, conflicts)
//! - [`PatchError`]: partial-update documents that cannot be applied
//! - [`StorageError`]: failures of the persistence collaborator
//! - [`ConfigError`]: configuration loading and validation
//! - [`RequestError`]: malformed HTTP input outside the query contract
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get(&request, Deadline::none()).await {
//!     Ok(page) => println!("{} records", page.len()),
//!     Err(RegistrarError::Query(QueryError::UnknownField(name))) => {
//!         println!("no such field: {}", name);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use crate::core::field::FieldKind;
use crate::core::filter::FilterOperator;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

/// The main error type for the registrar crate
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    /// Invalid query input (filters, search, sort, paging)
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Entity-related errors (CRUD operations)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Patch documents that cannot be applied
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RegistrarError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistrarError::Query(_) => StatusCode::BAD_REQUEST,
            RegistrarError::Entity(e) => e.status_code(),
            RegistrarError::Patch(e) => e.status_code(),
            RegistrarError::Storage(e) => e.status_code(),
            RegistrarError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistrarError::Request(_) => StatusCode::BAD_REQUEST,
            RegistrarError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistrarError::Query(e) => e.error_code(),
            RegistrarError::Entity(e) => e.error_code(),
            RegistrarError::Patch(e) => e.error_code(),
            RegistrarError::Storage(e) => e.error_code(),
            RegistrarError::Config(_) => "CONFIG_ERROR",
            RegistrarError::Request(e) => e.error_code(),
            RegistrarError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RegistrarError::Query(QueryError::UnknownField(field)) => {
                Some(serde_json::json!({ "field": field }))
            }
            RegistrarError::Query(QueryError::InvalidFilterValue { field, value, .. }) => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            RegistrarError::Query(QueryError::UnsupportedOperator {
                field, operator, ..
            }) => Some(serde_json::json!({
                "field": field,
                "operator": operator.as_str()
            })),
            RegistrarError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            RegistrarError::Entity(EntityError::IdMismatch {
                path_id,
                payload_id,
                ..
            }) => Some(serde_json::json!({
                "path_id": path_id.to_string(),
                "payload_id": payload_id.to_string()
            })),
            _ => None,
        }
    }
}

impl IntoResponse for RegistrarError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Caller-input errors raised while validating a query
///
/// All of these are reported before any record is read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// `pageSize < 1`
    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(i64),

    /// `pageNumber < 1`
    #[error("Page number must be at least 1, got {0}")]
    InvalidPageNumber(i64),

    /// A filter, sort or search field is not declared on the entity
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// A filter value does not parse into the field's type
    #[error("Invalid value '{value}' for field '{field}' (expected {expected})")]
    InvalidFilterValue {
        field: String,
        value: String,
        expected: FieldKind,
    },

    /// The operator does not apply to the field's type
    #[error("Operator '{operator}' is not supported on field '{field}' of type {kind}")]
    UnsupportedOperator {
        field: String,
        operator: FilterOperator,
        kind: FieldKind,
    },

    /// `sortOrder` is neither "asc" nor "desc"
    #[error("Invalid sort order '{0}', expected 'asc' or 'desc'")]
    InvalidSortOrder(String),

    /// The filter list is not valid JSON or names an unknown operator
    #[error("Malformed filter: {0}")]
    MalformedFilter(String),
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidPageSize(_) => "INVALID_PAGE_SIZE",
            QueryError::InvalidPageNumber(_) => "INVALID_PAGE_NUMBER",
            QueryError::UnknownField(_) => "UNKNOWN_FIELD",
            QueryError::InvalidFilterValue { .. } => "INVALID_FILTER_VALUE",
            QueryError::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            QueryError::InvalidSortOrder(_) => "INVALID_SORT_ORDER",
            QueryError::MalformedFilter(_) => "MALFORMED_FILTER",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to single-record operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Entity already exists (conflict)
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: Uuid },

    /// The id in the request path differs from the payload's id
    #[error("{entity_type} id mismatch: path has '{path_id}', payload has '{payload_id}'")]
    IdMismatch {
        entity_type: String,
        path_id: Uuid,
        payload_id: Uuid,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
            EntityError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::IdMismatch { .. } => "ENTITY_ID_MISMATCH",
        }
    }
}

// =============================================================================
// Patch Errors
// =============================================================================

/// Errors raised while applying a partial-update document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// The document itself is malformed
    #[error("Invalid patch document: {0}")]
    InvalidDocument(String),

    /// An operation could not be applied (bad pointer, missing path)
    #[error("Patch could not be applied: {0}")]
    OperationFailed(String),

    /// A `test` operation did not match
    #[error("Patch test failed: {0}")]
    TestFailed(String),

    /// The patch tried to change the record identifier
    #[error("Patch may not change the record id")]
    IdChanged,

    /// The patched document no longer fits the record type
    #[error("Patched record is invalid: {0}")]
    InvalidResult(String),
}

impl PatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PatchError::TestFailed(_) => StatusCode::CONFLICT,
            PatchError::InvalidResult(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PatchError::InvalidDocument(_) => "INVALID_PATCH_DOCUMENT",
            PatchError::OperationFailed(_) => "PATCH_OPERATION_FAILED",
            PatchError::TestFailed(_) => "PATCH_TEST_FAILED",
            PatchError::IdChanged => "PATCH_ID_CHANGED",
            PatchError::InvalidResult(_) => "PATCH_INVALID_RESULT",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// A lock guarding shared state was poisoned
    #[error("{backend} storage lock poisoned: {message}")]
    LockPoisoned { backend: String, message: String },

    /// The caller's deadline expired before the operation completed
    #[error("Storage operation '{operation}' exceeded its deadline")]
    Timeout { operation: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::LockPoisoned { .. } => "STORAGE_LOCK_POISONED",
            StorageError::Timeout { .. } => "STORAGE_TIMEOUT",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration file '{path}': {message}")]
    IoError { path: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// A value is out of range
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    match file {
        Some(file) => format!(" '{}'", file),
        None => String::new(),
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests outside the query contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A path id is not a UUID
    #[error("Invalid id '{0}'")]
    InvalidId(String),

    /// The request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The query string could not be decoded
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidId(_) => "INVALID_ID",
            RequestError::InvalidBody(_) => "INVALID_BODY",
            RequestError::InvalidQuery(_) => "INVALID_QUERY",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for RegistrarError {
    fn from(err: anyhow::Error) -> Self {
        RegistrarError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for registrar operations
pub type RegistrarResult<T> = Result<T, RegistrarError>;

// =============================================================================
// Tests
// =============================================================================
