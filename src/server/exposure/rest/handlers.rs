//! Generic HTTP handlers for entity CRUD
//!
//! One set of handlers serves every entity type; the type parameter picks
//! the record struct, its field registry and its service.

use crate::config::QueryConfig;
use crate::core::entity::Data;
use crate::core::error::{RegistrarError, RequestError};
use crate::core::patch::Patch;
use crate::core::query::ListParams;
use crate::core::service::EntityService;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

/// State shared by the handlers of one entity type
pub struct CrudState<T: Data> {
    pub service: EntityService<T>,
    pub query: QueryConfig,
}

impl<T: Data> Clone for CrudState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            query: self.query.clone(),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, RequestError> {
    Uuid::parse_str(raw).map_err(|_| RequestError::InvalidId(raw.to_string()))
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, RequestError> {
    body.map(|Json(value)| value)
        .map_err(|e| RequestError::InvalidBody(e.body_text()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RequestError> {
    serde_json::from_value(value).map_err(|e| RequestError::InvalidBody(e.to_string()))
}

/// `GET /{plural}`: filter, search, sort and paginate
pub async fn list_entities<T: Data>(
    State(state): State<CrudState<T>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<T>>, RegistrarError> {
    let Query(params) = params.map_err(|e| RequestError::InvalidQuery(e.body_text()))?;
    let request = params.into_request(state.query.default_page_size)?;
    let page = state.service.get(&request, state.query.deadline()).await?;
    Ok(Json(page))
}

/// `GET /{plural}/{id}`
pub async fn get_entity<T: Data>(
    State(state): State<CrudState<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, RegistrarError> {
    let id = parse_id(&id)?;
    let entity = state.service.get_by_id(id, state.query.deadline()).await?;
    Ok(Json(entity))
}

/// `POST /{plural}`
pub async fn create_entity<T: Data>(
    State(state): State<CrudState<T>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), RegistrarError> {
    let entity: T = decode(json_body(body)?)?;
    let created = state.service.create(entity, state.query.deadline()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /{plural}/{id}`: full replacement
pub async fn update_entity<T: Data>(
    State(state): State<CrudState<T>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<T>, RegistrarError> {
    let id = parse_id(&id)?;
    let entity: T = decode(json_body(body)?)?;
    let updated = state
        .service
        .update(id, entity, state.query.deadline())
        .await?;
    Ok(Json(updated))
}

/// `PATCH /{plural}/{id}`
///
/// A JSON array is applied as RFC 6902 JSON Patch, a JSON object as an
/// RFC 7396 merge patch.
pub async fn patch_entity<T: Data>(
    State(state): State<CrudState<T>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<T>, RegistrarError> {
    let id = parse_id(&id)?;
    let patch = Patch::from_value(json_body(body)?)?;
    let patched = state
        .service
        .patch(id, &patch, state.query.deadline())
        .await?;
    Ok(Json(patched))
}

/// `DELETE /{plural}/{id}`
pub async fn delete_entity<T: Data>(
    State(state): State<CrudState<T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, RegistrarError> {
    let id = parse_id(&id)?;
    state.service.delete(id, state.query.deadline()).await?;
    Ok(StatusCode::NO_CONTENT)
}
