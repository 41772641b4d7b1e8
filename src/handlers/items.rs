//! Item handlers: create, read, update, list.

use crate::error::AppError;
use crate::model::{ItemPatch, ListQuery, NewItem};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidArgument(format!("invalid id: {}", id_str)))
}

/// Body errors (unparseable JSON, missing content type, missing field, wrong type)
/// are validation failures, not bad requests.
fn body_to<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    if !body.is_object() {
        return Err(AppError::Validation("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

fn parse_param<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidArgument(format!("invalid value for {}: {}", key, raw)))
}

/// Build a [`ListQuery`] from raw query-string pairs. Unknown keys are ignored.
pub fn list_query_from_params(params: &HashMap<String, String>) -> Result<ListQuery, AppError> {
    let mut query = ListQuery::default();
    for (k, v) in params {
        match k.as_str() {
            "q" => query.q = Some(v.clone()),
            "min_price" => query.min_price = Some(parse_param(k, v)?),
            "max_price" => query.max_price = Some(parse_param(k, v)?),
            "limit" => query.limit = Some(parse_param(k, v)?),
            "offset" => query.offset = Some(parse_param(k, v)?),
            _ => {}
        }
    }
    Ok(query)
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let query = list_query_from_params(&params)?;
    let items = state.items.list(&query).await?;
    Ok((StatusCode::OK, Json(items)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let new_item: NewItem = body_to(payload)?;
    let item = state.items.create(new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let item = state
        .items
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {}", id)))?;
    Ok((StatusCode::OK, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch: ItemPatch = body_to(payload)?;
    let item = state
        .items
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {}", id)))?;
    Ok((StatusCode::OK, Json(item)))
}
