use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cost_core::{Item, ItemCandidate};
use serde_json::{Value, json};

use super::body::{parse_id, parse_json};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.catalog.list().await?;
    state.sheet.lock().await.load_catalog(items.clone());
    Ok(Json(items))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.catalog.get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let candidate: ItemCandidate = parse_json(body)?;
    let id = state.catalog.create(candidate).await?;
    state.refresh_sheet_catalog().await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let candidate: ItemCandidate = parse_json(body)?;
    state.catalog.replace(id, candidate).await?;
    state.refresh_sheet_catalog().await?;
    Ok(Json(json!({ "success": true })))
}

/// Delete the item and every sheet row priced from it.
///
/// `remove_item` also drops the item from the sheet's catalog snapshot, so
/// no reload from storage follows the delete.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    state.catalog.delete(id).await?;
    state.sheet.lock().await.remove_item(id);
    Ok(Json(json!({ "success": true })))
}
