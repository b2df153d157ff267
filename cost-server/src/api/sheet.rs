use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cost_core::calculations::{CalculationRow, CalculationSheet, SheetTotals};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::body::{loose_decimal, loose_id, parse_json};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SheetView {
    rows: Vec<CalculationRow>,
    totals: SheetTotals,
}

impl From<&CalculationSheet> for SheetView {
    fn from(sheet: &CalculationSheet) -> Self {
        Self {
            rows: sheet.rows().to_vec(),
            totals: sheet.totals(),
        }
    }
}

/// Row request fields, read as loosely as item fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRowRequest {
    #[serde(default)]
    item_id: Value,
    #[serde(default)]
    quantidade_usada: Value,
    #[serde(default)]
    observacao: Value,
}

pub async fn view(State(state): State<AppState>) -> Json<SheetView> {
    Json(SheetView::from(&*state.sheet.lock().await))
}

pub async fn add_row(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<SheetView>), ApiError> {
    let request: AddRowRequest = parse_json(body)?;
    // Ids start at 1, so a missing id is simply an item that does not exist.
    let item_id = loose_id(&request.item_id).unwrap_or(0);
    let quantidade = loose_decimal(&request.quantidade_usada).unwrap_or_default();
    let observacao = request.observacao.as_str().map(str::to_string);

    let mut sheet = state.sheet.lock().await;
    sheet.add_row(item_id, quantidade, observacao)?;
    Ok((StatusCode::CREATED, Json(SheetView::from(&*sheet))))
}

pub async fn remove_row(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<SheetView>, ApiError> {
    let index: usize = index.trim().parse().map_err(|_| ApiError::InvalidId)?;
    let mut sheet = state.sheet.lock().await;
    if sheet.remove_row(index).is_none() {
        debug!(index, rows = sheet.len(), "row index out of range");
    }
    Ok(Json(SheetView::from(&*sheet)))
}
