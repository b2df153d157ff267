//! JSON routes mounted under `/api`.

mod body;
pub mod items;
pub mod sheet;

use axum::Router;
use axum::routing::{delete, get, post};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(items::list).post(items::create))
        .route(
            "/items/{id}",
            get(items::get).put(items::replace).delete(items::delete),
        )
        .route("/sheet", get(sheet::view))
        .route("/sheet/rows", post(sheet::add_row))
        .route("/sheet/rows/{index}", delete(sheet::remove_row))
        .fallback(not_found)
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
