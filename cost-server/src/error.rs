use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cost_core::calculations::SheetError;
use cost_core::{CatalogError, ValidationError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("JSON inválido.")]
    MalformedJson,

    #[error("Payload muito grande.")]
    PayloadTooLarge,

    #[error("ID inválido.")]
    InvalidId,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item não encontrado.")]
    ItemNotFound,

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("{0}")]
    Storage(String),

    #[error("Rota não encontrada.")]
    RouteNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedJson
            | ApiError::InvalidId
            | ApiError::Validation(_)
            | ApiError::Sheet(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ItemNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => ApiError::Validation(e),
            CatalogError::NotFound(_) => ApiError::ItemNotFound,
            CatalogError::Storage(e) => ApiError::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
