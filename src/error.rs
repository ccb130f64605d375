use crate::i18n::DictionaryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);

        let body = Json(json!({ "error": "internal server error" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
