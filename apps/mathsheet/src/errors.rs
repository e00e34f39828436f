use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::registry::RegistryError;
use crate::layout::LayoutError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Layout(LayoutError::PlacementExhausted { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "PLACEMENT_EXHAUSTED")
            }
            AppError::Layout(_) => (StatusCode::UNPROCESSABLE_ENTITY, "LAYOUT_ERROR"),
            AppError::Registry(RegistryError::UnknownGenerator { .. }) => {
                (StatusCode::NOT_FOUND, "UNKNOWN_GENERATOR")
            }
            AppError::Registry(RegistryError::TargetTooLarge { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Registry(RegistryError::InsufficientItems { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_ITEMS")
            }
            AppError::Registry(RegistryError::Bank(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "BANK_ERROR")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Layout(e) => {
                tracing::warn!("Layout failed: {e}");
                e.to_string()
            }
            AppError::Registry(RegistryError::Bank(e)) => {
                tracing::error!("Question bank error: {e}");
                "The question bank could not be read".to_string()
            }
            AppError::Registry(e) => e.to_string(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
