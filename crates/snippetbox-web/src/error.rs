use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use snippetbox_core::{CoreError, SnippetId, StorageError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Request failed validation (400).
    Validation(String),
    /// No live snippet with this id (404).
    NotFound(SnippetId),
    /// Store failure (500, logged, details withheld).
    Storage(StorageError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": message
                }),
            ),
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("snippet {id} not found")
                }),
            ),
            Self::Storage(e) => {
                tracing::error!(error = %e, "snippet store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Malformed, mistyped or incomplete JSON bodies are reported like any
/// other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}
