//! API error taxonomy and its HTTP status mapping.
//!
//! Handlers return [`ApiError`] and let `?` do the conversions: validation
//! failures surface as 422 (413 for oversized PDFs), unknown ids and files
//! as 404, malformed requests as 400, and everything else as 500. Bodies are
//! always `{"error": "..."}` so the dashboard can show the message as-is.

use crate::libs::validation::ValidationError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("atendimento {0} não encontrado")]
    NotFound(i64),

    #[error("arquivo '{0}' não encontrado")]
    FileNotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("erro interno do servidor")]
    Internal(#[from] anyhow::Error),
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(ValidationError::PdfTooLarge(_)) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) | ApiError::FileNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(err) => {
                tracing::error!("internal error: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
