//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{0} is disabled")]
  Disabled(&'static str),

  /// Client input rejected by domain validation (empty fields, content
  /// over the configured limit).
  #[error("invalid input: {0}")]
  Invalid(#[from] quill_core::Error),

  #[error("post corpus error: {0}")]
  Posts(#[from] quill_posts::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if let ApiError::Store(e) = &self {
      tracing::error!(error = %e, "store operation failed");
    }
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Disabled(_) => (StatusCode::FORBIDDEN, self.to_string()),
      ApiError::Invalid(e) => (StatusCode::BAD_REQUEST, e.to_string()),
      ApiError::Posts(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Store(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
