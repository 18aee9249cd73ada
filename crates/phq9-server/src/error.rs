//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Validation errors are the client's to fix and are returned verbatim.
//! Everything else becomes a generic 500; the cause has already been logged
//! by the pipeline.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use phq9_core::{SubmitError, ValidationError};
use serde_json::json;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";
pub const NOTIFICATION_ERROR_MESSAGE: &str = "failed to notify the clinician";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Submit(#[from] SubmitError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
      ApiError::Submit(SubmitError::Notification(_)) => {
        (StatusCode::INTERNAL_SERVER_ERROR, NOTIFICATION_ERROR_MESSAGE.to_owned())
      }
      ApiError::Submit(SubmitError::Storage(_) | SubmitError::Render(_)) => {
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_owned())
      }
    };
    (status, Json(json!({ "success": false, "error": message }))).into_response()
  }
}
