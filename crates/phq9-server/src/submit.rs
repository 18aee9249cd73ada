//! Handler for `POST /api/submit-phq9`.
//!
//! | Status | Body | When |
//! |--------|------|------|
//! | `200` | `{"success":true,"message":...,"sequence_number":n}` | stored and clinician notified |
//! | `400` | `{"success":false,"error":...}` | missing field, malformed JSON, item outside `0..=3` |
//! | `500` | `{"success":false,"error":...}` | storage or render failure, nothing sent |
//! | `500` | `{"success":false,"error":"failed to notify the clinician"}` | row **is stored**, email failed |
//!
//! In the last case the submission is kept; the patient sees a failure while
//! the stored row remains for the clinician.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use phq9_core::{
  ValidationError, intake::SubmissionRequest, notify::Notifier, pipeline,
  store::ResponseStore,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{AppState, error::ApiError};

pub const SUCCESS_MESSAGE: &str = "questionnaire submitted successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
  pub success:         bool,
  pub message:         String,
  pub sequence_number: u32,
}

/// `POST /api/submit-phq9`, body: [`SubmissionRequest`].
pub async fn handler<S, N>(
  State(state): State<AppState<S, N>>,
  body: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError>
where
  S: ResponseStore + 'static,
  N: Notifier + 'static,
{
  let Json(request) = body.map_err(|rejection| {
    warn!(error = %rejection.body_text(), "rejected submission body");
    ValidationError::Malformed(rejection.body_text())
  })?;

  let input = request.validate(Utc::now()).inspect_err(|e| {
    warn!(error = %e, "rejected submission");
  })?;

  let receipt = pipeline::submit(state.store.as_ref(), state.notifier.as_ref(), input).await?;

  Ok(Json(SubmitResponse {
    success:         true,
    message:         SUCCESS_MESSAGE.to_owned(),
    sequence_number: receipt.sequence_number,
  }))
}
