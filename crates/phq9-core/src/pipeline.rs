//! The submission pipeline: store, score trend, render, notify.
//!
//! `Validated → Stored → Reported → Notified`. A storage failure stops before
//! anything is rendered or sent. A notification failure is returned as an
//! error even though the row is already committed; callers report it to the
//! client as a failed submission.

use serde::Serialize;
use tracing::{error, info};

use crate::{
  SubmitError,
  notify::Notifier,
  report,
  score::Trend,
  store::ResponseStore,
  submission::{Appended, NewSubmission},
};

/// What a successful submission reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
  pub submission_id:   i64,
  pub sequence_number: u32,
  pub total_score:     u8,
  pub trend:           Trend,
}

/// Run a validated submission through the rest of the pipeline.
pub async fn submit<S, N>(
  store: &S,
  notifier: &N,
  input: NewSubmission,
) -> Result<Receipt, SubmitError>
where
  S: ResponseStore,
  N: Notifier,
{
  let Appended { submission, previous_score } = store.append(input).await.map_err(|e| {
    error!(error = %e, "failed to store submission");
    SubmitError::Storage(Box::new(e))
  })?;

  info!(
    id = submission.id,
    sequence_number = submission.sequence_number,
    total_score = submission.total_score,
    "stored submission for {}",
    submission.patient_identifier,
  );

  let trend = Trend::between(previous_score, submission.total_score);

  let notification = report::notification(&submission, &trend).inspect_err(|e| {
    error!(id = submission.id, error = %e, "failed to render report");
  })?;

  notifier.notify(&notification).await.map_err(|e| {
    error!(
      id = submission.id,
      error = %e,
      "failed to notify clinician; submission is stored"
    );
    SubmitError::Notification(Box::new(e))
  })?;

  info!(id = submission.id, "clinician notified");

  Ok(Receipt {
    submission_id:   submission.id,
    sequence_number: submission.sequence_number,
    total_score:     submission.total_score,
    trend,
  })
}
