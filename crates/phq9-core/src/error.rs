//! Error types for `phq9-core`.

use thiserror::Error;

/// Input rejected at the intake boundary. Always the client's fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("item value {0} is outside the range 0..=3")]
  OutOfRange(i64),

  #[error("malformed request body: {0}")]
  Malformed(String),
}

/// A value could not be mapped onto its canonical label set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
  #[error("{field} has value {value}, which has no canonical label")]
  LabelOutOfRange { field: &'static str, value: u8 },
}

/// Failure of a submission after it passed validation.
///
/// `Notification` is the only variant raised after the row has been
/// committed; the caller still reports it as a failed submission.
#[derive(Debug, Error)]
pub enum SubmitError {
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("render error: {0}")]
  Render(#[from] RenderError),

  #[error("notification error: {0}")]
  Notification(#[source] Box<dyn std::error::Error + Send + Sync>),
}
