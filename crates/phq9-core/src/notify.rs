//! The [`Notifier`] trait: delivery of a rendered report to the clinician.

use std::future::Future;

use serde::Serialize;

/// A rendered report addressed to the clinician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
  pub patient_identifier: String,
  pub sequence_number:    u32,
  pub subject:            String,
  pub body:               String,
}

/// Outbound delivery of a [`Notification`].
///
/// Implementations make exactly one delivery attempt per call. There is no
/// retry and no queue; a failure is returned to the caller as-is.
pub trait Notifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn notify<'a>(
    &'a self,
    notification: &'a Notification,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
