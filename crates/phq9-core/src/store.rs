//! The `ResponseStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `phq9-store-sqlite`).
//! The server depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::submission::{Appended, NewSubmission, Submission};

/// Abstraction over the append-only submission history.
///
/// Rows are never updated or deleted. All methods return `Send` futures so
/// the trait can be used from axum handlers.
pub trait ResponseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Number of stored submissions for `patient`.
  fn count_for_patient<'a>(
    &'a self,
    patient: &'a str,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + 'a;

  /// Total score of the most recent (highest id) submission for `patient`.
  fn latest_score<'a>(
    &'a self,
    patient: &'a str,
  ) -> impl Future<Output = Result<Option<u8>, Self::Error>> + Send + 'a;

  /// Every submission for `patient`, oldest first.
  fn history<'a>(
    &'a self,
    patient: &'a str,
  ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send + 'a;

  /// Whether the backing store is present and answering.
  fn is_reachable(&self) -> impl Future<Output = bool> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a row with a caller-computed `sequence_number`.
  ///
  /// Not atomic with the reads above; the intake pipeline uses
  /// [`append`](Self::append) instead.
  fn insert(
    &self,
    input: NewSubmission,
    sequence_number: u32,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// Count prior submissions, read the latest prior score, and insert the
  /// new row as one atomic step.
  ///
  /// Two concurrent appends for the same patient never share a sequence
  /// number and each sees the other's score as previous in commit order.
  fn append(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<Appended, Self::Error>> + Send + '_;
}
