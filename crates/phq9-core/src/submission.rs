//! Submission records.
//!
//! A [`NewSubmission`] is what intake produces; a [`Submission`] is the same
//! data after the store has assigned it an id and a sequence number. Stored
//! submissions are immutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::answers::{Answers, ITEM_COUNT, ItemScore};

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
  pub patient_identifier: String,
  /// Server clock at receipt.
  pub submitted_at:       DateTime<Utc>,
  pub answers:            Answers,
}

impl NewSubmission {
  pub fn total_score(&self) -> u8 { self.answers.total_score() }
}

/// One row of the append-only submission history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub id:                    i64,
  pub patient_identifier:    String,
  pub submitted_at:          DateTime<Utc>,
  /// 1-based count of this patient's submissions, including this one.
  pub sequence_number:       u32,
  pub item_scores:           [ItemScore; ITEM_COUNT],
  pub functional_difficulty: Option<ItemScore>,
  /// Sum of `item_scores` at write time; never recomputed.
  pub total_score:           u8,
}

impl Submission {
  /// Assemble the stored form of `input` once the store has assigned `id`
  /// and `sequence_number`.
  pub fn from_new(id: i64, sequence_number: u32, input: NewSubmission) -> Self {
    Self {
      id,
      total_score: input.total_score(),
      item_scores: input.answers.items(),
      functional_difficulty: input.answers.difficulty,
      patient_identifier: input.patient_identifier,
      submitted_at: input.submitted_at,
      sequence_number,
    }
  }
}

/// Result of an atomic append: the stored row plus the total score of the
/// patient's previous submission, read in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
  pub submission:     Submission,
  pub previous_score: Option<u8>,
}
