//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Item scores are stored as
//! plain integers and range-checked again on the way out.

use chrono::{DateTime, Utc};
use phq9_core::{
  answers::{ITEM_COUNT, ItemScore},
  submission::{NewSubmission, Submission},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Owned column values for one INSERT, built before entering the connection
/// thread.
pub struct RowParams {
  pub patient_identifier: String,
  pub submitted_at:       String,
  pub items:              [u8; ITEM_COUNT],
  pub difficulty:         Option<u8>,
  pub total_score:        u8,
}

impl RowParams {
  pub fn from_new(input: &NewSubmission) -> Self {
    Self {
      patient_identifier: input.patient_identifier.clone(),
      submitted_at:       encode_dt(input.submitted_at),
      items:              input.answers.items().map(ItemScore::value),
      difficulty:         input.answers.difficulty.map(ItemScore::value),
      total_score:        input.total_score(),
    }
  }
}

/// The column list shared by every SELECT that builds a [`RawSubmission`].
pub const SUBMISSION_COLUMNS: &str = "id, patient_identifier, submitted_at, sequence_number, \
   item1, item2, item3, item4, item5, item6, item7, item8, item9, difficulty, total_score";

/// Raw values read directly from a `phq9_responses` row.
pub struct RawSubmission {
  pub id:                 i64,
  pub patient_identifier: String,
  pub submitted_at:       String,
  pub sequence_number:    i64,
  pub items:              [i64; ITEM_COUNT],
  pub difficulty:         Option<i64>,
  pub total_score:        i64,
}

impl RawSubmission {
  /// Map a row selected with [`SUBMISSION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let mut items = [0i64; ITEM_COUNT];
    for (i, item) in items.iter_mut().enumerate() {
      *item = row.get(4 + i)?;
    }
    Ok(Self {
      id: row.get(0)?,
      patient_identifier: row.get(1)?,
      submitted_at: row.get(2)?,
      sequence_number: row.get(3)?,
      items,
      difficulty: row.get(13)?,
      total_score: row.get(14)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    let id = self.id;
    let corrupt = |reason: String| Error::CorruptRow { id, reason };

    let score = |value: i64| {
      u8::try_from(value)
        .ok()
        .and_then(ItemScore::new)
        .ok_or_else(|| corrupt(format!("item value {value} out of range")))
    };

    let item_scores: [ItemScore; ITEM_COUNT] = self
      .items
      .into_iter()
      .map(&score)
      .collect::<Result<Vec<_>>>()?
      .try_into()
      .map_err(|_| corrupt("wrong item count".to_owned()))?;

    Ok(Submission {
      id,
      patient_identifier: self.patient_identifier,
      submitted_at: decode_dt(&self.submitted_at)?,
      sequence_number: u32::try_from(self.sequence_number)
        .map_err(|_| corrupt(format!("sequence number {}", self.sequence_number)))?,
      item_scores,
      functional_difficulty: self.difficulty.map(&score).transpose()?,
      total_score: u8::try_from(self.total_score)
        .map_err(|_| corrupt(format!("total score {}", self.total_score)))?,
    })
  }
}
