//! The typed answers record.
//!
//! The nine PHQ-9 items are scored on the same four-point frequency scale;
//! the functional-difficulty item uses its own four-point scale and is not
//! part of the total. Every value is range-checked when it is constructed,
//! so nothing downstream ever sees a value outside `0..=3`.

use serde::{Deserialize, Serialize};

use crate::{ValidationError, score};

/// Number of scored items in the questionnaire.
pub const ITEM_COUNT: usize = 9;

// ─── ItemScore ───────────────────────────────────────────────────────────────

/// A single answer in the closed range `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ItemScore(u8);

impl ItemScore {
  pub const MAX: u8 = 3;

  pub fn new(value: u8) -> Option<Self> {
    (value <= Self::MAX).then_some(Self(value))
  }

  pub fn value(self) -> u8 { self.0 }
}

impl TryFrom<i64> for ItemScore {
  type Error = ValidationError;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    u8::try_from(value)
      .ok()
      .and_then(Self::new)
      .ok_or(ValidationError::OutOfRange(value))
  }
}

impl From<ItemScore> for u8 {
  fn from(score: ItemScore) -> Self { score.0 }
}

// ─── Answers ─────────────────────────────────────────────────────────────────

/// Exactly nine scored items plus the optional functional-difficulty item.
///
/// Unknown keys are rejected. The `q1`..`q9` spellings are accepted as
/// aliases for `item1`..`item9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Answers {
  #[serde(alias = "q1")]
  pub item1:      ItemScore,
  #[serde(alias = "q2")]
  pub item2:      ItemScore,
  #[serde(alias = "q3")]
  pub item3:      ItemScore,
  #[serde(alias = "q4")]
  pub item4:      ItemScore,
  #[serde(alias = "q5")]
  pub item5:      ItemScore,
  #[serde(alias = "q6")]
  pub item6:      ItemScore,
  #[serde(alias = "q7")]
  pub item7:      ItemScore,
  #[serde(alias = "q8")]
  pub item8:      ItemScore,
  #[serde(alias = "q9")]
  pub item9:      ItemScore,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<ItemScore>,
}

impl Answers {
  pub fn from_items(items: [ItemScore; ITEM_COUNT], difficulty: Option<ItemScore>) -> Self {
    let [item1, item2, item3, item4, item5, item6, item7, item8, item9] = items;
    Self { item1, item2, item3, item4, item5, item6, item7, item8, item9, difficulty }
  }

  /// The nine scored items in questionnaire order.
  pub fn items(&self) -> [ItemScore; ITEM_COUNT] {
    [
      self.item1, self.item2, self.item3, self.item4, self.item5,
      self.item6, self.item7, self.item8, self.item9,
    ]
  }

  pub fn total_score(&self) -> u8 { score::total_score(&self.items()) }
}
