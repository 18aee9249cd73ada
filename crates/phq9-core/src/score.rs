//! Scoring, sequence numbering, and trend derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::{ITEM_COUNT, ItemScore};

/// Upper bound of the summed score: nine items at 3 each.
pub const MAX_TOTAL_SCORE: u8 = 27;

/// Sum of the nine item scores. Difficulty is never part of the total.
pub fn total_score(items: &[ItemScore; ITEM_COUNT]) -> u8 {
  items.iter().map(|i| i.value()).sum()
}

/// The 1-based ordinal of a new submission given how many the patient
/// already has.
pub fn next_sequence_number(prior_count: u32) -> u32 { prior_count + 1 }

// ─── Trend ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Increasing,
  Decreasing,
  Unchanged,
}

impl Direction {
  pub fn from_delta(delta: i16) -> Self {
    match delta.signum() {
      1 => Self::Increasing,
      -1 => Self::Decreasing,
      _ => Self::Unchanged,
    }
  }

  pub fn arrow(self) -> &'static str {
    match self {
      Self::Increasing => "↑",
      Self::Decreasing => "↓",
      Self::Unchanged => "=",
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Increasing => "increasing",
      Self::Decreasing => "decreasing",
      Self::Unchanged => "unchanged",
    })
  }
}

/// Change in total score relative to the patient's previous submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trend {
  FirstMeasurement,
  Compared { previous: u8, delta: i16, direction: Direction },
}

impl Trend {
  pub fn between(previous: Option<u8>, current: u8) -> Self {
    match previous {
      None => Self::FirstMeasurement,
      Some(previous) => {
        let delta = i16::from(current) - i16::from(previous);
        Self::Compared { previous, delta, direction: Direction::from_delta(delta) }
      }
    }
  }

  pub fn delta(&self) -> Option<i16> {
    match self {
      Self::FirstMeasurement => None,
      Self::Compared { delta, .. } => Some(*delta),
    }
  }
}

impl fmt::Display for Trend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FirstMeasurement => f.write_str("first measurement"),
      Self::Compared { delta, direction, .. } => {
        let sign = if *delta > 0 { "+" } else { "" };
        write!(
          f,
          "{} {direction} ({sign}{delta} points since the previous measurement)",
          direction.arrow(),
        )
      }
    }
  }
}
