//! Plain-text clinical report.
//!
//! The layout is fixed: patient block, total score, the nine answers in
//! questionnaire order, functional impact, trend line. Every answer is
//! rendered as `<label> (<value>)` from its canonical label set.

use std::fmt::Write as _;

use crate::{
  RenderError,
  answers::{ITEM_COUNT, ItemScore},
  notify::Notification,
  score::{MAX_TOTAL_SCORE, Trend},
  submission::Submission,
};

pub const FREQUENCY_LABELS: [&str; 4] =
  ["Not at all", "Several days", "More than half the days", "Nearly every day"];

pub const DIFFICULTY_LABELS: [&str; 4] = [
  "Not difficult at all",
  "Somewhat difficult",
  "Very difficult",
  "Extremely difficult",
];

/// Short captions for the nine items, in questionnaire order.
pub const ITEM_CAPTIONS: [&str; ITEM_COUNT] = [
  "Little interest or pleasure in doing things",
  "Feeling down, depressed, or hopeless",
  "Trouble sleeping, or sleeping too much",
  "Feeling tired or having little energy",
  "Poor appetite or overeating",
  "Feeling bad about oneself",
  "Trouble concentrating",
  "Moving or speaking slowly, or being restless",
  "Thoughts of death or self-harm",
];

fn labelled(field: &'static str, value: u8, labels: &[&str; 4]) -> Result<String, RenderError> {
  labels
    .get(usize::from(value))
    .map(|label| format!("{label} ({value})"))
    .ok_or(RenderError::LabelOutOfRange { field, value })
}

fn labelled_item(field: &'static str, score: ItemScore) -> Result<String, RenderError> {
  labelled(field, score.value(), &FREQUENCY_LABELS)
}

/// Subject line of the clinician email.
pub fn subject(submission: &Submission) -> String {
  format!(
    "PHQ-9 #{} - {}",
    submission.sequence_number, submission.patient_identifier
  )
}

/// Render the report body for `submission`.
pub fn render(submission: &Submission, trend: &Trend) -> Result<String, RenderError> {
  const FIELDS: [&str; ITEM_COUNT] =
    ["item1", "item2", "item3", "item4", "item5", "item6", "item7", "item8", "item9"];

  let difficulty = match submission.functional_difficulty {
    Some(d) => labelled("difficulty", d.value(), &DIFFICULTY_LABELS)?,
    None => "not answered".to_owned(),
  };

  let mut out = String::new();
  // Writing into a String cannot fail.
  let _ = write!(
    out,
    "PHQ-9 REPORT - CLINICAL FOLLOW-UP\n\
     =================================\n\
     \n\
     PATIENT INFORMATION:\n\
     - Patient: {patient}\n\
     - Date and time: {when}\n\
     - Measurement number: PHQ-9 #{seq}\n\
     \n\
     CURRENT SCORE:\n\
     - PHQ-9 total score: {total}/{MAX_TOTAL_SCORE}\n\
     \n\
     CURRENT ANSWERS:\n",
    patient = submission.patient_identifier,
    when = submission.submitted_at.format("%d/%m/%Y %H:%M:%S UTC"),
    seq = submission.sequence_number,
    total = submission.total_score,
  );

  for (i, score) in submission.item_scores.iter().enumerate() {
    let answer = labelled_item(FIELDS[i], *score)?;
    let _ = writeln!(out, "{}. {}: {answer}", i + 1, ITEM_CAPTIONS[i]);
  }

  let _ = write!(
    out,
    "\n\
     FUNCTIONAL IMPACT:\n\
     - Difficulty with daily activities: {difficulty}\n\
     \n\
     TREND: {trend}\n\
     \n\
     --- End of report ---\n\
     This report is confidential and intended solely for clinical review.\n"
  );

  Ok(out)
}

/// Build the clinician notification for a stored submission.
pub fn notification(submission: &Submission, trend: &Trend) -> Result<Notification, RenderError> {
  Ok(Notification {
    patient_identifier: submission.patient_identifier.clone(),
    sequence_number:    submission.sequence_number,
    subject:            subject(submission),
    body:               render(submission, trend)?,
  })
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn submission(values: [u8; ITEM_COUNT], difficulty: Option<u8>) -> Submission {
    let items = values.map(|v| ItemScore::new(v).unwrap());
    Submission {
      id:                    7,
      patient_identifier:    "patient@example.com".into(),
      submitted_at:          Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 30).unwrap(),
      sequence_number:       3,
      item_scores:           items,
      functional_difficulty: difficulty.and_then(ItemScore::new),
      total_score:           crate::score::total_score(&items),
    }
  }

  #[test]
  fn report_contains_header_fields() {
    let s      = submission([0, 1, 2, 3, 0, 1, 2, 3, 0], Some(1));
    let report = render(&s, &Trend::FirstMeasurement).unwrap();

    assert!(report.contains("- Patient: patient@example.com"), "{report}");
    assert!(report.contains("- Date and time: 09/03/2026 14:05:30 UTC"), "{report}");
    assert!(report.contains("PHQ-9 #3"), "{report}");
    assert!(report.contains("PHQ-9 total score: 12/27"), "{report}");
    assert!(report.contains("TREND: first measurement"), "{report}");
  }

  #[test]
  fn answers_are_labelled_in_order() {
    let s      = submission([0, 1, 2, 3, 0, 1, 2, 3, 0], Some(3));
    let report = render(&s, &Trend::FirstMeasurement).unwrap();
    let lines: Vec<&str> = report
      .lines()
      .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
      .collect();

    assert_eq!(lines.len(), ITEM_COUNT);
    assert_eq!(lines[0], "1. Little interest or pleasure in doing things: Not at all (0)");
    assert_eq!(lines[1], "2. Feeling down, depressed, or hopeless: Several days (1)");
    assert!(lines[2].ends_with("More than half the days (2)"));
    assert!(lines[3].ends_with("Nearly every day (3)"));
    assert!(lines[8].starts_with("9. Thoughts of death or self-harm"));
    assert!(report.contains("Difficulty with daily activities: Extremely difficult (3)"));
  }

  #[test]
  fn missing_difficulty_is_marked_not_answered() {
    let s      = submission([1; ITEM_COUNT], None);
    let report = render(&s, &Trend::FirstMeasurement).unwrap();
    assert!(report.contains("Difficulty with daily activities: not answered"));
  }

  #[test]
  fn trend_line_carries_signed_delta() {
    let s      = submission([1; ITEM_COUNT], None);
    let report = render(&s, &Trend::between(Some(14), 9)).unwrap();
    assert!(report.contains("TREND: ↓ decreasing (-5 points"), "{report}");
  }

  #[test]
  fn out_of_range_value_is_a_render_error() {
    assert_eq!(
      labelled("item4", 4, &FREQUENCY_LABELS),
      Err(RenderError::LabelOutOfRange { field: "item4", value: 4 })
    );
  }

  #[test]
  fn notification_subject_embeds_sequence_and_patient() {
    let s = submission([1; ITEM_COUNT], None);
    let n = notification(&s, &Trend::FirstMeasurement).unwrap();
    assert_eq!(n.subject, "PHQ-9 #3 - patient@example.com");
    assert_eq!(n.sequence_number, 3);
    assert!(n.body.starts_with("PHQ-9 REPORT"));
  }
}
