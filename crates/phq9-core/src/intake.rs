//! Submission intake: presence checks and normalisation of the raw payload.
//!
//! Range and type checks on the answers already happened during
//! deserialisation of [`Answers`]; this step only checks that the required
//! fields are present and stamps the server time.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{ValidationError, answers::Answers, submission::NewSubmission};

/// Body of `POST /api/submit-phq9`.
///
/// Both fields are optional at the type level so that their absence is
/// reported as a [`ValidationError::MissingField`] naming the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionRequest {
  #[serde(default, alias = "email")]
  pub patient_identifier: Option<String>,
  #[serde(default, alias = "responses")]
  pub answers:            Option<Answers>,
}

impl SubmissionRequest {
  pub fn validate(self, received_at: DateTime<Utc>) -> Result<NewSubmission, ValidationError> {
    let patient_identifier = self
      .patient_identifier
      .map(|p| p.trim().to_owned())
      .filter(|p| !p.is_empty())
      .ok_or(ValidationError::MissingField("patient_identifier"))?;

    let answers = self.answers.ok_or(ValidationError::MissingField("answers"))?;

    Ok(NewSubmission { patient_identifier, submitted_at: received_at, answers })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn answers_json() -> serde_json::Value {
    json!({
      "item1": 1, "item2": 1, "item3": 1, "item4": 1, "item5": 1,
      "item6": 1, "item7": 1, "item8": 1, "item9": 1
    })
  }

  #[test]
  fn valid_request_becomes_new_submission() {
    let req: SubmissionRequest = serde_json::from_value(json!({
      "patient_identifier": "  patient@example.com ",
      "answers": answers_json(),
    }))
    .unwrap();
    let now = Utc::now();
    let new = req.validate(now).unwrap();
    assert_eq!(new.patient_identifier, "patient@example.com");
    assert_eq!(new.submitted_at, now);
    assert_eq!(new.total_score(), 9);
  }

  #[test]
  fn legacy_field_names_are_accepted() {
    let req: SubmissionRequest = serde_json::from_value(json!({
      "email": "patient@example.com",
      "responses": answers_json(),
    }))
    .unwrap();
    assert!(req.validate(Utc::now()).is_ok());
  }

  #[test]
  fn missing_answers_is_named() {
    let req: SubmissionRequest =
      serde_json::from_value(json!({ "patient_identifier": "p" })).unwrap();
    assert_eq!(
      req.validate(Utc::now()),
      Err(ValidationError::MissingField("answers"))
    );
  }

  #[test]
  fn missing_or_blank_identifier_is_named() {
    let req: SubmissionRequest =
      serde_json::from_value(json!({ "answers": answers_json() })).unwrap();
    assert_eq!(
      req.validate(Utc::now()),
      Err(ValidationError::MissingField("patient_identifier"))
    );

    let req: SubmissionRequest = serde_json::from_value(json!({
      "patient_identifier": "   ",
      "answers": answers_json(),
    }))
    .unwrap();
    assert_eq!(
      req.validate(Utc::now()),
      Err(ValidationError::MissingField("patient_identifier"))
    );
  }
}
