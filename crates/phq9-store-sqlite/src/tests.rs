//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use chrono::Utc;
use phq9_core::{
  answers::{Answers, ITEM_COUNT, ItemScore},
  store::ResponseStore,
  submission::NewSubmission,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn submission(patient: &str, values: [u8; ITEM_COUNT], difficulty: Option<u8>) -> NewSubmission {
  NewSubmission {
    patient_identifier: patient.into(),
    submitted_at:       Utc::now(),
    answers:            Answers::from_items(
      values.map(|v| ItemScore::new(v).unwrap()),
      difficulty.and_then(ItemScore::new),
    ),
  }
}

// ─── Reads on an empty store ─────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_has_no_history() {
  let s = store().await;
  assert_eq!(s.count_for_patient("nobody").await.unwrap(), 0);
  assert_eq!(s.latest_score("nobody").await.unwrap(), None);
  assert!(s.history("nobody").await.unwrap().is_empty());
}

// ─── Append ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_numbers_serially_from_one() {
  let s = store().await;

  for expected in 1..=5u32 {
    let appended = s
      .append(submission("alice", [1; ITEM_COUNT], None))
      .await
      .unwrap();
    assert_eq!(appended.submission.sequence_number, expected);
  }

  let seqs: Vec<u32> = s
    .history("alice")
    .await
    .unwrap()
    .iter()
    .map(|r| r.sequence_number)
    .collect();
  assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn append_reports_previous_score() {
  let s = store().await;

  let first = s
    .append(submission("alice", [1, 1, 1, 1, 1, 1, 1, 1, 2], None))
    .await
    .unwrap();
  assert_eq!(first.previous_score, None);
  assert_eq!(first.submission.total_score, 10);

  let second = s
    .append(submission("alice", [3, 3, 3, 1, 1, 1, 1, 1, 1], None))
    .await
    .unwrap();
  assert_eq!(second.previous_score, Some(10));
  assert_eq!(second.submission.total_score, 15);
  assert!(second.submission.id > first.submission.id);

  assert_eq!(s.latest_score("alice").await.unwrap(), Some(15));
}

#[tokio::test]
async fn patients_do_not_share_numbering() {
  let s = store().await;
  s.append(submission("alice", [2; ITEM_COUNT], None)).await.unwrap();
  s.append(submission("alice", [2; ITEM_COUNT], None)).await.unwrap();

  let bob = s.append(submission("bob", [0; ITEM_COUNT], None)).await.unwrap();
  assert_eq!(bob.submission.sequence_number, 1);
  assert_eq!(bob.previous_score, None);

  assert_eq!(s.count_for_patient("alice").await.unwrap(), 2);
  assert_eq!(s.count_for_patient("bob").await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_appends_for_one_patient_stay_gap_free() {
  let s = store().await;

  let handles: Vec<_> = (0..8)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move {
        s.append(submission("alice", [1; ITEM_COUNT], None)).await.unwrap()
      })
    })
    .collect();
  for h in handles {
    h.await.unwrap();
  }

  let mut seqs: Vec<u32> = s
    .history("alice")
    .await
    .unwrap()
    .iter()
    .map(|r| r.sequence_number)
    .collect();
  seqs.sort_unstable();
  assert_eq!(seqs, (1..=8).collect::<Vec<_>>());
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn stored_row_round_trips() {
  let s = store().await;
  let appended = s
    .append(submission("alice", [0, 1, 2, 3, 0, 1, 2, 3, 0], Some(2)))
    .await
    .unwrap();

  let history = s.history("alice").await.unwrap();
  assert_eq!(history.len(), 1);
  let row = &history[0];

  assert_eq!(row.id, appended.submission.id);
  assert_eq!(row.patient_identifier, "alice");
  assert_eq!(row.total_score, 12);
  assert_eq!(row.functional_difficulty.map(ItemScore::value), Some(2));
  assert_eq!(row.item_scores.map(ItemScore::value), [0, 1, 2, 3, 0, 1, 2, 3, 0]);
  // RFC 3339 keeps sub-second precision.
  assert_eq!(row.submitted_at, appended.submission.submitted_at);
}

#[tokio::test]
async fn insert_uses_caller_sequence_number() {
  let s = store().await;
  let row = s
    .insert(submission("alice", [1; ITEM_COUNT], None), 1)
    .await
    .unwrap();
  assert_eq!(row.sequence_number, 1);

  // The (patient, sequence) pair is unique.
  let dup = s.insert(submission("alice", [1; ITEM_COUNT], None), 1).await;
  assert!(dup.is_err());
  assert_eq!(s.count_for_patient("alice").await.unwrap(), 1);
}

// ─── Append-only ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn updates_and_deletes_are_rejected() {
  let s = store().await;
  s.append(submission("alice", [1; ITEM_COUNT], None)).await.unwrap();

  let update = s
    .conn
    .call(|conn| Ok(conn.execute("UPDATE phq9_responses SET total_score = 0", [])?))
    .await;
  assert!(update.is_err());

  let delete = s
    .conn
    .call(|conn| Ok(conn.execute("DELETE FROM phq9_responses", [])?))
    .await;
  assert!(delete.is_err());

  assert_eq!(s.latest_score("alice").await.unwrap(), Some(9));
}

#[tokio::test]
async fn out_of_range_values_violate_checks() {
  let s = store().await;
  let result = s
    .conn
    .call(|conn| {
      Ok(conn.execute(
        "INSERT INTO phq9_responses (
           patient_identifier, submitted_at, sequence_number,
           item1, item2, item3, item4, item5, item6, item7, item8, item9,
           difficulty, total_score
         ) VALUES ('x', '2026-01-01T00:00:00Z', 1, 4, 0, 0, 0, 0, 0, 0, 0, 0, NULL, 4)",
        [],
      )?)
    })
    .await;
  assert!(result.is_err());
}

// ─── Reachability ────────────────────────────────────────────────────────────

#[tokio::test]
async fn in_memory_store_is_reachable() {
  assert!(store().await.is_reachable().await);
}

#[tokio::test]
async fn file_store_reachability_follows_the_file() {
  let dir  = tempfile::tempdir().unwrap();
  let path = dir.path().join("phq9.db");

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.is_reachable().await);
  assert_eq!(s.path(), Some(path.as_path()));

  std::fs::remove_file(&path).unwrap();
  assert!(!s.is_reachable().await);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir  = tempfile::tempdir().unwrap();
  let path = dir.path().join("phq9.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.append(submission("alice", [2; ITEM_COUNT], None)).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let next = s.append(submission("alice", [1; ITEM_COUNT], None)).await.unwrap();
  assert_eq!(next.submission.sequence_number, 2);
  assert_eq!(next.previous_score, Some(18));
}
