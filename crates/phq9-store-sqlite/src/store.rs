//! [`SqliteStore`], the SQLite implementation of [`ResponseStore`].

use std::path::{Path, PathBuf};

use rusqlite::{OptionalExtension as _, TransactionBehavior};
use tracing::debug;

use phq9_core::{
  score::next_sequence_number,
  store::ResponseStore,
  submission::{Appended, NewSubmission, Submission},
};

use crate::{
  Error, Result,
  encode::{RawSubmission, RowParams, SUBMISSION_COLUMNS},
  schema::SCHEMA,
};

// ─── SQL helpers ─────────────────────────────────────────────────────────────

const COUNT_SQL: &str = "SELECT COUNT(*) FROM phq9_responses WHERE patient_identifier = ?1";

const LATEST_SCORE_SQL: &str = "SELECT total_score FROM phq9_responses
   WHERE patient_identifier = ?1
   ORDER BY id DESC
   LIMIT 1";

/// Insert one row and return its assigned id. Runs on the connection thread,
/// possibly inside a transaction.
fn insert_row(
  conn: &rusqlite::Connection,
  row: &RowParams,
  sequence_number: u32,
) -> rusqlite::Result<i64> {
  let [i1, i2, i3, i4, i5, i6, i7, i8, i9] = row.items;
  conn.execute(
    "INSERT INTO phq9_responses (
       patient_identifier, submitted_at, sequence_number,
       item1, item2, item3, item4, item5, item6, item7, item8, item9,
       difficulty, total_score
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
    rusqlite::params![
      row.patient_identifier,
      row.submitted_at,
      sequence_number,
      i1, i2, i3, i4, i5, i6, i7, i8, i9,
      row.difficulty,
      row.total_score,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn latest_score_row(conn: &rusqlite::Connection, patient: &str) -> rusqlite::Result<Option<u8>> {
  conn
    .query_row(LATEST_SCORE_SQL, rusqlite::params![patient], |r| r.get(0))
    .optional()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A submission history backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  /// `None` for in-memory stores.
  path: Option<PathBuf>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn, path: Some(path) };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store. Used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, path: None };
    store.init_schema().await?;
    Ok(store)
  }

  /// Location of the database file, if any.
  pub fn path(&self) -> Option<&Path> { self.path.as_deref() }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_submissions(&self, patient: String) -> Result<Vec<Submission>> {
    let raws: Vec<RawSubmission> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBMISSION_COLUMNS} FROM phq9_responses
           WHERE patient_identifier = ?1
           ORDER BY id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![patient], RawSubmission::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }
}

// ─── ResponseStore impl ──────────────────────────────────────────────────────

impl ResponseStore for SqliteStore {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn count_for_patient(&self, patient: &str) -> Result<u32> {
    let patient = patient.to_owned();
    let count = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(COUNT_SQL, rusqlite::params![patient], |r| r.get::<_, u32>(0))?)
      })
      .await?;
    Ok(count)
  }

  async fn latest_score(&self, patient: &str) -> Result<Option<u8>> {
    let patient = patient.to_owned();
    let score = self
      .conn
      .call(move |conn| Ok(latest_score_row(conn, &patient)?))
      .await?;
    Ok(score)
  }

  async fn history(&self, patient: &str) -> Result<Vec<Submission>> {
    self.select_submissions(patient.to_owned()).await
  }

  async fn is_reachable(&self) -> bool {
    if let Some(path) = &self.path
      && !tokio::fs::try_exists(path).await.unwrap_or(false)
    {
      return false;
    }

    self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))?))
      .await
      .is_ok()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert(&self, input: NewSubmission, sequence_number: u32) -> Result<Submission> {
    let row = RowParams::from_new(&input);

    let id = self
      .conn
      .call(move |conn| Ok(insert_row(conn, &row, sequence_number)?))
      .await?;

    Ok(Submission::from_new(id, sequence_number, input))
  }

  async fn append(&self, input: NewSubmission) -> Result<Appended> {
    let row = RowParams::from_new(&input);

    // IMMEDIATE takes the write lock up front, so the count and the latest
    // score cannot change between the reads and the insert, even across
    // processes sharing the file.
    let (id, sequence_number, previous_score) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let prior: u32 = tx.query_row(
          COUNT_SQL,
          rusqlite::params![row.patient_identifier],
          |r| r.get(0),
        )?;
        let previous = latest_score_row(&tx, &row.patient_identifier)?;
        let sequence_number = next_sequence_number(prior);
        let id = insert_row(&tx, &row, sequence_number)?;

        tx.commit()?;
        Ok((id, sequence_number, previous))
      })
      .await?;

    debug!(id, sequence_number, "appended submission");

    Ok(Appended {
      submission: Submission::from_new(id, sequence_number, input),
      previous_score,
    })
  }
}
