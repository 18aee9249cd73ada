//! Error type for `phq9-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column holds a value outside its domain.
  #[error("corrupt row {id}: {reason}")]
  CorruptRow { id: i64, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
