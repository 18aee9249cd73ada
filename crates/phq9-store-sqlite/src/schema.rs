//! SQL schema for the PHQ-9 SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Strictly append-only; the triggers below reject UPDATE and DELETE.
CREATE TABLE IF NOT EXISTS phq9_responses (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_identifier TEXT    NOT NULL,
    submitted_at       TEXT    NOT NULL,   -- RFC 3339 UTC; server-assigned
    sequence_number    INTEGER NOT NULL CHECK (sequence_number >= 1),
    item1              INTEGER NOT NULL CHECK (item1 BETWEEN 0 AND 3),
    item2              INTEGER NOT NULL CHECK (item2 BETWEEN 0 AND 3),
    item3              INTEGER NOT NULL CHECK (item3 BETWEEN 0 AND 3),
    item4              INTEGER NOT NULL CHECK (item4 BETWEEN 0 AND 3),
    item5              INTEGER NOT NULL CHECK (item5 BETWEEN 0 AND 3),
    item6              INTEGER NOT NULL CHECK (item6 BETWEEN 0 AND 3),
    item7              INTEGER NOT NULL CHECK (item7 BETWEEN 0 AND 3),
    item8              INTEGER NOT NULL CHECK (item8 BETWEEN 0 AND 3),
    item9              INTEGER NOT NULL CHECK (item9 BETWEEN 0 AND 3),
    difficulty         INTEGER          CHECK (difficulty BETWEEN 0 AND 3),
    total_score        INTEGER NOT NULL CHECK (total_score BETWEEN 0 AND 27),
    created_at         TEXT DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (patient_identifier, sequence_number)
);

CREATE INDEX IF NOT EXISTS phq9_responses_patient_idx
    ON phq9_responses(patient_identifier, id);

CREATE TRIGGER IF NOT EXISTS phq9_responses_no_update
BEFORE UPDATE ON phq9_responses
BEGIN
    SELECT RAISE(ABORT, 'phq9_responses is append-only');
END;

CREATE TRIGGER IF NOT EXISTS phq9_responses_no_delete
BEFORE DELETE ON phq9_responses
BEGIN
    SELECT RAISE(ABORT, 'phq9_responses is append-only');
END;

PRAGMA user_version = 1;
";
