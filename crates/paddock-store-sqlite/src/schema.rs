//! SQL schema for the Paddock SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS tutors (
    tutor_id      TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    display_name  TEXT NOT NULL,
    password_hash TEXT NOT NULL,   -- argon2 PHC string, never serialised out
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS animals (
    animal_id            TEXT PRIMARY KEY,
    tutor_id             TEXT NOT NULL REFERENCES tutors(tutor_id) ON DELETE CASCADE,
    name                 TEXT NOT NULL,
    species              TEXT NOT NULL,   -- lowercase Species discriminant
    breed                TEXT,
    age                  INTEGER,         -- whole years, non-negative
    -- The thought columns are written only through set_thought, always
    -- together; ordinary CRUD statements never name them.
    thought_of_the_day   TEXT,
    thought_generated_at TEXT,
    created_at           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS animals_tutor_idx ON animals(tutor_id);

PRAGMA user_version = 1;
";
