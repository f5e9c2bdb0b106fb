//! SQL schema for the SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    passport_number TEXT NOT NULL UNIQUE,   -- 'SERIES NUMBER', as supplied
    surname         TEXT NOT NULL DEFAULT '',
    name            TEXT NOT NULL DEFAULT '',
    patronymic      TEXT NOT NULL DEFAULT '',
    address         TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL,          -- RFC 3339 UTC, fixed width
    updated_at      TEXT NOT NULL
);

-- user_id is a plain back-reference: deleting a user leaves its tasks.
CREATE TABLE IF NOT EXISTS tasks (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    start_time  TEXT,
    end_time    TEXT,
    duration    INTEGER NOT NULL DEFAULT 0,  -- whole minutes
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    CHECK (start_time IS NULL OR end_time IS NULL OR end_time >= start_time)
);

-- Local mirror of the external passport registry.
CREATE TABLE IF NOT EXISTS people (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    passport_series INTEGER NOT NULL,
    passport_number INTEGER NOT NULL,
    surname         TEXT NOT NULL DEFAULT '',
    name            TEXT NOT NULL DEFAULT '',
    patronymic      TEXT NOT NULL DEFAULT '',
    address         TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    UNIQUE (passport_series, passport_number)
);

CREATE INDEX IF NOT EXISTS tasks_user_idx     ON tasks(user_id);
CREATE INDEX IF NOT EXISTS tasks_duration_idx ON tasks(user_id, duration);

PRAGMA user_version = 1;
";
