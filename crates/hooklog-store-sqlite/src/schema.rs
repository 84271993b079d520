//! SQL schema for the hooklog SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Events are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- event_id doubles as the pagination cursor; AUTOINCREMENT forbids rowid
-- reuse so assigned ids stay strictly increasing for the table's lifetime.
CREATE TABLE IF NOT EXISTS events (
    event_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    request_id  TEXT NOT NULL,
    author      TEXT NOT NULL,
    action      TEXT NOT NULL,   -- 'PUSH' | 'PULL_REQUEST' | 'MERGE'
    from_branch TEXT NOT NULL,
    to_branch   TEXT NOT NULL,
    timestamp   TEXT NOT NULL    -- upstream event-time, verbatim
);

-- Event-time range scans; insertion order lives in event_id.
CREATE INDEX IF NOT EXISTS events_timestamp_idx ON events(timestamp);

PRAGMA user_version = 1;
";
