//! [`SqliteEventStore`] — the SQLite implementation of [`EventStore`].

use std::path::Path;

use hooklog_core::{
  event::{CanonicalEvent, EventId, NewEvent},
  store::EventStore,
};

use crate::{
  Error, Result,
  encode::{RawEvent, encode_action},
  schema::SCHEMA,
};

const SELECT_COLUMNS: &str =
  "event_id, request_id, author, action, from_branch, to_branch, timestamp";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A hooklog event store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and
/// concurrent callers issue independent calls with no client-side locking;
/// id assignment (and with it, ordering) happens entirely inside SQLite.
#[derive(Clone)]
pub struct SqliteEventStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteEventStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

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
}

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEvent> {
  Ok(RawEvent {
    event_id:    row.get(0)?,
    request_id:  row.get(1)?,
    author:      row.get(2)?,
    action:      row.get(3)?,
    from_branch: row.get(4)?,
    to_branch:   row.get(5)?,
    timestamp:   row.get(6)?,
  })
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteEventStore {
  type Error = Error;

  async fn append(&self, input: NewEvent) -> Result<CanonicalEvent> {
    let request_id_str  = input.request_id.clone();
    let author_str      = input.author.clone();
    let action_str      = encode_action(input.action).to_owned();
    let from_branch_str = input.from_branch.clone();
    let to_branch_str   = input.to_branch.clone();
    let timestamp_str   = input.timestamp.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (request_id, author, action, from_branch, to_branch, timestamp)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            request_id_str,
            author_str,
            action_str,
            from_branch_str,
            to_branch_str,
            timestamp_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(CanonicalEvent {
      event_id:    EventId::new(id),
      request_id:  input.request_id,
      author:      input.author,
      action:      input.action,
      from_branch: input.from_branch,
      to_branch:   input.to_branch,
      timestamp:   input.timestamp,
    })
  }

  async fn recent(&self, limit: u32) -> Result<Vec<CanonicalEvent>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SELECT_COLUMNS} FROM events
           ORDER BY event_id DESC LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit], row_to_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn after(&self, cursor: EventId) -> Result<Vec<CanonicalEvent>> {
    let cursor_raw = cursor.as_i64();

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SELECT_COLUMNS} FROM events
           WHERE event_id > ?1 ORDER BY event_id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![cursor_raw], row_to_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }
}
