//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Actions are stored as their discriminant strings; timestamps are stored
//! verbatim as supplied by upstream.

use hooklog_core::event::{Action, CanonicalEvent, EventId};

use crate::Result;

// ─── Action ──────────────────────────────────────────────────────────────────

pub fn encode_action(action: Action) -> &'static str {
  action.discriminant()
}

pub fn decode_action(s: &str) -> Result<Action> {
  Ok(s.parse::<Action>()?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from an `events` row.
pub struct RawEvent {
  pub event_id:    i64,
  pub request_id:  String,
  pub author:      String,
  pub action:      String,
  pub from_branch: String,
  pub to_branch:   String,
  pub timestamp:   String,
}

impl RawEvent {
  pub fn into_event(self) -> Result<CanonicalEvent> {
    Ok(CanonicalEvent {
      event_id:    EventId::new(self.event_id),
      request_id:  self.request_id,
      author:      self.author,
      action:      decode_action(&self.action)?,
      from_branch: self.from_branch,
      to_branch:   self.to_branch,
      timestamp:   self.timestamp,
    })
  }
}
