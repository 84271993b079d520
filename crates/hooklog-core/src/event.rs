//! Event types — the canonical record shape persisted by the hooklog store.
//!
//! Every upstream delivery, whatever its original shape, is reduced to one
//! [`CanonicalEvent`]. Events are never updated; the store only ever appends.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Result};

// ─── EventId ─────────────────────────────────────────────────────────────────

/// Store-assigned, strictly increasing identifier of a persisted event.
///
/// This is the sole total order over events and doubles as the pagination
/// cursor. Callers see it as an opaque string (JSON key `_id`); nothing
/// outside the store should construct one from arbitrary integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(i64);

impl EventId {
  /// Wrap a raw store-assigned row id.
  pub fn new(raw: i64) -> Self {
    Self(raw)
  }

  /// The underlying integer value.
  pub fn as_i64(self) -> i64 {
    self.0
  }
}

impl fmt::Display for EventId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for EventId {
  type Err = ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse::<i64>().map(Self)
  }
}

// Cursors travel as opaque strings on the wire, not as JSON numbers.
impl Serialize for EventId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for EventId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
  }
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// The canonical action an upstream delivery resolved to.
///
/// Immutable once set on a record. The wire/database form is the
/// SCREAMING_SNAKE_CASE serde tag (`"PUSH"`, `"PULL_REQUEST"`, `"MERGE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
  Push,
  PullRequest,
  Merge,
}

impl Action {
  /// The discriminant string stored in the `action` column.
  /// Must match the `rename_all = "SCREAMING_SNAKE_CASE"` serde tags above.
  pub fn discriminant(self) -> &'static str {
    match self {
      Self::Push => "PUSH",
      Self::PullRequest => "PULL_REQUEST",
      Self::Merge => "MERGE",
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.discriminant())
  }
}

impl FromStr for Action {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "PUSH" => Ok(Self::Push),
      "PULL_REQUEST" => Ok(Self::PullRequest),
      "MERGE" => Ok(Self::Merge),
      other => Err(Error::UnknownAction(other.to_owned())),
    }
  }
}

// ─── CanonicalEvent ──────────────────────────────────────────────────────────

/// The one persisted entity: a normalized repository event.
///
/// All fields except `event_id` come from the upstream payload; `event_id`
/// is assigned by the store at insertion. Once written, no field is ever
/// updated and no delete path exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
  /// Store-assigned cursor; rendered as an opaque string on the wire.
  #[serde(rename = "_id")]
  pub event_id:    EventId,
  /// Upstream identifier of the triggering change: a commit SHA for
  /// pushes, the pull-request id (stringified) otherwise.
  pub request_id:  String,
  /// Identity of the actor who produced the change.
  pub author:      String,
  pub action:      Action,
  pub from_branch: String,
  pub to_branch:   String,
  /// Event-time as supplied by upstream, never ingestion time. Stored as
  /// the verbatim upstream string; `event_id` order need not match it.
  pub timestamp:   String,
}

// ─── NewEvent ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::EventStore::append`].
/// The `event_id` is always assigned by the store; it is not accepted from
/// callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
  pub request_id:  String,
  pub author:      String,
  pub action:      Action,
  pub from_branch: String,
  pub to_branch:   String,
  pub timestamp:   String,
}
