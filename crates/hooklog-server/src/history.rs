//! The history reader: cursor-paginated access to the stored event log.
//!
//! Read failures never surface to the poller: a malformed cursor or an
//! unavailable store degrades to an empty page, keeping the read path
//! always-available. The log line is the operator's signal.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use hooklog_core::{
  event::{CanonicalEvent, EventId},
  store::EventStore,
};

use crate::AppState;

/// Page size when no cursor is supplied.
pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct EventsParams {
  /// Opaque cursor from a previous page's `_id`; resume strictly after it.
  pub since: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
  pub data: Vec<CanonicalEvent>,
}

/// `GET /github/events?since=<cursor>`
pub async fn events<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<EventsParams>,
) -> Json<EventsResponse>
where
  S: EventStore + Clone + Send + Sync + 'static,
{
  let data = read(state.store.as_ref(), params.since.as_deref()).await;
  Json(EventsResponse { data })
}

/// No cursor → the most recent page, newest first. A cursor → everything
/// strictly after it, oldest first.
pub async fn read<S>(store: &S, since: Option<&str>) -> Vec<CanonicalEvent>
where
  S: EventStore,
{
  let result = match since {
    None => store.recent(DEFAULT_LIMIT).await,
    Some(raw) => match raw.parse::<EventId>() {
      Ok(cursor) => store.after(cursor).await,
      Err(_) => {
        tracing::debug!(cursor = raw, "malformed history cursor");
        return Vec::new();
      }
    },
  };

  result.unwrap_or_else(|e| {
    tracing::warn!(error = %e, "history query failed, returning empty page");
    Vec::new()
  })
}
