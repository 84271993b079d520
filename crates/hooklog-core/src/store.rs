//! The `EventStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `hooklog-store-sqlite`).
//! Higher layers (`hooklog-server`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::event::{CanonicalEvent, EventId, NewEvent};

/// Abstraction over an ordered, append-only event log.
///
/// The store assigns each appended event a strictly increasing [`EventId`];
/// that assignment is the only ordering mechanism; callers never coordinate
/// ordering themselves. No update or delete operation is exposed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one event and return it with its store-assigned id.
  fn append(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<CanonicalEvent, Self::Error>> + Send + '_;

  /// At most `limit` most-recent events, in strictly descending id order.
  fn recent(
    &self,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<CanonicalEvent>, Self::Error>> + Send + '_;

  /// All events with id strictly greater than `cursor`, in strictly
  /// ascending id order. Never truncates; incremental pollers rely on
  /// receiving everything past their cursor.
  fn after(
    &self,
    cursor: EventId,
  ) -> impl Future<Output = Result<Vec<CanonicalEvent>, Self::Error>> + Send + '_;
}
