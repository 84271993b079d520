//! Error type for `hooklog-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] hooklog_core::Error),

  /// The database is unreachable or a statement failed. Writes that hit
  /// this are dropped; there is no retry queue; the upstream sender's own
  /// redelivery policy is the recovery path.
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
