//! Error types for `hooklog-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An `action` discriminant read back from storage that no variant of
  /// [`crate::event::Action`] matches.
  #[error("unknown action discriminant: {0:?}")]
  UnknownAction(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
