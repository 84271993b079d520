//! Boundary error type and axum `IntoResponse` implementation.
//!
//! Wraps the pipeline's component errors and maps them onto the coarse
//! statuses callers are allowed to see. Detailed reasons stay in logs; the
//! only echoed text is the generic message on a 400.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use hooklog_github::{AuthError, ClassifyError, SchemaError};

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Auth(#[from] AuthError),

  #[error(transparent)]
  Classify(#[from] ClassifyError),

  #[error(transparent)]
  Schema(#[from] SchemaError),

  /// The body could not be decoded to JSON at all (covers the
  /// form-encoded `payload` field path too).
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      // Required headers absent: the sender misconfigured the hook.
      Error::Auth(AuthError::MissingSignature)
      | Error::Classify(ClassifyError::MissingEventType) => {
        StatusCode::CONFLICT.into_response()
      }
      Error::Auth(AuthError::Mismatch) => {
        StatusCode::UNAUTHORIZED.into_response()
      }
      Error::Classify(e @ ClassifyError::UnsupportedEvent(_)) => {
        bad_request(e.to_string())
      }
      Error::Schema(e) => bad_request(e.to_string()),
      Error::BadRequest(msg) => bad_request(msg),
      Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
  }
}

fn bad_request(message: String) -> Response {
  (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
