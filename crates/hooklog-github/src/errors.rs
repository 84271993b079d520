//! Error taxonomies for the webhook domain.
//!
//! Each pipeline stage owns a small, closed error type; the server boundary
//! maps them onto HTTP statuses. Component-level errors stay here; the
//! server's response type wraps them rather than redefining them.

use thiserror::Error;

/// Signature verification failures. Always reject the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
  /// No `X-Hub-Signature-256` header was supplied upstream.
  #[error("missing webhook signature header")]
  MissingSignature,

  /// The supplied signature is malformed or does not match the computed
  /// HMAC digest of the body.
  #[error("webhook signature mismatch")]
  Mismatch,
}

/// Event classification failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
  /// No `X-GitHub-Event` header was supplied upstream.
  #[error("missing event type header")]
  MissingEventType,

  /// An event label outside the closed set this pipeline handles.
  #[error("unsupported event type: {0:?}")]
  UnsupportedEvent(String),
}

/// Payload does not match the schema contract for its classified action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
  /// Carries serde's first missing/mistyped-field message.
  #[error("payload shape mismatch: {0}")]
  ShapeMismatch(String),
}
