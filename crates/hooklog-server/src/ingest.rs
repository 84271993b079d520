//! The ingestion pipeline: verify → classify → parse → canonicalize →
//! persist, short-circuiting at the first failed stage.
//!
//! One invocation per inbound delivery; no state survives between requests.
//! Signature verification always runs over the raw undecoded body, before
//! anything attempts to parse it.

use axum::{
  extract::State,
  http::{HeaderMap, StatusCode, header},
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use hooklog_core::{event::CanonicalEvent, store::EventStore};
use hooklog_github::{
  ClassifyError, WebhookPayload, canonical::canonicalize, classify::classify,
  signature,
};

use crate::{AppState, error::Error};

/// Header carrying the HMAC-SHA256 signature of the body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
/// Header carrying the upstream event-type label.
pub const EVENT_HEADER: &str = "x-github-event";

/// Terminal outcome of a successfully handled delivery.
///
/// `Dropped` is an acknowledged non-write: canonicalization could not
/// resolve the author identity, and redelivery would not change that, so
/// the sender still gets a success. Rejections travel as [`Error`].
#[derive(Debug)]
pub enum IngestOutcome {
  Accepted(CanonicalEvent),
  Dropped,
}

/// `POST /webhook/receiver`
pub async fn receiver<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<StatusCode, Error>
where
  S: EventStore + Clone + Send + Sync + 'static,
{
  let signature = header_str(&headers, SIGNATURE_HEADER);
  let label = header_str(&headers, EVENT_HEADER);
  let content_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok());

  run(&state, signature, label, content_type, &body)
    .await
    .map(|_| StatusCode::OK)
    .inspect_err(|e| tracing::warn!(error = %e, "webhook rejected"))
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
  headers.get(name).and_then(|v| v.to_str().ok())
}

/// Drive one delivery through the whole pipeline.
pub async fn run<S>(
  state: &AppState<S>,
  signature: Option<&str>,
  label: Option<&str>,
  content_type: Option<&str>,
  body: &[u8],
) -> Result<IngestOutcome, Error>
where
  S: EventStore,
{
  signature::verify(body, signature, &state.config.webhook_secret)?;

  // A missing event label is answerable without touching the body.
  if label.is_none() {
    return Err(ClassifyError::MissingEventType.into());
  }

  let raw = decode_body(content_type, body)?;
  let action = classify(label, &raw)?;
  let payload = WebhookPayload::parse(action, &raw)?;

  match canonicalize(action, &payload) {
    None => {
      tracing::debug!(%action, "payload missing identity fields, dropped");
      Ok(IngestOutcome::Dropped)
    }
    Some(input) => {
      let event = state
        .store
        .append(input)
        .await
        .map_err(|e| Error::Store(Box::new(e)))?;
      tracing::info!(
        event_id = %event.event_id,
        action = %event.action,
        author = %event.author,
        "event persisted"
      );
      Ok(IngestOutcome::Accepted(event))
    }
  }
}

/// Form-encoded deliveries wrap the JSON document in a `payload` field.
#[derive(Deserialize)]
struct FormBody {
  payload: String,
}

fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, Error> {
  let is_form = content_type
    .is_some_and(|ct| ct.contains("application/x-www-form-urlencoded"));

  if is_form {
    let form: FormBody = serde_urlencoded::from_bytes(body)
      .map_err(|e| Error::BadRequest(format!("invalid form body: {e}")))?;
    serde_json::from_str(&form.payload)
      .map_err(|e| Error::BadRequest(format!("invalid json payload: {e}")))
  } else {
    serde_json::from_slice(body)
      .map_err(|e| Error::BadRequest(format!("invalid json body: {e}")))
  }
}
