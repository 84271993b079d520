//! GitHub webhook domain logic for hooklog.
//!
//! Everything between raw delivery bytes and a [`hooklog_core::event::NewEvent`]
//! lives here: signature verification, event classification, the payload
//! schema contracts, and canonicalization. This crate has no HTTP or
//! database dependencies; the server crate drives it.

pub mod canonical;
pub mod classify;
pub mod errors;
pub mod payload;
pub mod signature;

pub use errors::{AuthError, ClassifyError, SchemaError};
pub use payload::WebhookPayload;
