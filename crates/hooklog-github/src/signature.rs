//! Webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw body and sends
//! the result as `X-Hub-Signature-256: sha256=<hex digest>`. Verification
//! must run on the raw bytes before anything parses them, and the digest
//! comparison must be constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// The header value prefix GitHub uses for SHA-256 signatures.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the signature header value for `body` under `secret`.
///
/// Produces the exact `sha256=<hex digest>` string a well-behaved sender
/// would attach. [`verify`] succeeds if and only if the provided header
/// equals this value.
pub fn sign(secret: &str, body: &[u8]) -> String {
  let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
    .expect("HMAC accepts keys of any length");
  mac.update(body);
  format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Verify that `provided` is a valid signature for `body` under `secret`.
///
/// `provided` is the raw header value, if the header was present at all.
/// The hex digest is decoded and compared against the computed HMAC via
/// [`Mac::verify_slice`], which is constant-time.
pub fn verify(
  body: &[u8],
  provided: Option<&str>,
  secret: &str,
) -> Result<(), AuthError> {
  let provided = provided.ok_or(AuthError::MissingSignature)?;

  let hex_digest = provided
    .strip_prefix(SIGNATURE_PREFIX)
    .ok_or(AuthError::Mismatch)?;
  let digest = hex::decode(hex_digest).map_err(|_| AuthError::Mismatch)?;

  let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
    .expect("HMAC accepts keys of any length");
  mac.update(body);
  mac.verify_slice(&digest).map_err(|_| AuthError::Mismatch)
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &str = "it's a secret to everybody";
  const BODY: &[u8] = br#"{"ref":"refs/heads/main"}"#;

  #[test]
  fn accepts_matching_signature() {
    let header = sign(SECRET, BODY);
    assert_eq!(verify(BODY, Some(&header), SECRET), Ok(()));
  }

  #[test]
  fn missing_header_is_distinct_from_mismatch() {
    assert_eq!(verify(BODY, None, SECRET), Err(AuthError::MissingSignature));
  }

  #[test]
  fn rejects_mutated_body() {
    let header = sign(SECRET, BODY);
    let mut tampered = BODY.to_vec();
    tampered[0] ^= 0x01;
    assert_eq!(verify(&tampered, Some(&header), SECRET), Err(AuthError::Mismatch));
  }

  #[test]
  fn rejects_wrong_secret() {
    let header = sign(SECRET, BODY);
    assert_eq!(verify(BODY, Some(&header), "other secret"), Err(AuthError::Mismatch));
  }

  #[test]
  fn rejects_missing_prefix() {
    let header = sign(SECRET, BODY);
    let bare = header.strip_prefix("sha256=").unwrap();
    assert_eq!(verify(BODY, Some(bare), SECRET), Err(AuthError::Mismatch));
  }

  #[test]
  fn rejects_non_hex_digest() {
    assert_eq!(
      verify(BODY, Some("sha256=not-hex-at-all"), SECRET),
      Err(AuthError::Mismatch)
    );
  }

  #[test]
  fn rejects_truncated_digest() {
    let header = sign(SECRET, BODY);
    assert_eq!(
      verify(BODY, Some(&header[..header.len() - 2]), SECRET),
      Err(AuthError::Mismatch)
    );
  }
}
