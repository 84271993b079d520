//! Event classification.
//!
//! Maps the declared `X-GitHub-Event` label plus a look at the raw payload
//! onto one canonical [`Action`]. The same upstream `pull_request`
//! notification resolves to two different actions depending on payload
//! content, so classification inspects structure, not just the label.

use serde_json::Value;

use hooklog_core::event::Action;

use crate::errors::ClassifyError;

/// Classify a delivery by its event label and raw payload.
///
/// `label` is the raw header value, if the header was present at all. The
/// payload is only consulted for the merge refinement; it is not validated
/// here; that is the schema contract's job, after classification.
pub fn classify(
  label: Option<&str>,
  payload: &Value,
) -> Result<Action, ClassifyError> {
  match label {
    None => Err(ClassifyError::MissingEventType),
    Some("push") => Ok(Action::Push),
    Some("pull_request") => {
      let merged = payload
        .pointer("/pull_request/merged")
        .and_then(Value::as_bool)
        .unwrap_or(false);
      Ok(if merged { Action::Merge } else { Action::PullRequest })
    }
    Some(other) => Err(ClassifyError::UnsupportedEvent(other.to_owned())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn push_label_always_classifies_as_push() {
    assert_eq!(classify(Some("push"), &json!({})).unwrap(), Action::Push);
    // Even a payload that happens to contain a merged pull request.
    let payload = json!({ "pull_request": { "merged": true } });
    assert_eq!(classify(Some("push"), &payload).unwrap(), Action::Push);
  }

  #[test]
  fn pull_request_label_refines_on_merged_flag() {
    let open = json!({ "pull_request": { "merged": false } });
    assert_eq!(
      classify(Some("pull_request"), &open).unwrap(),
      Action::PullRequest
    );

    let merged = json!({ "pull_request": { "merged": true } });
    assert_eq!(classify(Some("pull_request"), &merged).unwrap(), Action::Merge);
  }

  #[test]
  fn absent_or_mistyped_merged_flag_means_pull_request() {
    assert_eq!(
      classify(Some("pull_request"), &json!({})).unwrap(),
      Action::PullRequest
    );
    let mistyped = json!({ "pull_request": { "merged": "true" } });
    assert_eq!(
      classify(Some("pull_request"), &mistyped).unwrap(),
      Action::PullRequest
    );
  }

  #[test]
  fn other_labels_are_unsupported() {
    let err = classify(Some("issues"), &json!({})).unwrap_err();
    assert_eq!(err, ClassifyError::UnsupportedEvent("issues".into()));
  }

  #[test]
  fn missing_label_is_its_own_error() {
    assert_eq!(
      classify(None, &json!({})).unwrap_err(),
      ClassifyError::MissingEventType
    );
  }
}
