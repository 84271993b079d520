//! Canonicalization: reduce a validated payload plus its classified action
//! into the one record shape the store persists.
//!
//! Returning `None` is a deliberate lossy drop, not an error: a payload
//! missing its author identity will still be missing it on redelivery, so
//! the caller acknowledges the event and moves on.

use hooklog_core::event::{Action, NewEvent};

use crate::payload::{PullRequestPayload, WebhookPayload};

/// Extract a [`NewEvent`] from `payload` according to `action`.
///
/// | action       | request_id     | author             | branches              | timestamp                    |
/// |--------------|----------------|--------------------|-----------------------|------------------------------|
/// | Push         | head commit id | head commit author | pushed ref, both ends | head commit timestamp        |
/// | PullRequest  | PR id          | sender login       | PR head / PR base     | PR created_at                |
/// | Merge        | PR id          | sender login       | PR head / PR base     | PR merged_at, else updated_at |
///
/// `None` when the push has no head commit or its author carries no name,
/// or when the pull-request sender carries no login. An action/payload
/// family mismatch also yields `None`, though the classifier never
/// produces one.
pub fn canonicalize(
  action: Action,
  payload: &WebhookPayload,
) -> Option<NewEvent> {
  match (action, payload) {
    (Action::Push, WebhookPayload::Push(push)) => {
      let head = push.head_commit.as_ref()?;
      let author = head.author.name.clone()?;
      let branch = push
        .git_ref
        .strip_prefix("refs/heads/")
        .unwrap_or(&push.git_ref)
        .to_owned();
      Some(NewEvent {
        request_id:  head.id.clone(),
        author,
        action:      Action::Push,
        from_branch: branch.clone(),
        to_branch:   branch,
        timestamp:   head.timestamp.clone(),
      })
    }
    (Action::PullRequest, WebhookPayload::PullRequest(pr)) => {
      from_pull_request(pr, Action::PullRequest, pr.pull_request.created_at.clone())
    }
    (Action::Merge, WebhookPayload::PullRequest(pr)) => {
      let timestamp = pr
        .pull_request
        .merged_at
        .clone()
        .unwrap_or_else(|| pr.pull_request.updated_at.clone());
      from_pull_request(pr, Action::Merge, timestamp)
    }
    _ => None,
  }
}

fn from_pull_request(
  payload: &PullRequestPayload,
  action: Action,
  timestamp: String,
) -> Option<NewEvent> {
  let author = payload.sender.login.clone()?;
  Some(NewEvent {
    request_id: payload.pull_request.id.to_string(),
    author,
    action,
    from_branch: payload.pull_request.head.git_ref.clone(),
    to_branch: payload.pull_request.base.git_ref.clone(),
    timestamp,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::payload::fixtures::*;

  fn parse(action: Action, raw: &serde_json::Value) -> WebhookPayload {
    WebhookPayload::parse(action, raw).unwrap()
  }

  #[test]
  fn push_extracts_head_commit_and_strips_ref_prefix() {
    let raw = push_payload(commit(
      "59b20b8d5c6ff8d09518454d4dd8b7b30f095ab5",
      Some("alice"),
      "2024-03-04T05:06:07Z",
    ));
    let payload = parse(Action::Push, &raw);

    let event = canonicalize(Action::Push, &payload).unwrap();
    assert_eq!(event.request_id, "59b20b8d5c6ff8d09518454d4dd8b7b30f095ab5");
    assert_eq!(event.author, "alice");
    assert_eq!(event.action, Action::Push);
    assert_eq!(event.from_branch, "main");
    assert_eq!(event.to_branch, "main");
    assert_eq!(event.timestamp, "2024-03-04T05:06:07Z");
  }

  #[test]
  fn push_without_head_commit_is_dropped() {
    let raw = push_payload(serde_json::Value::Null);
    let payload = parse(Action::Push, &raw);
    assert!(canonicalize(Action::Push, &payload).is_none());
  }

  #[test]
  fn push_without_author_name_is_dropped() {
    let raw = push_payload(commit(
      "59b20b8d5c6ff8d09518454d4dd8b7b30f095ab5",
      None,
      "2024-03-04T05:06:07Z",
    ));
    let payload = parse(Action::Push, &raw);
    assert!(canonicalize(Action::Push, &payload).is_none());
  }

  #[test]
  fn non_branch_ref_is_kept_verbatim() {
    let mut raw = push_payload(commit(
      "59b20b8d5c6ff8d09518454d4dd8b7b30f095ab5",
      Some("alice"),
      "2024-03-04T05:06:07Z",
    ));
    raw["ref"] = serde_json::json!("refs/tags/v1.0.0");
    let payload = parse(Action::Push, &raw);

    let event = canonicalize(Action::Push, &payload).unwrap();
    assert_eq!(event.from_branch, "refs/tags/v1.0.0");
  }

  #[test]
  fn pull_request_uses_sender_and_created_at() {
    let raw =
      pull_request_payload(Some("bob"), false, None, "feature-x", "main");
    let payload = parse(Action::PullRequest, &raw);

    let event = canonicalize(Action::PullRequest, &payload).unwrap();
    assert_eq!(event.request_id, "279147437");
    assert_eq!(event.author, "bob");
    assert_eq!(event.action, Action::PullRequest);
    assert_eq!(event.from_branch, "feature-x");
    assert_eq!(event.to_branch, "main");
    assert_eq!(event.timestamp, "2024-01-01T00:00:00Z");
  }

  #[test]
  fn merge_prefers_merged_at() {
    let raw = pull_request_payload(
      Some("bob"),
      true,
      Some("2024-01-03T00:00:00Z"),
      "feature-x",
      "main",
    );
    let payload = parse(Action::Merge, &raw);

    let event = canonicalize(Action::Merge, &payload).unwrap();
    assert_eq!(event.action, Action::Merge);
    assert_eq!(event.timestamp, "2024-01-03T00:00:00Z");
  }

  #[test]
  fn merge_falls_back_to_updated_at() {
    let raw = pull_request_payload(Some("bob"), true, None, "feature-x", "main");
    let payload = parse(Action::Merge, &raw);

    let event = canonicalize(Action::Merge, &payload).unwrap();
    // updated_at from the fixture.
    assert_eq!(event.timestamp, "2024-01-02T00:00:00Z");
  }

  #[test]
  fn pull_request_without_sender_login_is_dropped() {
    let raw = pull_request_payload(None, false, None, "feature-x", "main");
    let payload = parse(Action::PullRequest, &raw);
    assert!(canonicalize(Action::PullRequest, &payload).is_none());
  }

  #[test]
  fn mismatched_family_yields_none() {
    let raw = push_payload(serde_json::Value::Null);
    let payload = parse(Action::Push, &raw);
    assert!(canonicalize(Action::PullRequest, &payload).is_none());
  }
}
