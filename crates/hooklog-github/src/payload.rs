//! Schema contracts for the upstream webhook payload shapes.
//!
//! One contract per payload family: [`PushPayload`] for push deliveries and
//! [`PullRequestPayload`] for pull-request deliveries (which cover both the
//! `PULL_REQUEST` and `MERGE` canonical actions). The classifier picks the
//! contract before any field access; there is no speculative parsing
//! against multiple shapes.
//!
//! Unknown extra fields are ignored (serde default), so upstream additions
//! never break parsing. The declared fields below are the pass-through
//! surface; only a handful are read by the canonicalizer.

use serde::{Deserialize, Serialize};

use hooklog_core::event::Action;

use crate::errors::SchemaError;

// ─── Shared objects ──────────────────────────────────────────────────────────

/// A user/actor object as it appears nested throughout webhook payloads.
///
/// Upstream sends different subsets depending on context (commit authors
/// carry `name`/`email`, senders carry `login`), so every identity field is
/// optional; callers must tolerate either `name` or `login` being absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
  pub name:       Option<String>,
  pub email:      Option<String>,
  pub username:   Option<String>,
  pub login:      Option<String>,
  pub id:         Option<i64>,
  pub node_id:    Option<String>,
  pub avatar_url: Option<String>,
  pub url:        Option<String>,
  pub html_url:   Option<String>,
  #[serde(rename = "type")]
  pub kind:       Option<String>,
  pub site_admin: Option<bool>,
}

/// Repository timestamps arrive as epoch seconds in push deliveries and as
/// RFC 3339 strings in pull-request deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoTimestamp {
  Epoch(i64),
  Rfc3339(String),
}

/// The repository the delivery concerns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
  pub id:                i64,
  pub node_id:           String,
  pub name:              String,
  pub full_name:         String,
  pub private:           bool,
  pub owner:             Actor,
  pub html_url:          String,
  pub description:       Option<String>,
  pub fork:              bool,
  pub url:               String,
  pub created_at:        RepoTimestamp,
  pub updated_at:        String,
  pub pushed_at:         RepoTimestamp,
  pub homepage:          Option<String>,
  pub size:              i64,
  pub language:          Option<String>,
  pub archived:          bool,
  pub disabled:          bool,
  pub open_issues_count: i64,
  pub topics:            Vec<String>,
  pub visibility:        String,
  pub forks:             i64,
  pub open_issues:       i64,
  pub watchers:          i64,
  pub default_branch:    String,
  /// Only present in push deliveries.
  pub stargazers:        Option<i64>,
  /// Only present in push deliveries.
  pub master_branch:     Option<String>,
}

// ─── Push family ─────────────────────────────────────────────────────────────

/// One commit in a push delivery's commit list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
  pub id:        String,
  pub tree_id:   String,
  pub distinct:  bool,
  pub message:   String,
  pub timestamp: String,
  pub url:       String,
  pub author:    Actor,
  pub committer: Actor,
  pub added:     Vec<String>,
  pub removed:   Vec<String>,
  pub modified:  Vec<String>,
}

/// Contract for `push` deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushPayload {
  /// The pushed ref, e.g. `refs/heads/main`.
  #[serde(rename = "ref")]
  pub git_ref:     String,
  /// SHA of the ref before the push.
  pub before:      String,
  /// SHA of the ref after the push.
  pub after:       String,
  pub repository:  Repository,
  pub pusher:      Actor,
  pub sender:      Actor,
  pub created:     bool,
  pub deleted:     bool,
  pub forced:      bool,
  pub base_ref:    Option<String>,
  pub compare:     String,
  pub commits:     Vec<Commit>,
  /// Absent when the push deleted the ref or carried no commits.
  pub head_commit: Option<Commit>,
}

// ─── Pull-request family ─────────────────────────────────────────────────────

/// One side of a pull request (`head` or `base`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestBranch {
  pub label:   String,
  #[serde(rename = "ref")]
  pub git_ref: String,
  pub sha:     String,
  pub user:    Actor,
}

/// The nested pull-request object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
  pub url:                 String,
  pub id:                  i64,
  pub node_id:             String,
  pub html_url:            String,
  pub diff_url:            String,
  pub patch_url:           String,
  pub issue_url:           String,
  pub number:              i64,
  pub state:               String,
  pub locked:              bool,
  pub title:               String,
  pub user:                Actor,
  pub body:                Option<String>,
  pub created_at:          String,
  pub updated_at:          String,
  pub closed_at:           Option<String>,
  pub merged_at:           Option<String>,
  pub merge_commit_sha:    Option<String>,
  pub draft:               bool,
  pub head:                PullRequestBranch,
  pub base:                PullRequestBranch,
  pub author_association:  String,
  pub merged:              bool,
  pub mergeable:           Option<bool>,
  pub rebaseable:          Option<bool>,
  pub mergeable_state:     String,
  pub merged_by:           Option<Actor>,
  pub comments:            i64,
  pub review_comments:     i64,
  pub maintainer_can_modify: bool,
  pub commits:             i64,
  pub additions:           i64,
  pub deletions:           i64,
  pub changed_files:       i64,
}

/// Contract for `pull_request` deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestPayload {
  /// The upstream sub-action string (`"opened"`, `"closed"`, …); not to be
  /// confused with the canonical [`Action`].
  pub action:       String,
  pub number:       i64,
  pub pull_request: PullRequest,
  pub repository:   Repository,
  pub sender:       Actor,
}

// ─── Tagged union ────────────────────────────────────────────────────────────

/// A payload validated against the contract its classified action selects.
#[derive(Debug, Clone)]
pub enum WebhookPayload {
  Push(PushPayload),
  PullRequest(PullRequestPayload),
}

impl WebhookPayload {
  /// Parse `raw` against the contract for `action`.
  ///
  /// `PullRequest` and `Merge` share the pull-request contract; the merge
  /// refinement already happened during classification and changes nothing
  /// about the payload's shape.
  pub fn parse(
    action: Action,
    raw: &serde_json::Value,
  ) -> Result<Self, SchemaError> {
    match action {
      Action::Push => PushPayload::deserialize(raw).map(Self::Push),
      Action::PullRequest | Action::Merge => {
        PullRequestPayload::deserialize(raw).map(Self::PullRequest)
      }
    }
    .map_err(|e| SchemaError::ShapeMismatch(e.to_string()))
  }
}


#[cfg(test)]
mod tests {
  use super::{fixtures::*, *};
  use serde_json::json;

  #[test]
  fn push_payload_parses_under_push_contract() {
    let raw = push_payload(commit(
      "59b20b8d5c6ff8d09518454d4dd8b7b30f095ab5",
      Some("alice"),
      "2024-01-01T00:00:00Z",
    ));

    let parsed = WebhookPayload::parse(Action::Push, &raw).unwrap();
    let WebhookPayload::Push(p) = parsed else {
      panic!("expected push variant");
    };
    assert_eq!(p.git_ref, "refs/heads/main");
    let head = p.head_commit.unwrap();
    assert_eq!(head.author.name.as_deref(), Some("alice"));
  }

  #[test]
  fn push_payload_tolerates_null_head_commit() {
    let raw = push_payload(serde_json::Value::Null);
    let WebhookPayload::Push(p) =
      WebhookPayload::parse(Action::Push, &raw).unwrap()
    else {
      panic!("expected push variant");
    };
    assert!(p.head_commit.is_none());
  }

  #[test]
  fn pull_request_payload_parses_under_pr_contract() {
    let raw =
      pull_request_payload(Some("bob"), false, None, "feature-x", "main");

    let WebhookPayload::PullRequest(p) =
      WebhookPayload::parse(Action::PullRequest, &raw).unwrap()
    else {
      panic!("expected pull-request variant");
    };
    assert_eq!(p.pull_request.head.git_ref, "feature-x");
    assert_eq!(p.sender.login.as_deref(), Some("bob"));
    assert!(!p.pull_request.merged);
  }

  #[test]
  fn wrong_contract_fails_with_shape_mismatch() {
    let raw =
      pull_request_payload(Some("bob"), false, None, "feature-x", "main");

    let err = WebhookPayload::parse(Action::Push, &raw).unwrap_err();
    let SchemaError::ShapeMismatch(msg) = err;
    // serde names the first missing field of the push contract.
    assert!(msg.contains("ref"), "unexpected message: {msg}");
  }

  #[test]
  fn unknown_extra_fields_are_ignored() {
    let mut raw = push_payload(serde_json::Value::Null);
    raw["some_future_field"] = json!({ "added": "later" });
    assert!(WebhookPayload::parse(Action::Push, &raw).is_ok());
  }

  #[test]
  fn identity_fields_tolerate_absence() {
    let actor: Actor = serde_json::from_value(json!({ "id": 5 })).unwrap();
    assert!(actor.name.is_none());
    assert!(actor.login.is_none());
  }

  #[test]
  fn repo_timestamps_accept_epoch_and_string() {
    let repo: Repository =
      serde_json::from_value(repository()).unwrap();
    assert!(matches!(repo.created_at, RepoTimestamp::Epoch(_)));

    let mut raw = repository();
    raw["created_at"] = json!("2019-06-26T22:33:00Z");
    let repo: Repository = serde_json::from_value(raw).unwrap();
    assert!(matches!(repo.created_at, RepoTimestamp::Rfc3339(_)));
  }
}
