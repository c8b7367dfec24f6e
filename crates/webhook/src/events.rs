//! Event payload records as the forge delivers them.
//!
//! Every field is optional and every record has a zero value: a delivery
//! that fails to parse degrades to the variant's default rather than an
//! error (see [`crate::dispatch`]).

use common::{Label, Timestamp, User};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Repository identity as embedded in webhook payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: Option<String>,
    pub namespace: Option<String>,
    #[serde(rename = "path_with_namespace")]
    pub path: Option<String>,
    pub web_url: Option<String>,
}

/// The `object_attributes` block shared by issue, merge-request and note
/// deliveries. Which fields arrive populated depends on the event kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub id: Option<Number>,
    pub action: Option<String>,
    #[serde(rename = "update_reason")]
    pub action_detail: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "iid")]
    pub number: Option<i64>,
    #[serde(rename = "discussion_id")]
    pub comment_id: Option<String>,
    #[serde(rename = "note")]
    pub comment: Option<String>,
    #[serde(rename = "noteable_type")]
    pub comment_kind: Option<String>,
    pub url: Option<String>,
    pub target_branch: Option<String>,
    pub source: Option<Project>,
    pub source_branch: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// The issue a note event is attached to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuePart {
    pub action: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "iid")]
    pub number: Option<i64>,
    pub author: Option<User>,
    pub id: Option<Number>,
}

/// The merge request a note event is attached to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrPart {
    pub action: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "iid")]
    pub number: Option<i64>,
    pub author: Option<User>,
    pub target_branch: Option<String>,
    pub source: Option<Project>,
    pub source_branch: Option<String>,
    pub id: Option<Number>,
}

/// An issue lifecycle change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueEvent {
    pub uuid: Option<String>,
    pub event_type: Option<String>,
    pub object_kind: Option<String>,
    pub manual_build: Option<bool>,
    #[serde(rename = "object_attributes")]
    pub attributes: Option<Attributes>,
    pub user: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    pub project: Option<Project>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub issue: Option<IssuePart>,
}

/// A merge-request lifecycle change. Same envelope shape as
/// [`IssueEvent`] but with the branch fields of [`Attributes`] populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub uuid: Option<String>,
    pub event_type: Option<String>,
    pub object_kind: Option<String>,
    pub manual_build: Option<bool>,
    #[serde(rename = "object_attributes")]
    pub attributes: Option<Attributes>,
    pub user: Option<User>,
    pub project: Option<Project>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub merge_request: Option<PrPart>,
}

/// A comment on an issue or merge request. Exactly one of `issue` and
/// `merge_request` is populated on a valid delivery; action and state
/// come from whichever part is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteEvent {
    pub uuid: Option<String>,
    pub event_type: Option<String>,
    pub object_kind: Option<String>,
    pub manual_build: Option<bool>,
    #[serde(rename = "object_attributes")]
    pub attributes: Option<Attributes>,
    pub user: Option<User>,
    pub project: Option<Project>,
    // Note payloads may carry labels but the accessor contract exposes none.
    #[serde(default)]
    pub labels: Vec<Label>,
    pub issue: Option<IssuePart>,
    pub merge_request: Option<PrPart>,
}

/// A code push. Structurally disjoint from the other variants: no
/// attributes block, no labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushEvent {
    pub uuid: Option<String>,
    #[serde(rename = "event_name")]
    pub event_type: Option<String>,
    pub object_kind: Option<String>,
    pub manual_build: Option<bool>,
    pub project: Option<Project>,
    pub git_branch: Option<String>,
    #[serde(rename = "user_username")]
    pub author: Option<String>,
}
