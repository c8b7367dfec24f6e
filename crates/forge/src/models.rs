//! API request and response records.
//!
//! Response structs keep every field optional: the forge omits fields
//! freely per endpoint, and a partially-populated record is still a valid
//! decode. Request structs skip unset fields so a PATCH only carries what
//! the caller set.

use common::{Label, Timestamp, User};
use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    pub id: Option<i64>,
    pub html_url: Option<String>,
    /// Issues are numbered with an opaque string on this forge.
    pub number: Option<String>,
    pub state: Option<String>,
    pub issue_state: Option<String>,
    pub issue_state_detail: Option<IssueStateDetail>,
    pub priority: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub user: Option<User>,
    pub assignee: Option<User>,
    pub repository: Option<Repository>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "finished_at")]
    pub closed_at: Option<Timestamp>,
    pub closed_by: Option<User>,
    #[serde(rename = "pull_request")]
    pub pull_request_links: Option<PullRequestLinks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueStateDetail {
    pub title: Option<String>,
    pub serial: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestLinks {
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub diff_url: Option<String>,
    pub patch_url: Option<String>,
    pub merged_at: Option<Timestamp>,
}

/// Body of an issue create/update call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueRequest {
    /// Repository path the issue lives in; required by the API.
    #[serde(rename = "repo", skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Comma-separated label names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    /// Username of the assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_hole: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_severity: Option<String>,
}

/// An issue comment; also the body of a comment create call, so unset
/// fields stay off the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueComment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Issue>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: Option<i64>,
    pub number: Option<i64>,
    pub state: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
    pub merged_at: Option<Timestamp>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub user: Option<User>,
    pub draft: Option<bool>,
    pub can_merge_check: Option<bool>,
    pub merged: Option<bool>,
    pub mergeable: Option<bool>,
    pub mergeable_state: Option<MergeableState>,
    pub merged_by: Option<User>,
    pub prune_branch: Option<bool>,
    pub head: Option<PullRequestBranch>,
    pub base: Option<PullRequestBranch>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub issue_url: Option<String>,
    pub diff_url: Option<String>,
    pub patch_url: Option<String>,
    pub comments_url: Option<String>,
    pub review_comments: Option<i32>,
    pub assignee: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub requested_reviewers: Vec<User>,
}

/// A base or head branch of a pull request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestBranch {
    pub label: Option<String>,
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
    pub sha: Option<String>,
    pub repo: Option<Box<Repository>>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeableState {
    pub merge_request_id: Option<i64>,
    pub state: Option<bool>,
}

/// Body of a pull-request update call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PullRequestRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Comma-separated label names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct MergeRequestBody {
    pub merge_method: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestMergedResult {
    pub sha: Option<String>,
    pub merged: Option<bool>,
    pub message: Option<String>,
}

/// A pull-request comment; also the body of a comment edit call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestComment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Body of a pull-request review comment create call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PullRequestCommentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestOperationLog {
    pub project: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub discussion_id: Option<i64>,
    pub id: Option<i64>,
    pub content: Option<String>,
    pub action: Option<String>,
    pub merge_request_id: Option<i64>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    pub id: Option<i64>,
    pub owner: Option<User>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub default_branch: Option<String>,
    pub created_at: Option<Timestamp>,
    pub pushed_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub html_url: Option<String>,
    pub clone_url: Option<String>,
    pub ssh_url: Option<String>,
    pub language: Option<String>,
    pub fork: Option<bool>,
    pub forks_count: Option<i32>,
    pub open_issues_count: Option<i32>,
    pub stargazers_count: Option<i32>,
    pub watchers_count: Option<i32>,
    pub private: Option<bool>,
    pub archived: Option<bool>,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryCommit {
    pub sha: Option<String>,
    pub commit: Option<Commit>,
    pub author: Option<CommitUser>,
    pub committer: Option<CommitUser>,
    pub html_url: Option<String>,
    pub url: Option<String>,
    pub comments_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Commit {
    pub sha: Option<String>,
    pub author: Option<CommitUser>,
    pub committer: Option<CommitUser>,
    pub message: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitUser {
    pub login: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitPatch {
    pub diff: Option<String>,
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub new_file: Option<bool>,
    pub renamed_file: Option<bool>,
    pub deleted_file: Option<bool>,
    pub too_large: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitFile {
    pub sha: Option<String>,
    pub filename: Option<String>,
    pub additions: Option<i32>,
    pub deletions: Option<i32>,
    pub changes: Option<i32>,
    pub status: Option<String>,
    pub patch: Option<CommitPatch>,
    pub blob_url: Option<String>,
    pub raw_url: Option<String>,
    pub previous_filename: Option<String>,
}

/// A file or directory entry under a repository path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryContent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub encoding: Option<String>,
    pub size: Option<i64>,
    pub name: Option<String>,
    pub path: Option<String>,
    /// File content, possibly base64-encoded per `encoding`.
    pub content: Option<String>,
    pub sha: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contributor {
    pub contributions: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Branch {
    pub name: Option<String>,
    pub commit: Option<RepositoryCommit>,
    pub protected: Option<bool>,
}
