//! Issue endpoints.

use common::Label;
use reqwest::Method;

use crate::client::{ClientError, Expect, ForgeClient, Payload, Reply};
use crate::models::{Issue, IssueComment, IssueRequest, PullRequest};

/// Issue calls, one wrapper per endpoint.
pub struct IssuesService<'a> {
    pub(crate) api: &'a ForgeClient,
}

impl IssuesService<'_> {
    /// Update an issue. Issues are owner-scoped on this forge, so no
    /// repository segment appears in the path.
    pub async fn update_issue(
        &self,
        owner: &str,
        number: &str,
        content: &IssueRequest,
    ) -> Result<Reply<Issue>, ClientError> {
        let path = format!("repos/{owner}/issues/{number}");
        self.api
            .call(Method::PATCH, &path, Payload::json(content)?, Expect::Created)
            .await
    }

    /// List the pull requests linked to an issue.
    pub async fn list_issue_linking_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
    ) -> Result<Reply<Vec<PullRequest>>, ClientError> {
        let path = format!("repos/{owner}/issues/{number}/pull_requests");
        let query = Payload::Query(vec![("repo".to_string(), repo.to_string())]);
        self.api.call(Method::GET, &path, query, Expect::Get).await
    }

    /// Create a comment on an issue.
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        comment: &IssueComment,
    ) -> Result<Reply<IssueComment>, ClientError> {
        let path = format!("repos/{owner}/{repo}/issues/{number}/comments");
        self.api
            .call(Method::POST, &path, Payload::json(comment)?, Expect::Created)
            .await
    }

    /// List all issue labels defined on a repository.
    pub async fn list_repo_issue_labels(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Reply<Vec<Label>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/labels");
        self.api
            .call(Method::GET, &path, Payload::None, Expect::Get)
            .await
    }

    /// Create an issue label on a repository.
    pub async fn create_repo_issue_label(
        &self,
        owner: &str,
        repo: &str,
        label: &Label,
    ) -> Result<Reply<Label>, ClientError> {
        let path = format!("repos/{owner}/{repo}/labels");
        let form = Payload::Form(label_form(label));
        self.api.call(Method::POST, &path, form, Expect::Created).await
    }

    /// Rename or recolor a repository issue label.
    pub async fn update_repo_issue_label(
        &self,
        owner: &str,
        repo: &str,
        original_name: &str,
        new_name: &str,
        color: &str,
    ) -> Result<Reply<Label>, ClientError> {
        let path = format!("repos/{owner}/{repo}/labels/{original_name}");
        let form = Payload::Form(vec![
            ("name".to_string(), new_name.to_string()),
            ("color".to_string(), color.to_string()),
        ]);
        self.api.call(Method::PATCH, &path, form, Expect::Modified).await
    }

    /// Delete a repository issue label.
    pub async fn delete_repo_issue_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<Reply<()>, ClientError> {
        let path = format!("repos/{owner}/{repo}/labels/{name}");
        self.api
            .call_unit(Method::DELETE, &path, Payload::None, Expect::Modified)
            .await
    }

    /// Attach labels to an issue by name.
    pub async fn add_labels_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        label_names: &[String],
    ) -> Result<Reply<Vec<Label>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/issues/{number}/labels");
        self.api
            .call(Method::POST, &path, Payload::json(&label_names)?, Expect::Created)
            .await
    }

    /// Detach labels from an issue. `labels` is a comma-separated list
    /// of names.
    pub async fn remove_labels_from_issue(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        labels: &str,
    ) -> Result<Reply<()>, ClientError> {
        let path = format!("repos/{owner}/{repo}/issues/{number}/labels/{labels}");
        self.api
            .call_unit(Method::DELETE, &path, Payload::None, Expect::Modified)
            .await
    }
}

fn label_form(label: &Label) -> Vec<(String, String)> {
    let mut form = Vec::new();
    if let Some(name) = &label.name {
        form.push(("name".to_string(), name.clone()));
    }
    if let Some(color) = &label.color {
        form.push(("color".to_string(), color.clone()));
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_form_only_carries_set_fields() {
        let label = Label {
            name: Some("bug".to_string()),
            color: Some("#d73a4a".to_string()),
            ..Default::default()
        };
        assert_eq!(
            label_form(&label),
            vec![
                ("name".to_string(), "bug".to_string()),
                ("color".to_string(), "#d73a4a".to_string()),
            ]
        );

        assert!(label_form(&Label::default()).is_empty());
    }
}
