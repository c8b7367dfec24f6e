//! Pull-request endpoints.

use common::Label;
use reqwest::Method;

use crate::client::{ClientError, Expect, ForgeClient, Payload, Reply};
use crate::models::{
    CommitFile, Issue, MergeRequestBody, PullRequest, PullRequestComment,
    PullRequestCommentRequest, PullRequestMergedResult, PullRequestOperationLog,
    PullRequestRequest, RepositoryCommit,
};

/// Pull-request calls, one wrapper per endpoint.
pub struct PullRequestsService<'a> {
    pub(crate) api: &'a ForgeClient,
}

impl PullRequestsService<'_> {
    /// Fetch a single pull request.
    pub async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
    ) -> Result<Reply<PullRequest>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}");
        self.api
            .call(Method::GET, &path, Payload::None, Expect::Get)
            .await
    }

    /// Update a pull request.
    pub async fn update_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        content: &PullRequestRequest,
    ) -> Result<Reply<PullRequest>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}");
        self.api
            .call(Method::PATCH, &path, Payload::json(content)?, Expect::Created)
            .await
    }

    /// List the issues linked to a pull request.
    pub async fn list_pull_request_linking_issues(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
    ) -> Result<Reply<Vec<Issue>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/issues");
        self.api
            .call(Method::GET, &path, Payload::None, Expect::Get)
            .await
    }

    /// List the commits on a pull request.
    pub async fn list_pull_request_commits(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
    ) -> Result<Reply<Vec<RepositoryCommit>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/commits");
        self.api
            .call(Method::GET, &path, Payload::None, Expect::Get)
            .await
    }

    /// List the files a pull request changes.
    pub async fn list_pull_request_change_files(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
    ) -> Result<Reply<Vec<CommitFile>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/files");
        self.api
            .call(Method::GET, &path, Payload::None, Expect::Get)
            .await
    }

    /// Merge a pull request with the given merge method.
    pub async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        merge_method: &str,
    ) -> Result<Reply<PullRequestMergedResult>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/merge");
        let body = MergeRequestBody {
            merge_method: merge_method.to_string(),
        };
        self.api
            .call(Method::PUT, &path, Payload::json(&body)?, Expect::Created)
            .await
    }

    /// List the operation log of a pull request.
    pub async fn list_pull_request_operation_logs(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        sort: &str,
        page: &str,
    ) -> Result<Reply<Vec<PullRequestOperationLog>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/operate_logs");
        let query = Payload::Query(vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), "100".to_string()),
            ("sort".to_string(), sort.to_string()),
        ]);
        self.api.call(Method::GET, &path, query, Expect::Get).await
    }

    /// Create a comment on a pull request.
    pub async fn create_pull_request_comment(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        comment: &PullRequestCommentRequest,
    ) -> Result<Reply<PullRequestComment>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/comments");
        self.api
            .call(Method::POST, &path, Payload::json(comment)?, Expect::Created)
            .await
    }

    /// List the comments on a pull request.
    pub async fn list_pull_request_comments(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        page: &str,
        comment_type: &str,
    ) -> Result<Reply<Vec<PullRequestComment>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/comments");
        let query = Payload::Query(vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), "100".to_string()),
            ("comment_type".to_string(), comment_type.to_string()),
        ]);
        self.api.call(Method::GET, &path, query, Expect::Get).await
    }

    /// Edit an existing pull-request comment.
    pub async fn update_pull_request_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: &str,
        body: &str,
    ) -> Result<Reply<()>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/comments/{comment_id}");
        let content = PullRequestComment {
            body: Some(body.to_string()),
            ..Default::default()
        };
        self.api
            .call_unit(Method::PATCH, &path, Payload::json(&content)?, Expect::Modified)
            .await
    }

    /// Delete a pull-request comment.
    pub async fn delete_pull_request_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: &str,
    ) -> Result<Reply<()>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/comments/{comment_id}");
        self.api
            .call_unit(Method::DELETE, &path, Payload::None, Expect::Modified)
            .await
    }

    /// Attach labels to a pull request by name.
    pub async fn add_labels_to_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        label_names: &[String],
    ) -> Result<Reply<Vec<Label>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/labels");
        self.api
            .call(Method::POST, &path, Payload::json(&label_names)?, Expect::Created)
            .await
    }

    /// Detach labels from a pull request.
    pub async fn remove_labels_from_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
        labels: &[String],
    ) -> Result<Reply<()>, ClientError> {
        let path = format!(
            "repos/{owner}/{repo}/pulls/{number}/labels/{}",
            labels.join(",")
        );
        self.api
            .call_unit(Method::DELETE, &path, Payload::None, Expect::Modified)
            .await
    }

    /// List the labels on a pull request.
    pub async fn list_pull_request_labels(
        &self,
        owner: &str,
        repo: &str,
        number: &str,
    ) -> Result<Reply<Vec<Label>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/pulls/{number}/labels");
        self.api
            .call(Method::GET, &path, Payload::None, Expect::Get)
            .await
    }
}
