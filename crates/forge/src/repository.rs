//! Repository endpoints.

use common::User;
use reqwest::Method;

use crate::client::{success_get, ClientError, Expect, ForgeClient, Payload, Reply};
use crate::models::{Branch, Contributor, RepositoryContent};

/// Repository calls, one wrapper per endpoint.
pub struct RepositoryService<'a> {
    pub(crate) api: &'a ForgeClient,
}

impl RepositoryService<'_> {
    /// Fetch the content under a repository path at a ref.
    ///
    /// The endpoint answers with a single object for a file and an array
    /// for a directory; both shapes come back as a list here. `ok`
    /// additionally requires a non-empty result.
    pub async fn get_repo_content_by_path(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_name: &str,
    ) -> Result<Reply<Vec<RepositoryContent>>, ClientError> {
        if path.contains("..") {
            return Err(ClientError::ForbiddenPath(path.to_string()));
        }

        let trimmed = path.trim_end_matches('/');
        let url_path = format!("repos/{owner}/{repo}/contents/{trimmed}");
        let query = Payload::Query(vec![("ref".to_string(), ref_name.to_string())]);
        let (status, raw) = self.api.call_raw(Method::GET, &url_path, query).await?;

        let contents: Vec<RepositoryContent> = if raw.is_object() {
            vec![serde_json::from_value(raw)?]
        } else if raw.is_array() {
            serde_json::from_value(raw)?
        } else {
            Vec::new()
        };

        let ok = success_get(status) && !contents.is_empty();
        Ok(Reply {
            value: contents,
            ok,
            status,
        })
    }

    /// List file paths in a repository tree, optionally filtered by name.
    pub async fn list_repo_files(
        &self,
        owner: &str,
        repo: &str,
        ref_name: &str,
        file_name: &str,
    ) -> Result<Reply<Vec<String>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/file_list");
        let query = Payload::Query(vec![
            ("ref_name".to_string(), ref_name.to_string()),
            ("file_name".to_string(), file_name.to_string()),
        ]);
        self.api.call(Method::GET, &path, query, Expect::Get).await
    }

    /// List the contributors of a repository.
    pub async fn list_repo_contributors(
        &self,
        owner: &str,
        repo: &str,
        kind: &str,
    ) -> Result<Reply<Vec<Contributor>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/contributors");
        let query = Payload::Query(vec![("type".to_string(), kind.to_string())]);
        self.api.call(Method::GET, &path, query, Expect::Get).await
    }

    /// List the branches of a repository.
    pub async fn list_repo_branches(
        &self,
        owner: &str,
        repo: &str,
        sort: &str,
        direction: &str,
        page: &str,
    ) -> Result<Reply<Vec<Branch>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/branches");
        let query = Payload::Query(vec![
            ("sort".to_string(), sort.to_string()),
            ("direction".to_string(), direction.to_string()),
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), "100".to_string()),
        ]);
        self.api.call(Method::GET, &path, query, Expect::Get).await
    }

    /// Create a branch from a ref.
    pub async fn create_repo_branch(
        &self,
        owner: &str,
        repo: &str,
        refs: &str,
        name: &str,
    ) -> Result<Reply<Branch>, ClientError> {
        let path = format!("repos/{owner}/{repo}/branches");
        let query = Payload::Query(vec![
            ("refs".to_string(), refs.to_string()),
            ("branch_name".to_string(), name.to_string()),
        ]);
        self.api
            .call(Method::POST, &path, query, Expect::Created)
            .await
    }

    /// List the members (collaborators) of a repository.
    pub async fn list_repo_members(
        &self,
        owner: &str,
        repo: &str,
        page: &str,
    ) -> Result<Reply<Vec<User>>, ClientError> {
        let path = format!("repos/{owner}/{repo}/collaborators");
        let query = Payload::Query(vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), "100".to_string()),
        ]);
        self.api.call(Method::GET, &path, query, Expect::Get).await
    }

    /// Fetch a member's permission on a repository.
    pub async fn get_repo_member_permission(
        &self,
        owner: &str,
        repo: &str,
        login: &str,
    ) -> Result<Reply<User>, ClientError> {
        let path = format!("repos/{owner}/{repo}/collaborators/{login}/permission");
        self.api
            .call(Method::GET, &path, Payload::None, Expect::Modified)
            .await
    }

    /// Whether a user is a member of the repository. A 404 from the
    /// forge means "not a member", not a failure.
    pub async fn is_repo_member(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
    ) -> Result<bool, ClientError> {
        let path = format!("repos/{owner}/{repo}/collaborators/{username}");
        match self
            .api
            .call_unit(Method::GET, &path, Payload::None, Expect::Modified)
            .await
        {
            Ok(reply) => Ok(reply.ok),
            Err(ClientError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
