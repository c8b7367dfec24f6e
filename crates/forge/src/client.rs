//! Shared request engine behind the per-endpoint services.
//!
//! Builds authenticated requests against the versioned API root, encodes
//! bodies as JSON, URL-form or query string per call, retries transient
//! failures with a linear backoff, and classifies success by exact
//! status-code sets.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::issues::IssuesService;
use crate::pulls::PullRequestsService;
use crate::repository::RepositoryService;
use crate::user::UserService;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url {url}: {reason}")]
    Url { url: String, reason: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("path traversal rejected: {0}")]
    ForbiddenPath(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forge api error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Client configuration, immutable after construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Versioned API root, e.g. `https://forge.example.com/api/v5/`.
    pub base_url: String,
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://forge.example.com/api/v5/".to_string(),
            token: None,
            user_agent: "forgehook/0.1".to_string(),
        }
    }
}

/// Per-call request body encoding.
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    None,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
    Query(Vec<(String, String)>),
}

impl Payload {
    pub(crate) fn json<T: Serialize>(body: &T) -> Result<Self, ClientError> {
        Ok(Payload::Json(serde_json::to_value(body)?))
    }
}

/// `GET`, `PUT` or `DELETE` succeeded and the resource is returned.
pub fn success_get(status: StatusCode) -> bool {
    status == StatusCode::OK
}

/// A create-style request succeeded.
pub fn success_created(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201)
}

/// A modify-style request succeeded, possibly with no response body.
pub fn success_modified(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 202 | 204)
}

/// Which success classification an endpoint uses.
#[derive(Debug, Clone, Copy)]
pub enum Expect {
    Get,
    Created,
    Modified,
}

impl Expect {
    pub fn matches(self, status: StatusCode) -> bool {
        match self {
            Expect::Get => success_get(status),
            Expect::Created => success_created(status),
            Expect::Modified => success_modified(status),
        }
    }
}

/// A decoded response plus its success classification.
///
/// A call never yields both a populated value and an error: failures
/// surface as [`ClientError`], while an unexpected-but-successful status
/// only clears `ok`.
#[derive(Debug)]
pub struct Reply<T> {
    pub value: T,
    pub ok: bool,
    pub status: StatusCode,
}

const RETRY_ATTEMPTS: u32 = 3;

/// A client for the forge REST API.
///
/// Stateless per request and safe to share across tasks.
pub struct ForgeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ForgeClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|err| ClientError::Url {
            url: config.base_url.clone(),
            reason: err.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| ClientError::Config(format!("unusable api token: {err}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService { api: self }
    }

    pub fn pulls(&self) -> PullRequestsService<'_> {
        PullRequestsService { api: self }
    }

    pub fn repository(&self) -> RepositoryService<'_> {
        RepositoryService { api: self }
    }

    pub fn user(&self) -> UserService<'_> {
        UserService { api: self }
    }

    /// Runs a call and decodes the response body into `T`.
    ///
    /// An empty response body decodes to `T::default()`, matching the
    /// forge's habit of answering modify calls with no content.
    pub(crate) async fn call<T>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        expect: Expect,
    ) -> Result<Reply<T>, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        let (status, body) = self.send(method, path, &payload).await?;
        let value = if body.is_empty() {
            T::default()
        } else {
            serde_json::from_slice(&body)?
        };
        Ok(Reply {
            value,
            ok: expect.matches(status),
            status,
        })
    }

    /// Runs a call whose response body is irrelevant.
    pub(crate) async fn call_unit(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        expect: Expect,
    ) -> Result<Reply<()>, ClientError> {
        let (status, _) = self.send(method, path, &payload).await?;
        Ok(Reply {
            value: (),
            ok: expect.matches(status),
            status,
        })
    }

    /// Runs a call and returns the raw JSON response for callers that
    /// need to inspect the shape before decoding.
    pub(crate) async fn call_raw(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<(StatusCode, serde_json::Value), ClientError> {
        let (status, body) = self.send(method, path, &payload).await?;
        let value = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body)?
        };
        Ok((status, value))
    }

    /// Sends the request with the bounded retry loop and converts
    /// non-success statuses into errors carrying the raw body text.
    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
    ) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let url = self.base_url.join(path).map_err(|err| ClientError::Url {
            url: path.to_string(),
            reason: err.to_string(),
        })?;
        debug!(%method, %url, "forge api call");

        let mut outcome: Option<Result<(StatusCode, Vec<u8>), ClientError>> = None;
        for attempt in 1..=RETRY_ATTEMPTS {
            match self.build(&method, url.clone(), payload).send().await {
                Ok(resp) if !resp.status().is_server_error() => {
                    let status = resp.status();
                    let body = resp.bytes().await?.to_vec();
                    return self.classify(&url, status, body);
                }
                Ok(resp) => {
                    let status = resp.status();
                    warn!(%status, attempt, "server error from forge api, retrying");
                    let body = resp.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
                    outcome = Some(self.classify(&url, status, body));
                }
                Err(err) => {
                    warn!(%err, attempt, "transport failure reaching forge api, retrying");
                    outcome = Some(Err(err.into()));
                }
            }
            // Linear backoff in whole seconds; cancellation propagates by
            // dropping the future.
            tokio::time::sleep(Duration::from_secs(u64::from(attempt))).await;
        }

        match outcome {
            Some(result) => result,
            // the loop always runs at least once
            None => Err(ClientError::Api {
                status: 0,
                message: "no response".to_string(),
            }),
        }
    }

    fn classify(
        &self,
        url: &Url,
        status: StatusCode,
        body: Vec<u8>,
    ) -> Result<(StatusCode, Vec<u8>), ClientError> {
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if status.as_u16() >= 400 {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok((status, body))
    }

    fn build(&self, method: &Method, url: Url, payload: &Payload) -> reqwest::RequestBuilder {
        let builder = self.http.request(method.clone(), url);
        match payload {
            Payload::None => builder,
            Payload::Json(value) => builder.json(value),
            Payload::Form(pairs) => builder.form(pairs),
            Payload::Query(pairs) => builder.query(pairs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ForgeClient::new(ApiConfig::default()).unwrap();
        assert_eq!(client.base_url.as_str(), "https://forge.example.com/api/v5/");

        let client = ForgeClient::new(ApiConfig {
            token: Some("t0ken".to_string()),
            ..Default::default()
        });
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_malformed_base_url() {
        let result = ForgeClient::new(ApiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ClientError::Url { .. })));
    }

    #[test]
    fn relative_paths_join_under_the_api_root() {
        let client = ForgeClient::new(ApiConfig::default()).unwrap();
        let url = client.base_url.join("repos/tangerine/widgets/labels").unwrap();
        assert_eq!(
            url.as_str(),
            "https://forge.example.com/api/v5/repos/tangerine/widgets/labels"
        );
    }

    #[test]
    fn success_predicates_use_exact_status_sets() {
        assert!(success_get(StatusCode::OK));
        assert!(!success_get(StatusCode::CREATED));
        assert!(!success_get(StatusCode::NO_CONTENT));

        assert!(success_created(StatusCode::OK));
        assert!(success_created(StatusCode::CREATED));
        assert!(!success_created(StatusCode::ACCEPTED));

        assert!(success_modified(StatusCode::OK));
        assert!(success_modified(StatusCode::ACCEPTED));
        assert!(success_modified(StatusCode::NO_CONTENT));
        assert!(!success_modified(StatusCode::CREATED));
    }

    #[test]
    fn expect_delegates_to_the_matching_predicate() {
        assert!(Expect::Get.matches(StatusCode::OK));
        assert!(!Expect::Get.matches(StatusCode::CREATED));
        assert!(Expect::Created.matches(StatusCode::CREATED));
        assert!(Expect::Modified.matches(StatusCode::NO_CONTENT));
    }

    #[test]
    fn payload_json_encodes_serializable_bodies() {
        let payload = Payload::json(&vec!["bug".to_string(), "kind/cleanup".to_string()]).unwrap();
        match payload {
            Payload::Json(value) => assert_eq!(value, serde_json::json!(["bug", "kind/cleanup"])),
            other => panic!("expected json payload, got {other:?}"),
        }
    }
}
