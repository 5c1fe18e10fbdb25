//! GitHub issues REST client.

use reqwest::{Response, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use super::types::{
    CloseOutcome, CreateOutcome, IssueDraft, IssueResponse, IssueState, RepoSlug, StateUpdate,
};
use crate::error::IssueError;

/// Public GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("debatemebro/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for one repository's issues.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// API base URL.
    api_url: Url,
    /// Target repository.
    repo: RepoSlug,
    /// Bearer token.
    token: String,
}

impl GitHubClient {
    /// Create a client for `repo` authenticated with `token`.
    pub fn new(api_url: Url, repo: RepoSlug, token: String) -> Result<Self, IssueError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_url,
            repo,
            token,
        })
    }

    /// Target repository.
    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// URL of the repository's issues collection.
    pub fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url.as_str().trim_end_matches('/'),
            self.repo.owner(),
            self.repo.name()
        )
    }

    /// URL of a single issue.
    pub fn issue_url(&self, number: u64) -> String {
        format!("{}/{}", self.issues_url(), number)
    }

    /// Create an issue from a draft.
    ///
    /// Any HTTP response maps to a [`CreateOutcome`]; only transport failures
    /// and an unreadable 201 body are errors.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_issue(&self, draft: &IssueDraft) -> Result<CreateOutcome, IssueError> {
        let response = self
            .http
            .post(self.issues_url())
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .json(draft)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Create issue response");

        if status == StatusCode::CREATED {
            let issue: IssueResponse = response
                .json()
                .await
                .map_err(|e| IssueError::ParseError(e.to_string()))?;
            debug!(number = issue.number, "Issue created");
            return Ok(CreateOutcome::Created {
                html_url: issue.html_url,
            });
        }

        if is_error_status(status) {
            let body = error_body(response).await;
            warn!(status = status.as_u16(), "Create issue rejected");
            return Ok(CreateOutcome::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(CreateOutcome::Unexpected {
            status: status.as_u16(),
        })
    }

    /// Close issue `number`.
    #[instrument(skip(self))]
    pub async fn close_issue(&self, number: u64) -> Result<CloseOutcome, IssueError> {
        let response = self
            .http
            .patch(self.issue_url(number))
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
            .json(&StateUpdate {
                state: IssueState::Closed,
            })
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Close issue response");

        if status == StatusCode::OK {
            return Ok(CloseOutcome::Closed);
        }

        if is_error_status(status) {
            let body = error_body(response).await;
            warn!(status = status.as_u16(), "Close issue rejected");
            return Ok(CloseOutcome::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(CloseOutcome::Unexpected {
            status: status.as_u16(),
        })
    }
}

fn is_error_status(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

async fn error_body(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}
