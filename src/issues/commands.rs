//! The create-issues and close-issue utilities.
//!
//! Both write their human-readable report to the supplied writer and keep
//! going after a rejected request. Only a missing token, a missing document
//! or a failed write end a run early.

use std::io::Write;
use std::path::PathBuf;

use tracing::{error, info, instrument};
use url::Url;

use super::client::GitHubClient;
use super::parser::load_issue_document;
use super::types::{CloseOutcome, CreateOutcome, IssueDraft, RepoSlug, RunSummary};
use crate::error::{IssueError, Result};

/// Repository targeted when none is given.
pub const DEFAULT_REPO: &str = "JasonIngersoll9000/Debate-me-bro";
/// Issue document read when none is given.
pub const DEFAULT_ISSUES_FILE: &str = "Docs/Github_Issues.md";
/// Issue closed when none is given.
pub const DEFAULT_ISSUE_NUMBER: u64 = 1;

/// Options for [`create_issues`] and [`preview_issues`].
#[derive(Debug, Clone)]
pub struct CreateIssuesOptions {
    /// API base URL.
    pub api_url: Url,
    /// Target repository.
    pub repo: RepoSlug,
    /// Markdown issue document.
    pub file: PathBuf,
}

/// Options for [`close_issue`].
#[derive(Debug, Clone)]
pub struct CloseIssueOptions {
    /// API base URL.
    pub api_url: Url,
    /// Target repository.
    pub repo: RepoSlug,
    /// Issue to close.
    pub number: u64,
}

/// Accept a token only if it is present and non-empty.
pub fn require_token(token: Option<String>) -> std::result::Result<String, IssueError> {
    token
        .filter(|t| !t.is_empty())
        .ok_or(IssueError::MissingToken)
}

/// Create one issue per section of the document.
///
/// The token is checked before anything else; without it no client is built
/// and nothing is sent.
#[instrument(skip(token, out), fields(repo = %options.repo))]
pub async fn create_issues<W: Write>(
    options: &CreateIssuesOptions,
    token: Option<String>,
    out: &mut W,
) -> Result<RunSummary> {
    let token = require_token(token)?;

    writeln!(out, "Creating issues in repository: {}...", options.repo)?;
    let drafts = load_issue_document(&options.file).await?;
    info!(count = drafts.len(), file = %options.file.display(), "Loaded issue drafts");

    let client = GitHubClient::new(options.api_url.clone(), options.repo.clone(), token)?;
    let mut summary = RunSummary::default();

    for draft in &drafts {
        match client.create_issue(draft).await {
            Ok(CreateOutcome::Created { html_url }) => {
                summary.record_success();
                writeln!(out, "Created: {} ({})", draft.title, html_url)?;
            }
            Ok(CreateOutcome::Unexpected { status }) => {
                summary.record_failure();
                writeln!(out, "Failed: {} (Status {})", draft.title, status)?;
            }
            Ok(CreateOutcome::HttpError { status, body }) => {
                summary.record_failure();
                writeln!(out, "HTTPError: {} for issue '{}'", status, draft.title)?;
                writeln!(out, "Details: {}", body)?;
            }
            Err(e) => {
                summary.record_failure();
                error!(error = %e, title = %draft.title, "Create request failed");
                writeln!(out, "Request failed for issue '{}': {}", draft.title, e)?;
            }
        }
    }

    writeln!(out, "Done!")?;
    info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Create run finished"
    );
    Ok(summary)
}

/// Parse the document and print what would be created, without a token or
/// network access.
pub async fn preview_issues<W: Write>(
    options: &CreateIssuesOptions,
    out: &mut W,
) -> Result<Vec<IssueDraft>> {
    let drafts = load_issue_document(&options.file).await?;

    writeln!(
        out,
        "Dry run: {} issue(s) would be created in {}",
        drafts.len(),
        options.repo
    )?;
    for (index, draft) in drafts.iter().enumerate() {
        if draft.labels.is_empty() {
            writeln!(out, "  {}. {}", index + 1, draft.title)?;
        } else {
            writeln!(
                out,
                "  {}. {} [{}]",
                index + 1,
                draft.title,
                draft.labels.join(", ")
            )?;
        }
    }

    Ok(drafts)
}

/// Close a single issue.
#[instrument(skip(token, out), fields(repo = %options.repo, number = options.number))]
pub async fn close_issue<W: Write>(
    options: &CloseIssueOptions,
    token: Option<String>,
    out: &mut W,
) -> Result<RunSummary> {
    let token = require_token(token)?;
    let number = options.number;

    writeln!(
        out,
        "Closing issue #{} in repository: {}...",
        number, options.repo
    )?;

    let client = GitHubClient::new(options.api_url.clone(), options.repo.clone(), token)?;
    let mut summary = RunSummary::default();

    match client.close_issue(number).await {
        Ok(CloseOutcome::Closed) => {
            summary.record_success();
            writeln!(out, "Closed: Issue #{}", number)?;
        }
        Ok(CloseOutcome::Unexpected { status }) => {
            summary.record_failure();
            writeln!(out, "Failed to close Issue #{} (Status {})", number, status)?;
        }
        Ok(CloseOutcome::HttpError { status, body }) => {
            summary.record_failure();
            writeln!(out, "HTTPError: {} for closing issue #{}", status, number)?;
            writeln!(out, "Details: {}", body)?;
        }
        Err(e) => {
            summary.record_failure();
            error!(error = %e, "Close request failed");
            writeln!(out, "Request failed for issue #{}: {}", number, e)?;
        }
    }

    writeln!(out, "Done!")?;
    Ok(summary)
}
