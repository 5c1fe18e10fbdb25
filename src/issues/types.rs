//! Issue tracker data types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::IssueError;

/// One issue parsed out of a markdown document, ready to be submitted.
///
/// Serializes to exactly the create-issue request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
    /// Single-line title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Label names, in document order.
    pub labels: Vec<String>,
}

/// Issue state as the tracker spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueState {
    /// Issue is open.
    Open,
    /// Issue is closed.
    Closed,
}

/// Body of a state-change request.
#[derive(Debug, Clone, Serialize)]
pub struct StateUpdate {
    /// Target state.
    pub state: IssueState,
}

/// Subset of the tracker's issue representation we read back.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueResponse {
    /// Issue number.
    pub number: u64,
    /// Web URL of the issue.
    pub html_url: String,
}

/// Repository identifier in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoSlug {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(IssueError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Result of a create request that received an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// 201: the issue exists at `html_url`.
    Created {
        /// Web URL of the new issue.
        html_url: String,
    },
    /// A non-error status other than 201.
    Unexpected {
        /// Status code received.
        status: u16,
    },
    /// A 4xx/5xx status.
    HttpError {
        /// Status code received.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// Result of a close request that received an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// 200: the issue is closed.
    Closed,
    /// A non-error status other than 200.
    Unexpected {
        /// Status code received.
        status: u16,
    },
    /// A 4xx/5xx status.
    HttpError {
        /// Status code received.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// Tally of one utility run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests sent.
    pub attempted: usize,
    /// Requests that did what was asked.
    pub succeeded: usize,
    /// Requests that were rejected or failed in transport.
    pub failed: usize,
}

impl RunSummary {
    /// Count a successful request.
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    /// Count a failed request.
    pub fn record_failure(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }
}
