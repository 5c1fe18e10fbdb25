//! GitHub issue tooling.
//!
//! This module handles:
//! - Parsing a markdown document into issue drafts
//! - A minimal authenticated client for the issues REST API
//! - The create-issues and close-issue utilities built on both

pub mod client;
pub mod commands;
pub mod parser;
pub mod types;

pub use client::{GitHubClient, GITHUB_API_URL};
pub use commands::{
    close_issue, create_issues, preview_issues, require_token, CloseIssueOptions,
    CreateIssuesOptions,
};
pub use parser::{load_issue_document, parse_issue_document};
pub use types::{CloseOutcome, CreateOutcome, IssueDraft, IssueState, RepoSlug, RunSummary};
