//! Markdown issue-document parsing.
//!
//! A document is a sequence of sections, each introduced by a heading of the
//! form `## Issue #<n>: <title>`:
//!
//! ```text
//! ## Issue #1: Set up CI
//! **Labels:** `infra`, `ci`
//! **Milestone:** MVP
//!
//! Run tests on every push.
//! ```
//!
//! Marker lines are matched by exact prefix.

use std::io::ErrorKind;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use super::types::IssueDraft;
use crate::error::IssueError;

/// Separator between issue sections.
static ISSUE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"## Issue #\d+: ").expect("valid regex"));

/// Line carrying the comma-separated label list.
pub const LABELS_MARKER: &str = "**Labels:**";
/// Line dropped from the body.
pub const MILESTONE_MARKER: &str = "**Milestone:**";
/// Line dropped from the body.
pub const ASSIGNEE_MARKER: &str = "**Assignee:**";

/// Parse a markdown document into issue drafts, in document order.
///
/// Text before the first heading is ignored. A document without headings
/// yields no drafts.
pub fn parse_issue_document(content: &str) -> Vec<IssueDraft> {
    ISSUE_HEADING
        .split(content)
        .skip(1)
        .map(parse_section)
        .collect()
}

/// Read and parse the document at `path`.
#[instrument]
pub async fn load_issue_document(path: &Path) -> Result<Vec<IssueDraft>, IssueError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => IssueError::DocumentNotFound {
                path: path.to_path_buf(),
            },
            _ => IssueError::DocumentRead {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let drafts = parse_issue_document(&content);
    debug!(count = drafts.len(), "Parsed issue document");
    Ok(drafts)
}

fn parse_section(section: &str) -> IssueDraft {
    let mut lines = section.trim().split('\n');
    let title = lines.next().unwrap_or_default().trim().to_string();

    let mut labels = Vec::new();
    let mut body_lines = Vec::new();

    for line in lines {
        if line.starts_with(LABELS_MARKER) {
            labels = parse_labels(&line.replace(LABELS_MARKER, ""));
        } else if line.starts_with(MILESTONE_MARKER) || line.starts_with(ASSIGNEE_MARKER) {
            continue;
        } else {
            body_lines.push(line);
        }
    }

    IssueDraft {
        title,
        body: body_lines.join("\n").trim().to_string(),
        labels,
    }
}

fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().trim_matches('`').to_string())
        .collect()
}
