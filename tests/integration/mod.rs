//! Integration tests for the DebateMeBro service and issue utilities.
//!
//! GitHub is replaced by a local `wiremock` server; nothing here touches the
//! real API.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use debatemebro::api::create_router;
use debatemebro::error::{AppError, IssueError};
use debatemebro::issues::{
    close_issue, create_issues, CloseIssueOptions, CreateIssuesOptions, RunSummary,
};
use serde_json::json;
use tempfile::TempDir;
use tokio::net::TcpListener;
use url::Url;
use wiremock::matchers::{any, body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

const DOCUMENT: &str = r#"# Debate-me-bro backlog

Sections below are turned into GitHub issues.

## Issue #1: Scaffold FastAPI backend
**Labels:** `backend`, `setup`
**Milestone:** MVP
**Assignee:** @jason

Create the service skeleton with a health check.

## Issue #2: Landing page
**Labels:** `frontend`

Topic input and suggested debates.
"#;

fn write_document(dir: &TempDir, content: &str) -> PathBuf {
    let file = dir.path().join("Github_Issues.md");
    std::fs::write(&file, content).expect("write issue document");
    file
}

fn create_options(server: &MockServer, file: &Path) -> CreateIssuesOptions {
    CreateIssuesOptions {
        api_url: Url::parse(&server.uri()).unwrap(),
        repo: "owner/repo".parse().unwrap(),
        file: file.to_path_buf(),
    }
}

fn close_options(server: &MockServer, number: u64) -> CloseIssueOptions {
    CloseIssueOptions {
        api_url: Url::parse(&server.uri()).unwrap(),
        repo: "owner/repo".parse().unwrap(),
        number,
    }
}

fn created(number: u64) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "number": number,
        "html_url": format!("https://github.com/owner/repo/issues/{number}"),
        "state": "open"
    }))
}

#[tokio::test]
async fn create_issues_posts_each_draft() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/owner/repo/issues"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "title": "Scaffold FastAPI backend",
            "body": "Create the service skeleton with a health check.",
            "labels": ["backend", "setup"]
        })))
        .respond_with(created(1))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repos/owner/repo/issues"))
        .and(body_json(json!({
            "title": "Landing page",
            "body": "Topic input and suggested debates.",
            "labels": ["frontend"]
        })))
        .respond_with(created(2))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, DOCUMENT);
    let mut out = Vec::new();

    let summary = create_issues(&create_options(&server, &file), Some(TOKEN.to_string()), &mut out)
        .await
        .expect("create run succeeds");

    assert_eq!(
        summary,
        RunSummary {
            attempted: 2,
            succeeded: 2,
            failed: 0
        }
    );
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Creating issues in repository: owner/repo...\n\
         Created: Scaffold FastAPI backend (https://github.com/owner/repo/issues/1)\n\
         Created: Landing page (https://github.com/owner/repo/issues/2)\n\
         Done!\n"
    );
}

#[tokio::test]
async fn create_issues_reports_rejections_and_continues() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/owner/repo/issues"))
        .and(body_partial_json(json!({"title": "Scaffold FastAPI backend"})))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_string(r#"{"message":"Validation Failed"}"#),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repos/owner/repo/issues"))
        .and(body_partial_json(json!({"title": "Landing page"})))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, DOCUMENT);
    let mut out = Vec::new();

    let summary = create_issues(&create_options(&server, &file), Some(TOKEN.to_string()), &mut out)
        .await
        .expect("rejections do not abort the run");

    assert_eq!(summary.failed, 2);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Creating issues in repository: owner/repo...\n\
         HTTPError: 422 for issue 'Scaffold FastAPI backend'\n\
         Details: {\"message\":\"Validation Failed\"}\n\
         Failed: Landing page (Status 202)\n\
         Done!\n"
    );
}

#[tokio::test]
async fn create_issues_without_token_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, DOCUMENT);
    let mut out = Vec::new();

    let err = create_issues(&create_options(&server, &file), None, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Issue(IssueError::MissingToken)));
    assert!(out.is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn create_issues_with_empty_document_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, "# Nothing planned yet\n");
    let mut out = Vec::new();

    let summary = create_issues(&create_options(&server, &file), Some(TOKEN.to_string()), &mut out)
        .await
        .unwrap();

    assert_eq!(summary, RunSummary::default());
}

#[tokio::test]
async fn create_issues_survives_transport_failure() {
    // Nothing listens on a port we just released.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let dir = TempDir::new().unwrap();
    let file = write_document(&dir, DOCUMENT);
    let options = CreateIssuesOptions {
        api_url: Url::parse(&format!("http://127.0.0.1:{port}")).unwrap(),
        repo: "owner/repo".parse().unwrap(),
        file,
    };
    let mut out = Vec::new();

    let summary = create_issues(&options, Some(TOKEN.to_string()), &mut out)
        .await
        .expect("transport failures do not abort the run");

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.failed, 2);
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Request failed for issue 'Scaffold FastAPI backend'"));
    assert!(printed.contains("Request failed for issue 'Landing page'"));
    assert!(printed.ends_with("Done!\n"));
}

#[tokio::test]
async fn close_issue_patches_state() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/owner/repo/issues/7"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({"state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 7,
            "state": "closed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let summary = close_issue(&close_options(&server, 7), Some(TOKEN.to_string()), &mut out)
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Closing issue #7 in repository: owner/repo...\nClosed: Issue #7\nDone!\n"
    );
}

#[tokio::test]
async fn close_issue_reports_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/owner/repo/issues/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let summary = close_issue(&close_options(&server, 1), Some(TOKEN.to_string()), &mut out)
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Closing issue #1 in repository: owner/repo...\n\
         HTTPError: 404 for closing issue #1\n\
         Details: {\"message\":\"Not Found\"}\n\
         Done!\n"
    );
}

#[tokio::test]
async fn close_issue_reports_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/owner/repo/issues/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    close_issue(&close_options(&server, 1), Some(TOKEN.to_string()), &mut out)
        .await
        .unwrap();

    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Failed to close Issue #1 (Status 204)"));
}

#[tokio::test]
async fn close_issue_without_token_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = close_issue(&close_options(&server, 1), Some(String::new()), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Issue(IssueError::MissingToken)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

/// Run the built binary with no token in its environment.
fn run_without_token(args: &[&str], api_url: &str) -> Output {
    let dir = TempDir::new().unwrap();
    write_document(&dir, DOCUMENT);
    Command::new(env!("CARGO_BIN_EXE_debatemebro"))
        .args(args)
        .args(["--api-url", api_url])
        .env_remove("GITHUB_TOKEN")
        .env("RUST_LOG", "info")
        .current_dir(dir.path())
        .output()
        .expect("spawn debatemebro")
}

fn assert_missing_token_exit(output: &Output) {
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "ERROR: GITHUB_TOKEN environment variable not set.\n"
    );
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn create_issues_binary_exits_one_without_token() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_without_token(
        &["create-issues", "--file", "Github_Issues.md", "--repo", "owner/repo"],
        &server.uri(),
    );

    assert_missing_token_exit(&output);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn close_issue_binary_exits_one_without_token() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_without_token(
        &["close-issue", "--number", "3", "--repo", "owner/repo"],
        &server.uri(),
    );

    assert_missing_token_exit(&output);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn served_health_endpoint_answers_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move { axum::serve(listener, create_router()).await });

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    server.abort();
}
