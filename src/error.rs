//! Unified error types for the service and the issue utilities.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Issue utility error.
    #[error("issue error: {0}")]
    Issue(#[from] IssueError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment value could not be deserialized.
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    /// The signing secret is empty.
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,

    /// The shipped placeholder signing secret is still in effect.
    #[error("JWT_SECRET is set to the insecure placeholder value; supply a real secret")]
    InsecureSecret,
}

/// Issue document and issue tracker errors.
#[derive(Error, Debug)]
pub enum IssueError {
    /// No bearer token was supplied.
    #[error("GITHUB_TOKEN environment variable not set.")]
    MissingToken,

    /// The issue document does not exist.
    #[error("issue document not found: {}", path.display())]
    DocumentNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The issue document exists but could not be read.
    #[error("failed to read issue document {}: {source}", path.display())]
    DocumentRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Repository identifier is not `owner/repo`.
    #[error("invalid repository '{0}', expected owner/repo")]
    InvalidRepo(String),

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The tracker answered 201 but the body did not describe an issue.
    #[error("failed to parse issue response: {0}")]
    ParseError(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
