//! DebateMeBro backend.
//!
//! Three independent pieces live here:
//!
//! - an HTTP service exposing a liveness check behind a permissive CORS
//!   policy,
//! - the environment-driven settings it starts from,
//! - two GitHub utilities that bulk-create issues from a markdown document
//!   and close a single issue.
//!
//! # Modules
//!
//! - [`config`]: Settings loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP API for health and schema
//! - [`issues`]: Issue document parsing and GitHub client
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod issues;
pub mod utils;

pub use config::Settings;
pub use error::{AppError, Result};
