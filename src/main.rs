//! DebateMeBro entry point: API server and GitHub issue utilities.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use debatemebro::api::create_router;
use debatemebro::config::Settings;
use debatemebro::error::{AppError, IssueError};
use debatemebro::issues::commands::{DEFAULT_ISSUES_FILE, DEFAULT_ISSUE_NUMBER, DEFAULT_REPO};
use debatemebro::issues::{
    close_issue, create_issues, preview_issues, CloseIssueOptions, CreateIssuesOptions, RepoSlug,
    GITHUB_API_URL,
};
use debatemebro::utils::shutdown_signal;

/// DebateMeBro API server and project tooling.
#[derive(Parser, Debug)]
#[command(name = "debatemebro")]
#[command(about = "AI-Powered Structured Debates That Steelman Both Sides")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server (default).
    Serve {
        /// Port to listen on (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Create one GitHub issue per section of a markdown document.
    CreateIssues {
        /// Markdown document to read.
        #[arg(short, long, default_value = DEFAULT_ISSUES_FILE)]
        file: PathBuf,

        #[command(flatten)]
        target: Target,

        /// Parse and list the issues without contacting GitHub.
        #[arg(long)]
        dry_run: bool,
    },

    /// Close a single GitHub issue.
    CloseIssue {
        /// Issue number to close.
        #[arg(short, long, default_value_t = DEFAULT_ISSUE_NUMBER)]
        number: u64,

        #[command(flatten)]
        target: Target,
    },
}

/// Repository and credentials shared by the issue utilities.
#[derive(clap::Args, Debug)]
struct Target {
    /// Repository as owner/repo.
    #[arg(long, default_value = DEFAULT_REPO)]
    repo: RepoSlug,

    /// GitHub REST API base URL.
    #[arg(long, default_value = GITHUB_API_URL)]
    api_url: Url,

    /// Personal access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debatemebro=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::CreateIssues {
            file,
            target,
            dry_run,
        }) => cmd_create_issues(file, target, dry_run).await,
        Some(Command::CloseIssue { number, target }) => cmd_close_issue(number, target).await,
        None => cmd_serve(None).await,
    }
}

/// Run the HTTP API server.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Validate configuration
    if let Err(e) = settings.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    if !settings.has_api_key() {
        warn!("ANTHROPIC_API_KEY is not set");
    }

    let port = port_override.unwrap_or(settings.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DEBATEMEBRO - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let settings = match Settings::load() {
        Ok(s) => {
            println!("OK");
            s
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!(
        "  Anthropic API Key: {}",
        if settings.has_api_key() { "set" } else { "NOT SET" }
    );
    println!("  Database URL: {}", settings.database_url);
    println!("  Redis URL: {}", settings.redis_url);
    println!("  Port: {}", settings.port);
    println!("----------------------------------------------------------------------");

    // Validate configuration
    print!("Validating configuration... ");
    match settings.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Create issues from a markdown document.
async fn cmd_create_issues(file: PathBuf, target: Target, dry_run: bool) -> anyhow::Result<()> {
    let options = CreateIssuesOptions {
        api_url: target.api_url,
        repo: target.repo,
        file,
    };
    let mut stdout = std::io::stdout();

    if dry_run {
        preview_issues(&options, &mut stdout).await?;
        return Ok(());
    }

    let summary = exit_on_missing_token(create_issues(&options, target.token, &mut stdout).await)?;
    if summary.failed > 0 {
        warn!(failed = summary.failed, "Some issues were not created");
    }
    Ok(())
}

/// Close a single issue.
async fn cmd_close_issue(number: u64, target: Target) -> anyhow::Result<()> {
    let options = CloseIssueOptions {
        api_url: target.api_url,
        repo: target.repo,
        number,
    };
    let mut stdout = std::io::stdout();

    exit_on_missing_token(close_issue(&options, target.token, &mut stdout).await)?;
    Ok(())
}

/// Report a missing token the way the utilities always have and exit 1.
fn exit_on_missing_token<T>(result: debatemebro::Result<T>) -> anyhow::Result<T> {
    match result {
        Err(AppError::Issue(IssueError::MissingToken)) => {
            eprintln!("ERROR: GITHUB_TOKEN environment variable not set.");
            std::process::exit(1);
        }
        other => Ok(other?),
    }
}
