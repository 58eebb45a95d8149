//! CLI for the commit-emails tool.

use anyhow::{Context, Result, bail};
use clap::Parser;
use commit_emails::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "commit-emails")]
#[command(author, version, about = "List the commit emails used across a GitHub account's repositories", long_about = None)]
struct Cli {
    /// GitHub account name (prompted for when omitted)
    account: Option<String>,

    /// GitHub Bearer token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    auth: Option<String>,

    /// Print every repo result
    #[arg(long)]
    debug: bool,

    /// API root, e.g. for GitHub Enterprise
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let account = match cli.account.clone() {
        Some(account) => account,
        None => prompt_account().context("Failed to read account name")?,
    };
    if account.trim().is_empty() {
        bail!("An account name is required");
    }

    let mut config = ClientConfig::new()
        .with_base_url(&cli.base_url)?
        .with_timeout(Duration::from_secs(cli.timeout))
        .verbose(cli.debug);
    if let Some(token) = cli.auth.as_deref().filter(|t| !t.trim().is_empty()) {
        config = config.with_credential(token.trim());
    }

    let client = GitHubClient::new(config).context("Failed to create GitHub client")?;
    let handle = Aggregator::new(client).spawn(account.trim());

    let spinner = spinner();
    let event = tokio::select! {
        event = handle.wait() => event,
        _ = tokio::signal::ctrl_c() => {
            spinner.finish_and_clear();
            return Ok(ExitCode::from(130));
        }
    };
    spinner.finish_and_clear();

    match event {
        AggregationEvent::Completed(emails) => {
            println!("{}", account.trim());
            for (i, email) in emails.iter().enumerate() {
                println!("{}.\t{}", i + 1, email);
            }
            Ok(ExitCode::SUCCESS)
        }
        AggregationEvent::Failed(e) => {
            eprintln!("\nWe had some trouble: {}\n", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn prompt_account() -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "Nickname: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
