//! # Commit Emails
//!
//! Discover the distinct commit-author email addresses used across every
//! repository owned by a GitHub account.
//!
//! This crate provides:
//! - A small GitHub client for listing an account's repositories and reading
//!   a repository's commit history
//! - A coordinator that fetches every repository concurrently and merges the
//!   results into one deduplicated list
//! - A background handle for front ends that need to stay responsive while
//!   the aggregation runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use commit_emails::prelude::*;
//!
//! # async fn run() -> commit_emails::error::Result<()> {
//! let config = ClientConfig::new().with_credential("ghp_your_token_here");
//! let aggregator = Aggregator::new(GitHubClient::new(config)?);
//!
//! for email in aggregator.aggregate_emails("octocat").await? {
//!     println!("{}", email);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Aggregation
//!
//! ```rust,no_run
//! use commit_emails::prelude::*;
//!
//! # async fn run() -> commit_emails::error::Result<()> {
//! let aggregator = Aggregator::new(GitHubClient::from_env()?);
//! let handle = aggregator.spawn("octocat");
//!
//! match handle.wait().await {
//!     AggregationEvent::Completed(emails) => println!("{} emails", emails.len()),
//!     AggregationEvent::Failed(e) => eprintln!("failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! Only the first page of each API listing is read. Accounts with more
//! repositories, or repositories with more commits, than one page holds are
//! reported from that first page alone.

pub mod aggregate;
pub mod config;
pub mod emails;
pub mod error;
pub mod github;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{
        AggregationEvent, AggregationHandle, Aggregator, RepoOutcome, merge_in_arrival_order,
    };
    pub use crate::config::{ClientConfig, Credential, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
    pub use crate::emails::EmailSet;
    pub use crate::error::{CommitEmailsError, Result};
    pub use crate::github::{
        CommitOps, GitHubClient, HttpTransport, RawResponse, RepoOps, Transport,
    };
}

pub use prelude::*;
