//! GitHub API access.
//!
//! This module provides a client for the two read-only endpoints needed to
//! discover commit emails:
//! - `GET /users/{account}/repos` to list an account's repositories
//! - `GET /repos/{owner}/{name}/commits` to read a repository's history
//!
//! Only the first page of each listing is read.
//!
//! # Example
//!
//! ```rust,no_run
//! use commit_emails::config::ClientConfig;
//! use commit_emails::github::{CommitOps, GitHubClient, RepoOps};
//!
//! # async fn run() -> commit_emails::error::Result<()> {
//! let client = GitHubClient::new(ClientConfig::from_env())?;
//!
//! for repo in client.list_repositories("octocat").await? {
//!     let emails = client.fetch_commit_emails(&repo).await?;
//!     println!("{}: {:?}", repo, emails);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod commits;
mod repos;
mod transport;

pub use client::GitHubClient;
pub use commits::{CommitAuthor, CommitDetail, CommitEntry, CommitOps};
pub use repos::{RepoOps, RepoSummary};
pub use transport::{HttpTransport, RawResponse, Transport};
