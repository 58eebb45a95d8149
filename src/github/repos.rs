//! Repository listing.

use crate::error::{CommitEmailsError, Result};
use crate::github::GitHubClient;
use crate::github::transport::Transport;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// The only part of a repository payload we read.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub full_name: String,
}

/// Repository listing operations.
#[async_trait]
pub trait RepoOps {
    /// List the `owner/name` references of the repositories owned by `account`.
    ///
    /// One request, one page, in the order the API returns them.
    async fn list_repositories(&self, account: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: Transport + 'static> RepoOps for GitHubClient<T> {
    async fn list_repositories(&self, account: &str) -> Result<Vec<String>> {
        if account.trim().is_empty() {
            return Err(CommitEmailsError::InvalidConfig(
                "account name must not be empty".into(),
            ));
        }

        let endpoint = format!("/users/{}/repos", urlencoding::encode(account));
        let repos: Vec<RepoSummary> = self.get(&endpoint).await?;
        debug!(account, count = repos.len(), "listed repositories");

        Ok(repos.into_iter().map(|r| r.full_name).collect())
    }
}
