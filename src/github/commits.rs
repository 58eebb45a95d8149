//! Commit author email extraction.

use crate::emails::EmailSet;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::transport::Transport;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// One entry of the commits listing; only the author email is read.
///
/// Every level is optional. An absent or null `commit`, `author` or `email`
/// reads as the empty email, which is deduplicated like any other address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitEntry {
    #[serde(default)]
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub email: Option<String>,
}

impl CommitEntry {
    pub fn author_email(&self) -> &str {
        self.commit
            .as_ref()
            .and_then(|c| c.author.as_ref())
            .and_then(|a| a.email.as_deref())
            .unwrap_or_default()
    }
}

/// Commit history operations.
#[async_trait]
pub trait CommitOps {
    /// Distinct author emails of `repo` (an `owner/name` reference), first-seen order.
    ///
    /// Reads a single page of the commit listing.
    async fn fetch_commit_emails(&self, repo: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: Transport + 'static> CommitOps for GitHubClient<T> {
    async fn fetch_commit_emails(&self, repo: &str) -> Result<Vec<String>> {
        let endpoint = format!("/repos/{}/commits", repo);
        // A null body is an empty listing and a null entry an empty commit.
        let commits: Option<Vec<Option<CommitEntry>>> = self.get(&endpoint).await?;
        let commits: Vec<CommitEntry> = commits
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        let emails: EmailSet = commits.iter().map(CommitEntry::author_email).collect();
        debug!(repo, commits = commits.len(), emails = emails.len(), "fetched commits");

        Ok(emails.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::CommitEmailsError;
    use crate::github::test_support::StaticTransport;

    const COMMITS_URL: &str = "https://api.github.com/repos/octo/hello/commits";

    fn client(transport: StaticTransport) -> GitHubClient<StaticTransport> {
        GitHubClient::with_transport(ClientConfig::new(), transport)
    }

    #[tokio::test]
    async fn test_dedups_in_commit_order() {
        let transport = StaticTransport::new().respond(
            COMMITS_URL,
            200,
            r#"[
                {"sha": "3", "commit": {"author": {"name": "B", "email": "b@e"}}},
                {"sha": "2", "commit": {"author": {"name": "A", "email": "a@e"}}},
                {"sha": "1", "commit": {"author": {"name": "B", "email": "b@e"}}}
            ]"#,
        );

        let emails = client(transport)
            .fetch_commit_emails("octo/hello")
            .await
            .unwrap();

        assert_eq!(emails, vec!["b@e", "a@e"]);
    }

    #[tokio::test]
    async fn test_repo_reference_used_as_path() {
        let transport = StaticTransport::new().respond(COMMITS_URL, 200, "[]");
        let client = client(transport.clone());

        let emails = client.fetch_commit_emails("octo/hello").await.unwrap();

        assert!(emails.is_empty());
        assert_eq!(transport.requested_urls(), vec![COMMITS_URL]);
    }

    #[tokio::test]
    async fn test_missing_author_metadata_reads_as_empty_email() {
        let transport = StaticTransport::new().respond(
            COMMITS_URL,
            200,
            r#"[
                {"commit": {"author": {"email": null}}},
                {"commit": {"author": {"email": "x@e"}}},
                {"sha": "1"},
                {"commit": null},
                {"commit": {"author": null}},
                {"commit": {"author": {"name": "no email"}}},
                {"commit": {}},
                null
            ]"#,
        );

        let emails = client(transport)
            .fetch_commit_emails("octo/hello")
            .await
            .unwrap();

        assert_eq!(emails, vec!["", "x@e"]);
    }

    #[tokio::test]
    async fn test_sha_only_entry_does_not_fail_fetch() {
        let transport = StaticTransport::new().respond(
            COMMITS_URL,
            200,
            r#"[{"sha": "1"}, {"commit": {"author": {"email": "x@e"}}}]"#,
        );

        let emails = client(transport)
            .fetch_commit_emails("octo/hello")
            .await
            .unwrap();

        assert_eq!(emails, vec!["", "x@e"]);
    }

    #[tokio::test]
    async fn test_null_body_is_empty_listing() {
        let transport = StaticTransport::new().respond(COMMITS_URL, 200, "null");

        let emails = client(transport)
            .fetch_commit_emails("octo/hello")
            .await
            .unwrap();

        assert!(emails.is_empty());
    }

    #[tokio::test]
    async fn test_non_string_email_is_decode_error() {
        let transport = StaticTransport::new().respond(
            COMMITS_URL,
            200,
            r#"[{"commit": {"author": {"email": 42}}}]"#,
        );

        let err = client(transport)
            .fetch_commit_emails("octo/hello")
            .await
            .unwrap_err();

        assert!(matches!(err, CommitEmailsError::Decode { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_empty_repository_payload_is_decode_error() {
        // GitHub answers 409 with an object for repositories that have no commits.
        let transport = StaticTransport::new().respond(
            COMMITS_URL,
            409,
            r#"{"message": "Git Repository is empty."}"#,
        );

        let err = client(transport)
            .fetch_commit_emails("octo/hello")
            .await
            .unwrap_err();

        assert!(matches!(err, CommitEmailsError::Decode { status: 409, .. }));
    }
}
