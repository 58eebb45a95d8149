//! GitHub API client.

use crate::config::ClientConfig;
use crate::error::{CommitEmailsError, Result};
use crate::github::transport::{HttpTransport, Transport};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Client for the two read-only GitHub endpoints this crate uses.
///
/// Cloning is cheap; clones share the same transport.
pub struct GitHubClient<T: Transport = HttpTransport> {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<T>,
}

impl<T: Transport> Clone for GitHubClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl GitHubClient<HttpTransport> {
    /// Create a client that talks HTTP according to `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client configured from the GITHUB_TOKEN environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> GitHubClient<T> {
    /// Create a client on top of an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an endpoint path such as `/users/octo/repos`.
    pub(crate) fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url(), endpoint)
    }

    /// GET an endpoint and decode its body.
    ///
    /// The body is decoded whatever the status; an error payload that does not
    /// fit `R` surfaces as [`CommitEmailsError::Decode`] carrying the status.
    pub(crate) async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R> {
        let url = self.url(endpoint);
        let response = self
            .transport
            .request(Method::GET, &url, self.config.credential())
            .await?;
        if !response.is_success() {
            debug!(%url, status = response.status, "non-success status, decoding body anyway");
        }

        serde_json::from_slice(&response.body).map_err(|source| CommitEmailsError::Decode {
            url,
            status: response.status,
            source,
        })
    }
}
