//! Client configuration.
//!
//! Everything a run needs (credential, timeout, base URL, verbosity) lives in a
//! [`ClientConfig`] value handed to the client at construction, so two
//! aggregations with different credentials can run side by side.

use crate::error::{CommitEmailsError, Result};
use std::fmt;
use std::time::Duration;

/// Public GitHub API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Per-request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A bearer token sent as `Authorization: Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn token(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Configuration shared by the lister, the fetcher and the coordinator.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) credential: Option<Credential>,
    pub(crate) timeout: Duration,
    pub(crate) verbose: bool,
    pub(crate) user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            credential: None,
            timeout: DEFAULT_TIMEOUT,
            verbose: false,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl ClientConfig {
    /// Unauthenticated configuration against the public API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration using the GITHUB_TOKEN environment variable when it is set.
    ///
    /// A missing or empty variable yields an unauthenticated configuration.
    pub fn from_env() -> Self {
        match std::env::var("GITHUB_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Self::new().with_credential(token.trim()),
            _ => Self::new(),
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Credential::bearer(token));
        self
    }

    /// Point at a different API root, e.g. GitHub Enterprise.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let mut url = base_url.into();
        // Remove trailing slash if present
        while url.ends_with('/') {
            url.pop();
        }

        let parsed = url::Url::parse(&url)
            .map_err(|e| CommitEmailsError::InvalidConfig(format!("base URL {url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CommitEmailsError::InvalidConfig(format!(
                "base URL {url:?} must use http or https"
            )));
        }

        self.base_url = url;
        Ok(self)
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Echo every repository's email list as it completes.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Override the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
