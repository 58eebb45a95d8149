//! HTTP transport shared by every API call.

use crate::config::{ClientConfig, Credential};
use crate::error::{CommitEmailsError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use tracing::debug;

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single request and returns the drained response.
///
/// Implementations hold no per-call state and are shared across concurrently
/// running fetches.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: &str,
        credential: Option<&Credential>,
    ) -> Result<RawResponse>;
}

/// [`Transport`] backed by a `reqwest` client with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport honoring the config's timeout and user agent.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .default_headers(default_headers())
            .build()?;
        Ok(Self { client })
    }

    /// Build the request without sending it.
    pub fn build_request(
        &self,
        method: Method,
        url: &str,
        credential: Option<&Credential>,
    ) -> Result<reqwest::Request> {
        let mut builder = self.client.request(method, url);
        if let Some(credential) = credential {
            let value = HeaderValue::from_str(&credential.header_value()).map_err(|_| {
                CommitEmailsError::InvalidConfig(
                    "credential contains characters not allowed in a header".into(),
                )
            })?;
            builder = builder.header(AUTHORIZATION, value);
        }
        Ok(builder.build()?)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static("2022-11-28"),
    );
    headers
}

fn classify(url: &str, err: reqwest::Error) -> CommitEmailsError {
    if err.is_timeout() {
        CommitEmailsError::Timeout { url: url.into() }
    } else {
        CommitEmailsError::Http(err)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        credential: Option<&Credential>,
    ) -> Result<RawResponse> {
        let request = self.build_request(method, url, credential)?;
        debug!(%url, authenticated = credential.is_some(), "sending request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| classify(url, e))?;
        let status = response.status().as_u16();

        // Consumes the response, releasing the connection on success and error alike.
        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        debug!(%url, status, bytes = body.len(), "response received");

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
