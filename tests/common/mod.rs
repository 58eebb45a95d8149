//! Shared test utilities for integration tests.
//!
//! Add `mod common;` to a test file and build a [`ScriptedTransport`] with the
//! responses each URL should produce.

use async_trait::async_trait;
use commit_emails::prelude::*;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const API: &str = "https://api.github.com";

/// A request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub authorization: Option<String>,
}

#[derive(Clone)]
enum Reply {
    Body { status: u16, body: String },
    Timeout,
    Panic,
}

#[derive(Clone)]
struct Script {
    reply: Reply,
    delay: Duration,
}

/// In-memory transport answering from a per-URL script.
///
/// Unknown URLs answer 404 with GitHub's "Not Found" payload.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    scripts: Arc<HashMap<String, Script>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(mut self, url: String, reply: Reply, delay: Duration) -> Self {
        Arc::make_mut(&mut self.scripts).insert(url, Script { reply, delay });
        self
    }

    /// Answer the repository listing of `account` with the given full names.
    pub fn repos(self, account: &str, full_names: &[&str]) -> Self {
        let body = serde_json::to_string(
            &full_names
                .iter()
                .map(|name| serde_json::json!({ "full_name": name, "private": false }))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        self.script(
            format!("{API}/users/{account}/repos"),
            Reply::Body { status: 200, body },
            Duration::ZERO,
        )
    }

    /// Answer the commit listing of `repo` with one commit per email, after `delay`.
    pub fn commits(self, repo: &str, emails: &[&str], delay: Duration) -> Self {
        let body = serde_json::to_string(
            &emails
                .iter()
                .map(|email| serde_json::json!({ "commit": { "author": { "email": email } } }))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        self.script(
            format!("{API}/repos/{repo}/commits"),
            Reply::Body { status: 200, body },
            delay,
        )
    }

    /// Answer `path` with a raw status and body.
    pub fn raw(self, path: &str, status: u16, body: &str, delay: Duration) -> Self {
        self.script(
            format!("{API}{path}"),
            Reply::Body {
                status,
                body: body.into(),
            },
            delay,
        )
    }

    /// Make `path` time out after `delay`.
    pub fn timeout(self, path: &str, delay: Duration) -> Self {
        self.script(format!("{API}{path}"), Reply::Timeout, delay)
    }

    /// Make the request for `path` panic after `delay`.
    pub fn panic(self, path: &str, delay: Duration) -> Self {
        self.script(format!("{API}{path}"), Reply::Panic, delay)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        credential: Option<&Credential>,
    ) -> commit_emails::Result<RawResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.into(),
            authorization: credential.map(Credential::header_value),
        });

        let script = self.scripts.get(url).cloned();
        let Some(Script { reply, delay }) = script else {
            return Ok(RawResponse::new(404, r#"{"message": "Not Found"}"#));
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Body { status, body } => Ok(RawResponse::new(status, body)),
            Reply::Timeout => Err(CommitEmailsError::Timeout { url: url.into() }),
            Reply::Panic => panic!("transport blew up on {url}"),
        }
    }
}

/// An aggregator over `transport` with an unauthenticated default config.
#[allow(dead_code)]
pub fn aggregator(transport: ScriptedTransport) -> Aggregator<ScriptedTransport> {
    Aggregator::new(GitHubClient::with_transport(ClientConfig::new(), transport))
}

#[allow(dead_code)]
pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
