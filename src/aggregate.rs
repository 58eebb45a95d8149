//! Fan-out/fan-in aggregation of commit emails across an account.
//!
//! The account's repositories are listed once, then one task per repository
//! fetches its commit emails. Every task hands its finished result to the
//! coordinator through a channel sized to the repository count; the coordinator
//! waits for all of them and folds the results in arrival order. Arrival order
//! depends on network timing, so the order of the merged list can differ
//! between runs while its contents do not.

use crate::emails::EmailSet;
use crate::error::{CommitEmailsError, Result};
use crate::github::{CommitOps, GitHubClient, HttpTransport, RepoOps, Transport};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// The finished fetch of one repository, as handed to the coordinator.
#[derive(Debug)]
pub struct RepoOutcome {
    pub repo: String,
    pub result: Result<Vec<String>>,
}

/// Fold per-repository outcomes, in the order given, into one deduplicated list.
///
/// The first failure wins and everything else is discarded.
pub fn merge_in_arrival_order(
    outcomes: impl IntoIterator<Item = RepoOutcome>,
) -> Result<Vec<String>> {
    let mut merged = EmailSet::new();
    for RepoOutcome { repo, result } in outcomes {
        match result {
            Ok(emails) => merged.extend(emails),
            Err(err @ CommitEmailsError::Task { .. }) => return Err(err),
            Err(source) => {
                return Err(CommitEmailsError::Repository {
                    repo,
                    source: Box::new(source),
                });
            }
        }
    }
    Ok(merged.into_vec())
}

/// Discovers the distinct commit-author emails of an account.
pub struct Aggregator<T: Transport = HttpTransport> {
    client: GitHubClient<T>,
}

impl<T: Transport> Clone for Aggregator<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport + 'static> Aggregator<T> {
    pub fn new(client: GitHubClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GitHubClient<T> {
        &self.client
    }

    /// List `account`'s repositories, fetch each one's commit emails
    /// concurrently, and merge them.
    ///
    /// A listing failure returns before any commit fetch is issued. A failed
    /// repository fails the whole aggregation; the other results are dropped.
    pub async fn aggregate_emails(&self, account: &str) -> Result<Vec<String>> {
        let repos = self.client.list_repositories(account).await?;
        info!(account, repos = repos.len(), "fetching commit emails");

        if repos.is_empty() {
            return Ok(Vec::new());
        }

        let (tx, mut rx) = mpsc::channel(repos.len());
        let verbose = self.client.config().is_verbose();

        let mut handles = Vec::with_capacity(repos.len());
        for repo in repos {
            let client = self.client.clone();
            let tx = tx.clone();
            let unit = repo.clone();

            let handle = tokio::spawn(async move {
                let result = client.fetch_commit_emails(&repo).await;
                match &result {
                    Ok(emails) if verbose => info!("{}: {:?}", repo, emails),
                    Ok(emails) => debug!("{}: {:?}", repo, emails),
                    Err(e) => warn!(%repo, error = %e, "commit fetch failed"),
                }
                // One slot per task, so this never waits. It only fails if the
                // coordinator itself was dropped, in which case nobody is listening.
                let _ = tx.send(RepoOutcome { repo, result }).await;
            });
            handles.push((unit, handle));
        }
        drop(tx);

        let mut unfinished = Vec::new();
        for (repo, handle) in handles {
            if let Err(e) = handle.await {
                unfinished.push(RepoOutcome {
                    result: Err(CommitEmailsError::Task {
                        unit: repo.clone(),
                        message: e.to_string(),
                    }),
                    repo,
                });
            }
        }

        let mut outcomes = Vec::new();
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }
        outcomes.extend(unfinished);

        let merged = merge_in_arrival_order(outcomes)?;
        info!(account, emails = merged.len(), "aggregation finished");
        Ok(merged)
    }

    /// Run [`aggregate_emails`](Self::aggregate_emails) as a background task.
    ///
    /// Must be called from within a Tokio runtime. The returned handle reports
    /// exactly one [`AggregationEvent`]. Dropping it does not cancel requests
    /// that are already in flight.
    pub fn spawn(&self, account: impl Into<String>) -> AggregationHandle {
        let account = account.into();
        let aggregator = self.clone();
        let (tx, rx) = oneshot::channel();

        let task_account = account.clone();
        tokio::spawn(async move {
            let event = match aggregator.aggregate_emails(&task_account).await {
                Ok(emails) => AggregationEvent::Completed(emails),
                Err(e) => AggregationEvent::Failed(e),
            };
            let _ = tx.send(event);
        });

        AggregationHandle {
            account,
            rx,
            event: None,
        }
    }
}

/// How a background aggregation ended.
#[derive(Debug)]
pub enum AggregationEvent {
    Completed(Vec<String>),
    Failed(CommitEmailsError),
}

impl AggregationEvent {
    pub fn into_result(self) -> Result<Vec<String>> {
        match self {
            Self::Completed(emails) => Ok(emails),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Handle to an aggregation started with [`Aggregator::spawn`].
#[derive(Debug)]
pub struct AggregationHandle {
    account: String,
    rx: oneshot::Receiver<AggregationEvent>,
    event: Option<AggregationEvent>,
}

impl AggregationHandle {
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Poll for the completion event without waiting.
    pub fn try_event(&mut self) -> Option<&AggregationEvent> {
        if self.event.is_none() {
            match self.rx.try_recv() {
                Ok(event) => self.event = Some(event),
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.event = Some(AggregationEvent::Failed(self.abandoned()));
                }
            }
        }
        self.event.as_ref()
    }

    /// True until the completion event is available.
    pub fn is_in_progress(&mut self) -> bool {
        self.try_event().is_none()
    }

    /// Wait for the completion event.
    pub async fn wait(mut self) -> AggregationEvent {
        if let Some(event) = self.event.take() {
            return event;
        }
        let received = (&mut self.rx).await;
        match received {
            Ok(event) => event,
            Err(_) => AggregationEvent::Failed(self.abandoned()),
        }
    }

    fn abandoned(&self) -> CommitEmailsError {
        CommitEmailsError::Task {
            unit: self.account.clone(),
            message: "aggregation ended without reporting a result".into(),
        }
    }
}
