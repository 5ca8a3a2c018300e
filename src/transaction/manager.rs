//! Transaction begin, refresh, commit and rollback.

use super::TransactionHandle;
use crate::client::{ClientConfig, FcrepoClient};
use crate::error::{FcrepoError, OperationFailure, Result};
use crate::producer::EndpointConfig;
use crate::protocol::constants::{headers, paths};
use crate::protocol::join_path;
use crate::types::{FcrepoResponse, Message};
use async_trait::async_trait;
use url::Url;

/// A begin/commit/rollback contract a host orchestrator can drive.
///
/// Implementations report each phase with its own error variant so a caller
/// can tell "could not start" from "could not finish".
#[async_trait]
pub trait TransactionSynchronization: Send + Sync {
    /// Open a transaction unless one is already active.
    async fn begin_transaction(&self) -> Result<()>;

    /// Commit the active transaction.
    async fn commit_transaction(&self) -> Result<()>;

    /// Roll back the active transaction.
    async fn rollback_transaction(&self) -> Result<()>;

    /// Whether a transaction is active.
    fn is_transaction_active(&self) -> bool;
}

/// Identity of an open transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInfo {
    /// Transaction id, e.g. `tx:83e34464-144e-43d9-af13-b050dd5c1c63`
    pub id: String,

    /// URL of the transaction as reported by the repository
    pub location: String,
}

impl TransactionInfo {
    /// Record the transaction id and location on an outbound message.
    pub fn apply_to(&self, message: &mut Message) {
        message.set_header(headers::TRANSACTION, self.id.clone());
        message.set_header(headers::LOCATION, self.location.clone());
    }
}

/// Opens and closes repository transactions and owns their handle.
///
/// Talks to the protocol client directly; requests issued here never go
/// through the producer's URL rewriting.
pub struct TransactionManager {
    base_url: String,
    client: FcrepoClient,
    handle: TransactionHandle,
}

impl TransactionManager {
    /// Create a manager for the repository an endpoint points at.
    ///
    /// Uses the endpoint's credentials. Transaction calls always treat a
    /// status outside `[200, 400)` as a failure.
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let base_url = config.normalized_base_url()?;
        let client = FcrepoClient::with_config(ClientConfig {
            fail_on_error: true,
            ..config.client_config()
        });
        Ok(Self::with_client(base_url, client))
    }

    /// Create a manager from an already normalized base URL and a client.
    pub fn with_client(base_url: impl Into<String>, client: FcrepoClient) -> Self {
        TransactionManager {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            handle: TransactionHandle::new(),
        }
    }

    /// A read handle producers use to find the active transaction.
    pub fn handle(&self) -> TransactionHandle {
        self.handle.clone()
    }

    /// The active transaction id, if any.
    pub fn transaction_id(&self) -> Option<String> {
        self.handle.id()
    }

    /// The repository base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open a transaction.
    ///
    /// When a transaction is already active its id is returned and nothing is
    /// sent. The id is only recorded once the repository has answered with a
    /// location it can be derived from.
    pub async fn begin(&self) -> Result<TransactionInfo> {
        if let Some(id) = self.handle.id() {
            return Ok(TransactionInfo {
                location: join_path(&self.base_url, &[&id]),
                id,
            });
        }

        let url = join_path(&self.base_url, &[paths::TRANSACTION]);
        let response = self
            .client
            .post(&url, None, None)
            .await
            .map_err(|e| FcrepoError::TransactionBegin(e.to_string()))?;

        if !response.is_success() {
            return Err(FcrepoError::TransactionBegin(format!(
                "{} returned {}",
                url, response.status
            )));
        }

        let location = response.location.ok_or_else(|| {
            FcrepoError::TransactionBegin(format!("{} returned no Location", url))
        })?;
        let id = self.transaction_id_from(&location).ok_or_else(|| {
            FcrepoError::TransactionBegin(format!(
                "Cannot derive a transaction id from {}",
                location
            ))
        })?;

        self.handle.set(id.clone());
        tracing::info!(transaction = %id, "Transaction started");

        Ok(TransactionInfo { id, location })
    }

    /// Extend the lifetime of the active transaction.
    ///
    /// A failed refresh leaves the transaction active; only commit and
    /// rollback end it.
    pub async fn refresh(&self) -> Result<TransactionInfo> {
        let id = self.handle.id().ok_or_else(|| {
            FcrepoError::InvalidRequest("No active transaction to refresh".to_string())
        })?;

        let url = join_path(&self.base_url, &[&id, paths::TRANSACTION]);
        let response = self.client.post(&url, None, None).await?;
        let response = ensure_success(response)?;

        tracing::debug!(transaction = %id, "Transaction refreshed");

        Ok(TransactionInfo {
            location: response
                .location
                .unwrap_or_else(|| join_path(&self.base_url, &[&id])),
            id,
        })
    }

    /// Commit the active transaction.
    ///
    /// The id is cleared whatever the outcome.
    pub async fn commit(&self) -> Result<()> {
        let id = self.handle.take().ok_or_else(|| FcrepoError::TransactionCommit {
            id: String::new(),
            reason: "No active transaction".to_string(),
        })?;

        match self.finish(&id, paths::COMMIT).await {
            Ok(()) => {
                tracing::info!(transaction = %id, "Transaction committed");
                Ok(())
            }
            Err(reason) => {
                tracing::warn!(transaction = %id, "Commit failed: {}", reason);
                Err(FcrepoError::TransactionCommit { id, reason })
            }
        }
    }

    /// Roll back the active transaction.
    ///
    /// The id is cleared whatever the outcome.
    pub async fn rollback(&self) -> Result<()> {
        let id = self.handle.take().ok_or_else(|| FcrepoError::TransactionRollback {
            id: String::new(),
            reason: "No active transaction".to_string(),
        })?;

        match self.finish(&id, paths::ROLLBACK).await {
            Ok(()) => {
                tracing::info!(transaction = %id, "Transaction rolled back");
                Ok(())
            }
            Err(reason) => {
                tracing::warn!(transaction = %id, "Rollback failed: {}", reason);
                Err(FcrepoError::TransactionRollback { id, reason })
            }
        }
    }

    /// POST to a closing sub-path of a transaction.
    async fn finish(&self, id: &str, suffix: &str) -> std::result::Result<(), String> {
        let url = join_path(&self.base_url, &[id, suffix]);
        let response = self
            .client
            .post(&url, None, None)
            .await
            .map_err(|e| e.to_string())?;
        ensure_success(response).map(|_| ()).map_err(|e| e.to_string())
    }

    /// The part of a transaction location after the base URL.
    fn transaction_id_from(&self, location: &str) -> Option<String> {
        let suffix = match location.strip_prefix(&self.base_url) {
            Some(suffix) => suffix.to_string(),
            None => {
                // The repository may report another host name for itself.
                let base = Url::parse(&self.base_url).ok()?;
                let location = Url::parse(location).ok()?;
                location
                    .path()
                    .strip_prefix(base.path().trim_end_matches('/'))?
                    .to_string()
            }
        };

        if !suffix.is_empty() && !suffix.starts_with('/') {
            return None;
        }
        let id = suffix.trim_matches('/');
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }
}

fn ensure_success(response: FcrepoResponse) -> Result<FcrepoResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let status_text = reqwest::StatusCode::from_u16(response.status)
        .map(crate::client::status_text)
        .unwrap_or_default();
    let mut failure = OperationFailure::http(&response.url, response.status, status_text);
    if let Some(location) = response.location {
        failure = failure.with_redirect_location(location);
    }
    Err(failure.into())
}

#[async_trait]
impl TransactionSynchronization for TransactionManager {
    async fn begin_transaction(&self) -> Result<()> {
        self.begin().await.map(|_| ())
    }

    async fn commit_transaction(&self) -> Result<()> {
        self.commit().await
    }

    async fn rollback_transaction(&self) -> Result<()> {
        self.rollback().await
    }

    fn is_transaction_active(&self) -> bool {
        self.handle.is_active()
    }
}
