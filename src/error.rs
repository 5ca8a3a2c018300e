//! Error types for repository operations.
//!
//! This module defines every error that can cross the boundary between this crate
//! and the code driving it. The [`Result`] type alias is the shorthand used
//! throughout the crate.
//!
//! # Error Categories
//!
//! | Category | Variants | Raised before I/O |
//! |----------|----------|-------------------|
//! | Network | `Operation` with status `-1` | No |
//! | HTTP status | `Operation` with the response status | No |
//! | Transaction | `TransactionBegin`, `TransactionCommit`, `TransactionRollback` | No |
//! | Configuration | `Config`, `InvalidRequest` | Yes |
//! | Parsing | `HeaderParse`, `Json` | Yes |
//!
//! Nothing in this crate retries. A caller that wants to undo work inside an
//! active transaction must call rollback itself.
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::{FcrepoError, OperationFailure};
//!
//! let failure = OperationFailure::network("http://localhost:8080/rest/foo", "connection refused");
//! let err = FcrepoError::from(failure);
//! assert_eq!(err.status_code(), Some(-1));
//! assert!(err.is_network_failure());
//! ```

use std::collections::BTreeMap;
use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, FcrepoError>;

/// Status code recorded when no HTTP response was obtained at all.
pub const NETWORK_FAILURE_STATUS: i32 = -1;

/// A failed call against the repository.
///
/// Built by the protocol client when the network call itself fails (status `-1`)
/// or, with the fail-on-error policy enabled, when the response status falls
/// outside `[200, 400)`. It carries everything needed to log or re-render the
/// failure without repeating the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Operation failed on {url}: {status_code} {status_text}")]
pub struct OperationFailure {
    /// The URL that was requested
    pub url: String,

    /// `Location` header of the response, if any
    pub redirect_location: Option<String>,

    /// HTTP status, or `-1` for network-level failures
    pub status_code: i32,

    /// Reason phrase, or the transport error message for network failures
    pub status_text: String,

    /// Response headers (keys lower-cased, repeated headers joined with `, `)
    pub response_headers: Option<BTreeMap<String, String>>,

    /// Response body, when it could be read as text
    pub response_body: Option<String>,
}

impl OperationFailure {
    /// Create a failure for a request that never produced an HTTP response.
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        OperationFailure {
            url: url.into(),
            redirect_location: None,
            status_code: NETWORK_FAILURE_STATUS,
            status_text: reason.into(),
            response_headers: None,
            response_body: None,
        }
    }

    /// Create a failure from an HTTP status.
    pub fn http(url: impl Into<String>, status_code: u16, status_text: impl Into<String>) -> Self {
        OperationFailure {
            url: url.into(),
            redirect_location: None,
            status_code: i32::from(status_code),
            status_text: status_text.into(),
            response_headers: None,
            response_body: None,
        }
    }

    /// Attach the response `Location` header.
    pub fn with_redirect_location(mut self, location: impl Into<String>) -> Self {
        self.redirect_location = Some(location.into());
        self
    }

    /// Attach the response headers.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.response_headers = Some(headers);
        self
    }

    /// Attach the response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    /// Whether no HTTP response was obtained.
    #[inline]
    pub fn is_network_failure(&self) -> bool {
        self.status_code == NETWORK_FAILURE_STATUS
    }
}

/// Errors raised by the protocol client, the producer and the transaction manager.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FcrepoError {
    /// A single repository call failed (network error or rejected status).
    #[error(transparent)]
    Operation(Box<OperationFailure>),

    /// A transaction could not be started; no id was assigned.
    #[error("Could not begin transaction: {0}")]
    TransactionBegin(String),

    /// Committing a transaction failed. The id has been cleared regardless.
    #[error("Could not commit transaction {id}: {reason}")]
    TransactionCommit {
        /// Transaction id that was being committed
        id: String,
        /// What went wrong
        reason: String,
    },

    /// Rolling back a transaction failed. The id has been cleared regardless.
    #[error("Could not roll back transaction {id}: {reason}")]
    TransactionRollback {
        /// Transaction id that was being rolled back
        id: String,
        /// What went wrong
        reason: String,
    },

    /// Configuration or a required message header is missing or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The inbound message cannot be turned into a repository request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A header value could not be parsed.
    #[error("Header parse error: {0}")]
    HeaderParse(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<OperationFailure> for FcrepoError {
    fn from(failure: OperationFailure) -> Self {
        FcrepoError::Operation(Box::new(failure))
    }
}

impl FcrepoError {
    /// Status code of an operation failure (`-1` for network failures).
    pub fn status_code(&self) -> Option<i32> {
        match self {
            FcrepoError::Operation(failure) => Some(failure.status_code),
            _ => None,
        }
    }

    /// The underlying operation failure, if this is one.
    pub fn operation_failure(&self) -> Option<&OperationFailure> {
        match self {
            FcrepoError::Operation(failure) => Some(failure),
            _ => None,
        }
    }

    /// Whether the request never produced an HTTP response.
    pub fn is_network_failure(&self) -> bool {
        self.operation_failure()
            .is_some_and(OperationFailure::is_network_failure)
    }

    /// Whether this error came from a transaction begin, commit or rollback.
    pub fn is_transaction_failure(&self) -> bool {
        matches!(
            self,
            FcrepoError::TransactionBegin(_)
                | FcrepoError::TransactionCommit { .. }
                | FcrepoError::TransactionRollback { .. }
        )
    }
}
