//! Repository protocol client.
//!
//! This module provides the HTTP client that talks to the repository. Each
//! method performs exactly one call and normalizes the reply:
//!
//! - **Content type** is taken from the first `Content-Type` header
//! - **Location** carries creation locations and redirect targets
//! - **describedby** is set only when exactly one such link is present
//! - **Failures** outside `[200, 400)` become [`OperationFailure`]s when
//!   `fail_on_error` is enabled; network failures always do, with status `-1`
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch   - FcrepoClient and the six verbs
//! ├── config  - Client configuration
//! └── utils   - Status classification and header helpers
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FcrepoClient`] | HTTP client for the repository |
//! | [`ClientConfig`] | Credentials and failure policy |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use fcrepo_http::client::{ClientConfig, FcrepoClient};
//!
//! // Default configuration
//! let client = FcrepoClient::new();
//!
//! // Credentials scoped to one host, statuses returned instead of raised
//! let config = ClientConfig {
//!     username: Some("fedoraAdmin".into()),
//!     password: Some("fedoraAdmin".into()),
//!     auth_host: Some("localhost".into()),
//!     fail_on_error: false,
//!     ..Default::default()
//! };
//! let client = FcrepoClient::with_config(config);
//! assert!(!client.config().fail_on_error);
//! ```
//!
//! [`OperationFailure`]: crate::OperationFailure

mod config;
mod fetch;
mod utils;

pub use config::ClientConfig;
pub use fetch::FcrepoClient;
pub use utils::{collect_headers, is_failure_status, status_text};
