//! Configuration for the repository protocol client.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `username` | none | Basic-auth user; no credentials when unset |
//! | `password` | none | Basic-auth password |
//! | `auth_host` | none | Only send credentials to this host; any host when unset |
//! | `fail_on_error` | `true` | Turn statuses outside `[200, 400)` into errors |
//! | `request_timeout_ms` | none | Whole-request timeout; the HTTP stack's own limits apply when unset |
//! | `proxy_url` | empty | Route requests through this proxy |
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::client::ClientConfig;
//!
//! let config = ClientConfig {
//!     username: Some("fedoraAdmin".into()),
//!     password: Some("secret".into()),
//!     ..Default::default()
//! };
//! assert!(config.fail_on_error);
//! assert!(!format!("{:?}", config).contains("secret"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for [`FcrepoClient`](super::FcrepoClient).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Basic-auth user name.
    pub username: Option<String>,

    /// Basic-auth password.
    pub password: Option<String>,

    /// Host the credentials are scoped to.
    ///
    /// When set, requests to any other host are sent without credentials.
    pub auth_host: Option<String>,

    /// Whether responses outside `[200, 400)` become [`OperationFailure`]s.
    ///
    /// When disabled such responses are returned like any other, and callers
    /// branch on the status themselves. Network failures are always errors.
    ///
    /// [`OperationFailure`]: crate::OperationFailure
    pub fail_on_error: bool,

    /// Request timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,

    /// Proxy URL (optional).
    pub proxy_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            username: None,
            password: None,
            auth_host: None,
            fail_on_error: true,
            request_timeout_ms: None,
            proxy_url: String::new(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("auth_host", &self.auth_host)
            .field("fail_on_error", &self.fail_on_error)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}
