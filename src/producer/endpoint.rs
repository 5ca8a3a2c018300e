//! Endpoint configuration for the producer.
//!
//! One immutable value holds every toggle that shapes a request. The order in
//! which these values are consulted lives in one place,
//! [`OperationRequest`](super::OperationRequest).
//!
//! # Configuration Options
//!
//! | Option | Default | Effect |
//! |--------|---------|--------|
//! | `base_url` | empty (required) | Repository root; scheme inferred when missing |
//! | `content_type` | none | Forces `Content-Type` of PUT/POST bodies |
//! | `accept` | none | Forces `Accept` unless a transform is active |
//! | `transform` | none | Default transform program |
//! | `tombstone` | `false` | DELETE also removes the tombstone |
//! | `metadata` | `true` | GET/PATCH follow `describedby` to the RDF description |
//! | `prefer_include` | empty | Tokens/URIs to include in GET representations |
//! | `prefer_omit` | empty | Tokens/URIs to omit from GET representations |
//! | `fail_on_error` | `true` | Statuses outside `[200, 400)` become errors |
//! | `auth_username`, `auth_password`, `auth_host` | none | Basic-auth credentials |
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::EndpointConfig;
//!
//! let config: EndpointConfig = serde_json::from_str(
//!     r#"{ "base_url": "localhost:443/rest", "tombstone": true }"#,
//! ).unwrap();
//! assert!(config.metadata);
//! assert_eq!(config.normalized_base_url().unwrap(), "https://localhost:443/rest");
//! ```

use crate::client::ClientConfig;
use crate::error::{FcrepoError, Result};
use crate::protocol::has_scheme;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Configuration of one repository endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Repository base URL, with or without scheme.
    pub base_url: String,

    /// `Content-Type` for request bodies, overriding the message's own.
    pub content_type: Option<String>,

    /// `Accept` value, overriding what the message asks for.
    pub accept: Option<String>,

    /// Default transform program name.
    pub transform: Option<String>,

    /// Whether DELETE targets the resource's tombstone.
    pub tombstone: bool,

    /// Whether GET and PATCH resolve binaries to their RDF description first.
    pub metadata: bool,

    /// Prefer tokens or URIs to include.
    pub prefer_include: Vec<String>,

    /// Prefer tokens or URIs to omit.
    pub prefer_omit: Vec<String>,

    /// Whether rejected statuses raise an error.
    pub fail_on_error: bool,

    /// Basic-auth user name.
    pub auth_username: Option<String>,

    /// Basic-auth password.
    pub auth_password: Option<String>,

    /// Host the credentials are scoped to.
    pub auth_host: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig {
            base_url: String::new(),
            content_type: None,
            accept: None,
            transform: None,
            tombstone: false,
            metadata: true,
            prefer_include: Vec::new(),
            prefer_omit: Vec::new(),
            fail_on_error: true,
            auth_username: None,
            auth_password: None,
            auth_host: None,
        }
    }
}

impl EndpointConfig {
    /// Configuration for a base URL with every other option at its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        EndpointConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// The base URL with an explicit scheme and no trailing slash.
    ///
    /// A URL without scheme gets `https` when its port is 443 and `http`
    /// otherwise.
    pub fn normalized_base_url(&self) -> Result<String> {
        let base = self.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(FcrepoError::Config("Base URL is empty".to_string()));
        }
        if has_scheme(base) {
            return Ok(base.to_string());
        }

        let probe = Url::parse(&format!("http://{}", base))
            .map_err(|e| FcrepoError::Config(format!("Invalid base URL '{}': {}", base, e)))?;
        let scheme = if probe.port() == Some(443) {
            "https"
        } else {
            "http"
        };
        Ok(format!("{}://{}", scheme, base))
    }

    /// Protocol client configuration derived from this endpoint.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            username: self.auth_username.clone(),
            password: self.auth_password.clone(),
            auth_host: self.auth_host.clone(),
            fail_on_error: self.fail_on_error,
            ..Default::default()
        }
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("content_type", &self.content_type)
            .field("accept", &self.accept)
            .field("transform", &self.transform)
            .field("tombstone", &self.tombstone)
            .field("metadata", &self.metadata)
            .field("prefer_include", &self.prefer_include)
            .field("prefer_omit", &self.prefer_omit)
            .field("fail_on_error", &self.fail_on_error)
            .field("auth_username", &self.auth_username)
            .field("auth_password", &self.auth_password.as_ref().map(|_| "***"))
            .field("auth_host", &self.auth_host)
            .finish()
    }
}
