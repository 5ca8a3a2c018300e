//! The repository protocol client.
//!
//! Every public method issues exactly one HTTP request and turns the reply into
//! an [`FcrepoResponse`]. Redirects are not followed, so a `3xx` reply and its
//! `Location` reach the caller untouched.
//!
//! # Examples
//!
//! ```ignore
//! use fcrepo_http::FcrepoClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FcrepoClient::new();
//!     let response = client
//!         .get("http://localhost:8080/rest/foo", Some("text/turtle"), None)
//!         .await?;
//!     println!("Status: {}", response.status);
//!     println!("{}", response.body_bytes().await?.len());
//!     Ok(())
//! }
//! ```

use crate::client::{config::ClientConfig, utils};
use crate::error::{OperationFailure, Result};
use crate::protocol::{self, constants::media_types};
use crate::types::{FcrepoResponse, ResponseBody, Verb};
use bytes::Bytes;
use reqwest::header::{HeaderName, ACCEPT, CONTENT_TYPE, LINK, LOCATION};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// HTTP client for an LDP repository.
///
/// Cheap to clone; clones share the connection pool. Holds no per-call state,
/// so it can serve independent requests concurrently.
#[derive(Clone)]
pub struct FcrepoClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl FcrepoClient {
    /// Create a client with default configuration (no credentials, fail on error).
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .pool_idle_timeout(Duration::from_secs(90));

        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        if !config.proxy_url.is_empty() {
            match reqwest::Proxy::all(&config.proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("Ignoring invalid proxy {}: {}", config.proxy_url, e),
            }
        }

        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::default()
        });

        FcrepoClient {
            client,
            config: Arc::new(config),
        }
    }

    /// Issue a HEAD request.
    ///
    /// The response never has a body; `described_by` is filled from the
    /// `describedby` link when exactly one is present.
    pub async fn head(&self, url: &str) -> Result<FcrepoResponse> {
        self.execute(Verb::Head, url, Vec::new(), None).await
    }

    /// Issue a GET request with optional `Accept` and `Prefer` headers.
    pub async fn get(
        &self,
        url: &str,
        accept: Option<&str>,
        prefer: Option<&str>,
    ) -> Result<FcrepoResponse> {
        let mut headers = Vec::new();
        if let Some(accept) = accept {
            headers.push((ACCEPT, accept));
        }
        if let Some(prefer) = prefer {
            headers.push((HeaderName::from_static("prefer"), prefer));
        }
        self.execute(Verb::Get, url, headers, None).await
    }

    /// Issue a PUT request.
    ///
    /// `Content-Type` is sent only when given, and no body at all is sent when
    /// `body` is `None`.
    pub async fn put(
        &self,
        url: &str,
        body: Option<Bytes>,
        content_type: Option<&str>,
    ) -> Result<FcrepoResponse> {
        let headers = content_type.map(|ct| (CONTENT_TYPE, ct)).into_iter().collect();
        self.execute(Verb::Put, url, headers, body).await
    }

    /// Issue a POST request. Same body rules as [`put`](Self::put).
    pub async fn post(
        &self,
        url: &str,
        body: Option<Bytes>,
        content_type: Option<&str>,
    ) -> Result<FcrepoResponse> {
        let headers = content_type.map(|ct| (CONTENT_TYPE, ct)).into_iter().collect();
        self.execute(Verb::Post, url, headers, body).await
    }

    /// Issue a PATCH request carrying a SPARQL update.
    pub async fn patch(&self, url: &str, body: Bytes) -> Result<FcrepoResponse> {
        let headers = vec![(CONTENT_TYPE, media_types::SPARQL_UPDATE)];
        self.execute(Verb::Patch, url, headers, Some(body)).await
    }

    /// Issue a DELETE request.
    pub async fn delete(&self, url: &str) -> Result<FcrepoResponse> {
        self.execute(Verb::Delete, url, Vec::new(), None).await
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Credentials to send to the host of `url`, if any.
    fn credentials_for(&self, url: &Url) -> Option<(&str, Option<&str>)> {
        let username = self.config.username.as_deref()?;
        if let Some(auth_host) = self.config.auth_host.as_deref() {
            let host = url.host_str()?;
            if !host.eq_ignore_ascii_case(auth_host) {
                return None;
            }
        }
        Some((username, self.config.password.as_deref()))
    }

    /// Send one request and normalize the reply.
    async fn execute(
        &self,
        verb: Verb,
        url: &str,
        headers: Vec<(HeaderName, &str)>,
        body: Option<Bytes>,
    ) -> Result<FcrepoResponse> {
        let target = Url::parse(url)
            .map_err(|e| OperationFailure::network(url, format!("Invalid URL: {}", e)))?;

        let mut req_builder = self.client.request(verb.into(), target.clone());
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }
        if let Some((username, password)) = self.credentials_for(&target) {
            req_builder = req_builder.basic_auth(username, password);
        }
        if let Some(body) = body {
            req_builder = req_builder.body(body);
        }

        tracing::debug!(method = %verb, url, "Sending repository request");

        let response = req_builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed before a response arrived: {}", verb, url, e);
            OperationFailure::network(url, e.to_string())
        })?;

        let status = response.status();
        let content_type = utils::first_header(response.headers(), CONTENT_TYPE);
        let location = utils::first_header(response.headers(), LOCATION);
        let described_by = protocol::described_by(
            response
                .headers()
                .get_all(LINK)
                .iter()
                .filter_map(|value| value.to_str().ok()),
            url,
        );

        if self.config.fail_on_error && utils::is_failure_status(status.as_u16()) {
            let mut failure = OperationFailure::http(url, status.as_u16(), utils::status_text(status))
                .with_headers(utils::collect_headers(response.headers()));
            if let Some(location) = location {
                failure = failure.with_redirect_location(location);
            }
            if verb != Verb::Head {
                if let Ok(text) = response.text().await {
                    if !text.is_empty() {
                        failure = failure.with_body(text);
                    }
                }
            }
            tracing::warn!("{} {} returned {}", verb, url, status);
            return Err(failure.into());
        }

        tracing::debug!(method = %verb, url, status = status.as_u16(), "Repository responded");

        let body = match verb {
            Verb::Head => None,
            _ => Some(ResponseBody::new(url, response)),
        };

        Ok(FcrepoResponse {
            url: url.to_string(),
            status: status.as_u16(),
            content_type,
            location,
            described_by,
            body,
        })
    }
}

impl Default for FcrepoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FcrepoClient::new();
        assert!(client.config().fail_on_error);
    }

    #[test]
    fn test_credentials_any_host() {
        let client = FcrepoClient::with_config(ClientConfig {
            username: Some("admin".into()),
            password: Some("pw".into()),
            ..Default::default()
        });
        let url = Url::parse("http://example.org/rest").unwrap();
        assert_eq!(client.credentials_for(&url), Some(("admin", Some("pw"))));
    }

    #[test]
    fn test_credentials_scoped_to_host() {
        let client = FcrepoClient::with_config(ClientConfig {
            username: Some("admin".into()),
            auth_host: Some("localhost".into()),
            ..Default::default()
        });
        let local = Url::parse("http://localhost:8080/rest").unwrap();
        let remote = Url::parse("http://example.org/rest").unwrap();
        assert_eq!(client.credentials_for(&local), Some(("admin", None)));
        assert_eq!(client.credentials_for(&remote), None);
    }

    #[test]
    fn test_no_credentials() {
        let client = FcrepoClient::new();
        let url = Url::parse("http://localhost/rest").unwrap();
        assert_eq!(client.credentials_for(&url), None);
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_failure() {
        let client = FcrepoClient::new();
        let err = client.head("not a url").await.unwrap_err();
        assert_eq!(err.status_code(), Some(-1));
    }
}
