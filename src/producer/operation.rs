//! Resolution of one operation into a concrete request.
//!
//! An [`OperationRequest`] gathers everything that can influence a request:
//! endpoint configuration, message headers and the active transaction. Its
//! methods apply the precedence rules in one place, with no I/O, and
//! [`OperationRequest::resolve`] freezes the result into a [`ResolvedRequest`].
//!
//! # Precedence
//!
//! | Value | Order |
//! |-------|-------|
//! | Resource path | `fcrepo-identifier` > `fcrepo-event-identifier` > root |
//! | Transaction | active handle > `fcrepo-transaction` header > none |
//! | Accept | transform active (JSON) > endpoint > `accept-content-type` > `accept` > `application/rdf+xml` |
//! | Content-Type | endpoint > `content-type` > none |
//! | Prefer (GET only) | `fcrepo-prefer` verbatim > endpoint include/omit > none |
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::{EndpointConfig, Message, OperationRequest};
//!
//! let config = EndpointConfig {
//!     tombstone: true,
//!     ..EndpointConfig::new("localhost:8080/rest")
//! };
//! let message = Message::new()
//!     .with_header("http-method", "DELETE")
//!     .with_header("fcrepo-identifier", "/foo");
//!
//! let operation = OperationRequest::from_message(&config, &message, None).unwrap();
//! assert_eq!(operation.url(), "http://localhost:8080/rest/foo/fcr:tombstone");
//! ```

use super::EndpointConfig;
use crate::error::Result;
use crate::protocol::constants::{headers, media_types, paths};
use crate::protocol::{join_path, Prefer};
use crate::types::{Message, Verb};

/// Everything needed to shape one repository request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationRequest {
    /// Verb to issue
    pub verb: Verb,
    /// Normalized repository base URL
    pub base_url: String,
    /// Resource path relative to the base
    pub resource_path: String,
    /// Transaction to address, if any
    pub transaction_id: Option<String>,
    /// Endpoint `Content-Type` override
    pub content_type: Option<String>,
    /// Endpoint `Accept` override
    pub accept_override: Option<String>,
    /// Endpoint default transform program
    pub transform_name: Option<String>,
    /// Per-call transform program; an empty name still counts as set
    pub transform_override: Option<String>,
    /// Prefer tokens to include
    pub prefer_include: Vec<String>,
    /// Prefer tokens to omit
    pub prefer_omit: Vec<String>,
    /// Whether DELETE targets the tombstone
    pub use_tombstone: bool,
    /// Whether to follow `describedby` before GET/PATCH
    pub fetch_metadata_first: bool,
    /// `content-type` of the inbound message
    pub inbound_content_type: Option<String>,
    /// `accept-content-type` of the inbound message
    pub inbound_accept_content_type: Option<String>,
    /// Literal `accept` of the inbound message
    pub inbound_accept: Option<String>,
    /// Verbatim `Prefer` value of the inbound message
    pub inbound_prefer: Option<String>,
}

/// The outcome of resolution, ready to dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// Verb to issue
    pub verb: Verb,
    /// `{base}[/{tx}]/{path}`: the resource itself
    pub resource_url: String,
    /// Sub-path appended to the resource (transform or tombstone)
    pub suffix: Option<String>,
    /// Resource URL with suffix: the request target when no metadata lookup applies
    pub url: String,
    /// `Accept` for GET
    pub accept: String,
    /// `Content-Type` for PUT/POST bodies
    pub content_type: Option<String>,
    /// `Prefer` for GET
    pub prefer: Option<String>,
    /// Whether a HEAD must first look for a `describedby` link
    pub metadata_lookup: bool,
}

impl ResolvedRequest {
    /// The request target once a `describedby` link has been found.
    pub fn target_for(&self, described_by: &str) -> String {
        match &self.suffix {
            Some(suffix) => join_path(described_by, &[suffix]),
            None => described_by.to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl OperationRequest {
    /// Gather the inputs for one message.
    ///
    /// `active_transaction` is the id held by the transaction handle the
    /// producer is bound to; it wins over a transaction id on the message.
    pub fn from_message(
        config: &EndpointConfig,
        message: &Message,
        active_transaction: Option<String>,
    ) -> Result<Self> {
        let resource_path = message
            .header(headers::IDENTIFIER)
            .or_else(|| message.header(headers::EVENT_IDENTIFIER))
            .unwrap_or_default()
            .to_string();

        Ok(OperationRequest {
            verb: message.method()?,
            base_url: config.normalized_base_url()?,
            resource_path,
            transaction_id: active_transaction
                .or_else(|| message.transaction_id().map(str::to_string)),
            content_type: non_empty(config.content_type.as_deref()),
            accept_override: non_empty(config.accept.as_deref()),
            transform_name: non_empty(config.transform.as_deref()),
            transform_override: message.header(headers::TRANSFORM).map(|t| t.trim().to_string()),
            prefer_include: config.prefer_include.clone(),
            prefer_omit: config.prefer_omit.clone(),
            use_tombstone: config.tombstone,
            fetch_metadata_first: config.metadata,
            inbound_content_type: non_empty(message.header(headers::CONTENT_TYPE)),
            inbound_accept_content_type: non_empty(message.header(headers::ACCEPT_CONTENT_TYPE)),
            inbound_accept: non_empty(message.header(headers::ACCEPT)),
            inbound_prefer: non_empty(message.header(headers::PREFER)),
        })
    }

    /// Whether a transform program applies (configured or per call).
    pub fn transform_active(&self) -> bool {
        self.transform_override.is_some() || self.transform_name.is_some()
    }

    /// `{base}[/{tx}]/{path}`
    pub fn resource_url(&self) -> String {
        match &self.transaction_id {
            Some(tx) => join_path(&self.base_url, &[tx, &self.resource_path]),
            None => join_path(&self.base_url, &[&self.resource_path]),
        }
    }

    /// The transform or tombstone sub-path for this verb, if any.
    ///
    /// POST names no program (the program is the body); GET names the
    /// per-call program, else the configured one. Tombstones only apply to
    /// DELETE, which never takes a transform.
    pub fn url_suffix(&self) -> Option<String> {
        match self.verb {
            Verb::Post if self.transform_active() => Some(paths::TRANSFORM.to_string()),
            Verb::Get if self.transform_active() => {
                let program = self
                    .transform_override
                    .as_deref()
                    .or(self.transform_name.as_deref())
                    .unwrap_or_default();
                if program.is_empty() {
                    Some(paths::TRANSFORM.to_string())
                } else {
                    Some(format!("{}/{}", paths::TRANSFORM, program))
                }
            }
            Verb::Delete if self.use_tombstone => Some(paths::TOMBSTONE.to_string()),
            _ => None,
        }
    }

    /// The literal request URL.
    pub fn url(&self) -> String {
        let resource_url = self.resource_url();
        match self.url_suffix() {
            Some(suffix) => join_path(&resource_url, &[&suffix]),
            None => resource_url,
        }
    }

    /// The `Accept` value.
    pub fn accept(&self) -> String {
        if self.transform_active() {
            return media_types::JSON.to_string();
        }
        self.accept_override
            .as_deref()
            .or(self.inbound_accept_content_type.as_deref())
            .or(self.inbound_accept.as_deref())
            .unwrap_or(media_types::DEFAULT_RDF)
            .to_string()
    }

    /// The `Content-Type` value for a request body.
    pub fn content_type(&self) -> Option<String> {
        self.content_type
            .clone()
            .or_else(|| self.inbound_content_type.clone())
    }

    /// The `Prefer` value; only GET carries one.
    pub fn prefer(&self) -> Option<String> {
        if self.verb != Verb::Get {
            return None;
        }
        self.inbound_prefer.clone().or_else(|| {
            Prefer::from_lists(&self.prefer_include, &self.prefer_omit).map(|p| p.to_string())
        })
    }

    /// Whether the target has to be looked up through `describedby`.
    pub fn needs_metadata_lookup(&self) -> bool {
        self.fetch_metadata_first && matches!(self.verb, Verb::Get | Verb::Patch)
    }

    /// Freeze the resolution.
    pub fn resolve(&self) -> ResolvedRequest {
        let resource_url = self.resource_url();
        let suffix = self.url_suffix();
        let url = match &suffix {
            Some(suffix) => join_path(&resource_url, &[suffix]),
            None => resource_url.clone(),
        };

        ResolvedRequest {
            verb: self.verb,
            resource_url,
            suffix,
            url,
            accept: self.accept(),
            content_type: self.content_type(),
            prefer: self.prefer(),
            metadata_lookup: self.needs_metadata_lookup(),
        }
    }
}
