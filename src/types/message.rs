//! Operation messages exchanged with the host pipeline.
//!
//! The host hands the producer a [`Message`] describing one operation and gets
//! a [`Message`] back: the same headers plus `content-type` and
//! `http-status-code`, with the body replaced by the repository's entity.
//!
//! Header keys are case-insensitive and stored lower-cased.
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::{Message, Verb};
//! use fcrepo_http::protocol::constants::headers;
//!
//! let message = Message::new()
//!     .with_header("HTTP-Method", "put")
//!     .with_header(headers::IDENTIFIER, "/foo")
//!     .with_body("<> <http://purl.org/dc/elements/1.1/title> \"foo\" .");
//!
//! assert_eq!(message.method().unwrap(), Verb::Put);
//! assert_eq!(message.header("fcrepo-identifier"), Some("/foo"));
//! assert!(message.body().is_some());
//! ```

use super::{ResponseBody, Verb};
use crate::error::Result;
use crate::protocol::constants::headers;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Body of an operation message.
#[derive(Debug)]
pub enum MessageBody {
    /// In-memory payload
    Bytes(Bytes),
    /// Unread repository entity
    Response(ResponseBody),
}

impl MessageBody {
    /// Read the body fully into memory.
    pub async fn into_bytes(self) -> Result<Bytes> {
        match self {
            MessageBody::Bytes(bytes) => Ok(bytes),
            MessageBody::Response(body) => body.bytes().await,
        }
    }

    /// The payload, if it is already in memory.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            MessageBody::Bytes(bytes) => Some(bytes),
            MessageBody::Response(_) => None,
        }
    }
}

impl From<Bytes> for MessageBody {
    fn from(bytes: Bytes) -> Self {
        MessageBody::Bytes(bytes)
    }
}

impl From<&'static str> for MessageBody {
    fn from(text: &'static str) -> Self {
        MessageBody::Bytes(Bytes::from_static(text.as_bytes()))
    }
}

impl From<String> for MessageBody {
    fn from(text: String) -> Self {
        MessageBody::Bytes(Bytes::from(text))
    }
}

impl From<Vec<u8>> for MessageBody {
    fn from(data: Vec<u8>) -> Self {
        MessageBody::Bytes(Bytes::from(data))
    }
}

impl From<ResponseBody> for MessageBody {
    fn from(body: ResponseBody) -> Self {
        MessageBody::Response(body)
    }
}

/// An inbound or outbound operation message.
#[derive(Debug, Default)]
pub struct Message {
    headers: BTreeMap<String, String>,
    body: Option<MessageBody>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, replacing any previous value.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set a body.
    pub fn with_body(mut self, body: impl Into<MessageBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Remove a header, returning its value.
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(&name.to_ascii_lowercase())
    }

    /// Look up a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All headers, keys lower-cased.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// The body, if any.
    pub fn body(&self) -> Option<&MessageBody> {
        self.body.as_ref()
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: Option<MessageBody>) {
        self.body = body;
    }

    /// Take the body out, leaving `None`.
    pub fn take_body(&mut self) -> Option<MessageBody> {
        self.body.take()
    }

    /// Read the body into memory; `None` when the message has no body.
    pub async fn body_bytes(&mut self) -> Result<Option<Bytes>> {
        match self.body.take() {
            Some(body) => Ok(Some(body.into_bytes().await?)),
            None => Ok(None),
        }
    }

    /// The verb requested by the `http-method` header; GET when unset.
    pub fn method(&self) -> Result<Verb> {
        match self.header(headers::HTTP_METHOD) {
            Some(method) => method.parse(),
            None => Ok(Verb::default()),
        }
    }

    /// The status recorded by the producer, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.header(headers::HTTP_STATUS_CODE)
            .and_then(|status| status.parse().ok())
    }

    /// The transaction id carried by the message, if any.
    pub fn transaction_id(&self) -> Option<&str> {
        self.header(headers::TRANSACTION)
            .filter(|id| !id.is_empty())
    }
}
