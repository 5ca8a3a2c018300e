//! Repository responses.

use crate::error::{FcrepoError, OperationFailure, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::fmt;

/// A response entity that has not been read yet.
///
/// The connection stays checked out until the body is read to the end or the
/// value is dropped, so callers should consume it (or call [`discard`]) promptly.
///
/// [`discard`]: ResponseBody::discard
pub struct ResponseBody {
    url: String,
    inner: reqwest::Response,
}

impl ResponseBody {
    pub(crate) fn new(url: impl Into<String>, inner: reqwest::Response) -> Self {
        ResponseBody {
            url: url.into(),
            inner,
        }
    }

    /// Read the whole entity.
    pub async fn bytes(self) -> Result<Bytes> {
        let ResponseBody { url, inner } = self;
        inner
            .bytes()
            .await
            .map_err(|e| OperationFailure::network(url, e.to_string()).into())
    }

    /// Read the whole entity as UTF-8 text.
    pub async fn text(self) -> Result<String> {
        let ResponseBody { url, inner } = self;
        inner
            .text()
            .await
            .map_err(|e| OperationFailure::network(url, e.to_string()).into())
    }

    /// Stream the entity chunk by chunk.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes>> + Send + 'static {
        let ResponseBody { url, inner } = self;
        inner.bytes_stream().map(move |chunk| {
            chunk.map_err(|e| FcrepoError::from(OperationFailure::network(url.clone(), e.to_string())))
        })
    }

    /// Release the connection without reading the entity.
    pub fn discard(self) {
        drop(self);
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("url", &self.url)
            .field("content_length", &self.inner.content_length())
            .finish()
    }
}

/// Snapshot of one repository response.
#[derive(Debug)]
pub struct FcrepoResponse {
    /// The URL that was requested
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// First `Content-Type` header, if any
    pub content_type: Option<String>,

    /// `Location` header (creation location or redirect target)
    pub location: Option<String>,

    /// Target of the single `describedby` link, if exactly one was present
    pub described_by: Option<String>,

    /// Response entity; `None` for HEAD responses
    pub body: Option<ResponseBody>,
}

impl FcrepoResponse {
    /// Create a response with no headers and no body.
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        FcrepoResponse {
            url: url.into(),
            status,
            content_type: None,
            location: None,
            described_by: None,
            body: None,
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the described-by target.
    pub fn with_described_by(mut self, described_by: impl Into<String>) -> Self {
        self.described_by = Some(described_by.into());
        self
    }

    /// Whether the status is inside `[200, 400)`.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }

    /// Take ownership of the body, leaving `None` behind.
    pub fn take_body(&mut self) -> Option<ResponseBody> {
        self.body.take()
    }

    /// Read the whole body, or return empty bytes when there is none.
    pub async fn body_bytes(self) -> Result<Bytes> {
        match self.body {
            Some(body) => body.bytes().await,
            None => Ok(Bytes::new()),
        }
    }
}
