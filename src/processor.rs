//! Triple-store synchronization helpers.
//!
//! Each processor rewrites a repository event message into a SPARQL request
//! for an external triple store: `http-method: POST`, a form-urlencoded
//! content type and a `query=` or `update=` body. Sending the request is left
//! to the host.
//!
//! Every processor addresses the resource named by [`subject_uri`], so a
//! message without `fcrepo-base-url` is rejected before anything is built.
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::processor::subject_uri;
//! use fcrepo_http::Message;
//!
//! let message = Message::new()
//!     .with_header("fcrepo-base-url", "http://localhost:8080/rest/")
//!     .with_header("fcrepo-identifier", "/foo");
//! assert_eq!(subject_uri(&message).unwrap(), "http://localhost:8080/rest/foo");
//! ```

use crate::error::{FcrepoError, Result};
use crate::protocol::constants::{headers, media_types};
use crate::protocol::join_path;
use crate::types::Message;
use async_trait::async_trait;

const METADATA_SUFFIX: &str = "/fcr:metadata";

/// The URI of the resource a message is about.
///
/// Joins `fcrepo-base-url` with `fcrepo-identifier` (or the event identifier).
/// A trailing `fcr:metadata` is dropped because a description is about the
/// binary it describes.
pub fn subject_uri(message: &Message) -> Result<String> {
    let base = message
        .header(headers::BASE_URL)
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .ok_or_else(|| {
            FcrepoError::Config(format!("Missing required header {}", headers::BASE_URL))
        })?;

    let identifier = message
        .header(headers::IDENTIFIER)
        .or_else(|| message.header(headers::EVENT_IDENTIFIER))
        .unwrap_or_default();
    let identifier = identifier.strip_suffix(METADATA_SUFFIX).unwrap_or(identifier);

    Ok(join_path(base, &[identifier]))
}

/// Shapes a message in place.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Rewrite `message` into the request this processor produces.
    async fn process(&self, message: &mut Message) -> Result<()>;
}

/// Builds `query=DESCRIBE <subject>`.
#[derive(Clone, Debug, Default)]
pub struct SparqlDescribeProcessor;

/// Builds `update=DELETE WHERE { <subject> ?p ?o }`.
#[derive(Clone, Debug, Default)]
pub struct SparqlDeleteProcessor {
    /// Graph to delete from; the default graph when unset
    pub named_graph: Option<String>,
}

/// Replaces the triples of a subject with the N-Triples carried by the message.
#[derive(Clone, Debug, Default)]
pub struct SparqlUpdateProcessor {
    /// Graph to write to; the default graph when unset
    pub named_graph: Option<String>,
}

#[async_trait]
impl Processor for SparqlDescribeProcessor {
    async fn process(&self, message: &mut Message) -> Result<()> {
        let subject = subject_uri(message)?;
        let body = form_body("query", &format!("DESCRIBE <{}>", subject));
        into_sparql_request(message, body);
        Ok(())
    }
}

#[async_trait]
impl Processor for SparqlDeleteProcessor {
    async fn process(&self, message: &mut Message) -> Result<()> {
        let subject = subject_uri(message)?;
        let update = delete_where(&subject, self.named_graph.as_deref());
        into_sparql_request(message, form_body("update", &update));
        Ok(())
    }
}

#[async_trait]
impl Processor for SparqlUpdateProcessor {
    async fn process(&self, message: &mut Message) -> Result<()> {
        let subject = subject_uri(message)?;

        if let Some(content_type) = message.header(headers::CONTENT_TYPE) {
            let essence = content_type.split(';').next().unwrap_or_default().trim();
            if !essence.eq_ignore_ascii_case(media_types::N_TRIPLES) {
                return Err(FcrepoError::InvalidRequest(format!(
                    "Expected {} for {}, got {}",
                    media_types::N_TRIPLES,
                    subject,
                    content_type
                )));
            }
        }

        let body = message.body_bytes().await?.ok_or_else(|| {
            FcrepoError::InvalidRequest(format!("No triples to write for {}", subject))
        })?;
        let triples = String::from_utf8(body.to_vec()).map_err(|e| {
            FcrepoError::InvalidRequest(format!("N-Triples for {} are not UTF-8: {}", subject, e))
        })?;

        let insert = match self.named_graph.as_deref() {
            Some(graph) => format!("INSERT DATA {{ GRAPH <{}> {{ {} }} }}", graph, triples.trim()),
            None => format!("INSERT DATA {{ {} }}", triples.trim()),
        };
        let update = format!(
            "{};\n{}",
            delete_where(&subject, self.named_graph.as_deref()),
            insert
        );

        into_sparql_request(message, form_body("update", &update));
        Ok(())
    }
}

fn delete_where(subject: &str, graph: Option<&str>) -> String {
    match graph {
        Some(graph) => format!("DELETE WHERE {{ GRAPH <{}> {{ <{}> ?p ?o }} }}", graph, subject),
        None => format!("DELETE WHERE {{ <{}> ?p ?o }}", subject),
    }
}

fn form_body(key: &str, value: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

fn into_sparql_request(message: &mut Message, body: String) {
    message.set_header(headers::HTTP_METHOD, "POST");
    message.set_header(headers::CONTENT_TYPE, media_types::FORM_URLENCODED);
    message.set_body(Some(body.into()));
}
