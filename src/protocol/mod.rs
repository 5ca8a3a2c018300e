//! Repository wire protocol: constants, Link headers and the `Prefer` header.
//!
//! This module holds everything that is fixed by the repository's HTTP
//! conventions rather than by configuration.
//!
//! # Path Conventions
//!
//! All suffixes are relative to the base repository URL (or to a resource URL).
//!
//! | Purpose | Path |
//! |---------|------|
//! | Open a transaction | `{base}/fcr:tx` |
//! | Refresh a transaction | `{base}/{tx}/fcr:tx` |
//! | Commit | `{base}/{tx}/fcr:tx/fcr:commit` |
//! | Roll back | `{base}/{tx}/fcr:tx/fcr:rollback` |
//! | Tombstone of a deleted resource | `{resource}/fcr:tombstone` |
//! | Transform program | `{resource}/fcr:transform[/{program}]` |
//!
//! PATCH bodies are always `application/sparql-update`.
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::protocol::{parse_link_header, Prefer, PreferToken};
//!
//! let links = parse_link_header(r#"<http://localhost/rest/foo/fcr:metadata>; rel="describedby""#);
//! assert_eq!(links.len(), 1);
//! assert!(links[0].has_rel("describedby"));
//!
//! let prefer = Prefer::representation().include(PreferToken::PreferContainment.uri());
//! assert!(prefer.to_string().contains("http://www.w3.org/ns/ldp#PreferContainment"));
//! ```

mod headers;
mod paths;
mod prefer;

pub use headers::{described_by, parse_link_header, Link};
pub use paths::{has_scheme, join_path};
pub use prefer::{expand_prefer_token, Prefer, PreferToken, ReturnMode};

/// Protocol constants.
pub mod constants {
    /// Keys of the inbound/outbound message headers understood by the producer.
    ///
    /// Keys are lower-case; [`crate::Message`] normalizes lookups.
    pub mod headers {
        /// HTTP verb to use for the operation
        pub const HTTP_METHOD: &str = "http-method";
        /// Media type of the message body
        pub const CONTENT_TYPE: &str = "content-type";
        /// Requested response media type
        pub const ACCEPT_CONTENT_TYPE: &str = "accept-content-type";
        /// Literal `Accept` header carried by the message
        pub const ACCEPT: &str = "accept";
        /// Resource path relative to the base URL
        pub const IDENTIFIER: &str = "fcrepo-identifier";
        /// Resource path as carried by repository event messages
        pub const EVENT_IDENTIFIER: &str = "fcrepo-event-identifier";
        /// Base repository URL, used by the synchronization processors
        pub const BASE_URL: &str = "fcrepo-base-url";
        /// Per-call transform program name
        pub const TRANSFORM: &str = "fcrepo-transform";
        /// Verbatim `Prefer` header value
        pub const PREFER: &str = "fcrepo-prefer";
        /// Transaction id
        pub const TRANSACTION: &str = "fcrepo-transaction";
        /// Creation location returned by the repository
        pub const LOCATION: &str = "fcrepo-location";
        /// Status of the last repository response
        pub const HTTP_STATUS_CODE: &str = "http-status-code";
    }

    /// Fixed path segments.
    pub mod paths {
        /// Transaction endpoint
        pub const TRANSACTION: &str = "fcr:tx";
        /// Commit sub-path of a transaction
        pub const COMMIT: &str = "fcr:tx/fcr:commit";
        /// Rollback sub-path of a transaction
        pub const ROLLBACK: &str = "fcr:tx/fcr:rollback";
        /// Tombstone sub-path of a deleted resource
        pub const TOMBSTONE: &str = "fcr:tombstone";
        /// Transform sub-path of a resource
        pub const TRANSFORM: &str = "fcr:transform";
    }

    /// Media types used by the protocol.
    pub mod media_types {
        /// PATCH body type
        pub const SPARQL_UPDATE: &str = "application/sparql-update";
        /// Transform output
        pub const JSON: &str = "application/json";
        /// Representation requested when nothing else is configured
        pub const DEFAULT_RDF: &str = "application/rdf+xml";
        /// The only RDF serialization accepted verbatim by the sync processors
        pub const N_TRIPLES: &str = "application/n-triples";
        /// Body type of SPARQL protocol requests
        pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    }

    /// Link relations.
    pub mod relations {
        /// Points from a binary to its RDF description
        pub const DESCRIBED_BY: &str = "describedby";
    }
}
