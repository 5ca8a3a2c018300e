//! Request resolution and dispatch.
//!
//! The producer turns one operation [`Message`](crate::Message) into one
//! repository call. Resolution is split from I/O:
//!
//! 1. [`OperationRequest::from_message`] gathers configuration, headers and
//!    the active transaction.
//! 2. [`OperationRequest::resolve`] applies every precedence rule and yields a
//!    [`ResolvedRequest`].
//! 3. [`FcrepoProducer::process`] optionally looks up the `describedby`
//!    target with a HEAD, sends the request and folds the response back into
//!    a message.
//!
//! # Module Organization
//!
//! ```text
//! producer/
//! ├── endpoint  - EndpointConfig and base URL normalization
//! ├── operation - OperationRequest / ResolvedRequest (pure)
//! └── dispatch  - FcrepoProducer
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use fcrepo_http::{EndpointConfig, FcrepoProducer, Message};
//!
//! let producer = FcrepoProducer::new(EndpointConfig::new("localhost:8080/rest"))?;
//! let reply = producer
//!     .process(Message::new().with_header("fcrepo-identifier", "/foo"))
//!     .await?;
//! assert_eq!(reply.status_code(), Some(200));
//! ```

mod dispatch;
mod endpoint;
mod operation;

pub use dispatch::FcrepoProducer;
pub use endpoint::EndpointConfig;
pub use operation::{OperationRequest, ResolvedRequest};
