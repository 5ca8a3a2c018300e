#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! ## Overview
//!
//! The crate is layered, leaves first:
//!
//! 1. **Link/Response model** - [`FcrepoResponse`], [`ResponseBody`] and the
//!    `Prefer` model in [`protocol`]
//! 2. **Protocol client** - [`FcrepoClient`] performs exactly one HTTP call per
//!    method and maps failure statuses into [`OperationFailure`]s
//! 3. **Producer** - [`FcrepoProducer`] resolves an operation [`Message`] into
//!    one URL plus `Accept`/`Content-Type`/`Prefer` and dispatches it
//! 4. **Transactions** - [`TransactionManager`] opens, refreshes, commits and
//!    rolls back server-side transactions and owns the [`TransactionHandle`]
//!    producers read
//!
//! ## Wire Conventions
//!
//! | Purpose | Path |
//! |---------|------|
//! | Open a transaction | `{base}/fcr:tx` |
//! | Commit | `{base}/{tx}/fcr:tx/fcr:commit` |
//! | Roll back | `{base}/{tx}/fcr:tx/fcr:rollback` |
//! | Tombstone | `{resource}/fcr:tombstone` |
//! | Transform | `{resource}/fcr:transform[/{program}]` |
//!
//! PATCH bodies are always `application/sparql-update`.
//!
//! ## Module Structure
//!
//! - **[types]** - Verbs, responses and operation messages
//! - **[error]** - Error types and result handling
//! - **[client]** - HTTP client for the repository
//! - **[producer]** - Request resolution and dispatch
//! - **[transaction]** - Transaction lifecycle and the shared handle
//! - **[protocol]** - Constants, Link and Prefer headers, path assembly
//! - **[processor]** - SPARQL request builders for triple-store synchronization

pub mod client;
pub mod error;
pub mod processor;
pub mod producer;
pub mod protocol;
pub mod transaction;
pub mod types;

pub use client::{ClientConfig, FcrepoClient};
pub use error::{FcrepoError, OperationFailure, Result};
pub use producer::{EndpointConfig, FcrepoProducer, OperationRequest, ResolvedRequest};
pub use protocol::{Prefer, PreferToken, ReturnMode};
pub use transaction::{
    TransactionHandle, TransactionInfo, TransactionManager, TransactionSynchronization,
};
pub use types::{FcrepoResponse, Message, MessageBody, ResponseBody, Verb};

#[cfg(test)]
mod tests;
