//! Server-side transactions.
//!
//! A transaction is opened with a POST to `{base}/fcr:tx`; the repository
//! answers with a `Location` whose last path segment is the transaction id.
//! While a transaction is active, every producer that shares its
//! [`TransactionHandle`] addresses resources as `{base}/{id}/{path}`.
//!
//! # Lifecycle
//!
//! ```text
//!   no transaction ──begin──▶ active(id) ──commit / rollback──▶ no transaction
//!                                 │                                 ▲
//!                                 └──────── (failure as well) ──────┘
//! ```
//!
//! Commit and rollback clear the id whether or not the repository accepted
//! them. A transaction the client tried to close is never addressed again,
//! even if the server still holds it open; it will expire there on its own.
//!
//! Nothing here rolls back automatically. The code orchestrating the unit of
//! work decides when to call [`TransactionManager::rollback`].
//!
//! # Examples
//!
//! ```ignore
//! use fcrepo_http::{EndpointConfig, FcrepoProducer, Message, TransactionManager};
//!
//! let config = EndpointConfig::new("localhost:8080/rest");
//! let manager = TransactionManager::new(&config)?;
//! let producer = FcrepoProducer::new(config)?.with_transaction_manager(&manager);
//!
//! manager.begin().await?;
//! let put = Message::new()
//!     .with_header("http-method", "PUT")
//!     .with_header("fcrepo-identifier", "/foo");
//! match producer.process(put).await {
//!     Ok(_) => manager.commit().await?,
//!     Err(e) => {
//!         manager.rollback().await?;
//!         return Err(e.into());
//!     }
//! }
//! ```

mod handle;
mod manager;

pub use handle::TransactionHandle;
pub use manager::{TransactionInfo, TransactionManager, TransactionSynchronization};
