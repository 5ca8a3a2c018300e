//! Shared transaction handle.

use parking_lot::RwLock;
use std::sync::Arc;

/// The id of the active transaction for one unit of work.
///
/// Clones share the same slot. The [`TransactionManager`] that created the
/// handle is the only writer; producers only read the id to prefix URLs.
/// Operations within one transaction must be serialized by the caller.
///
/// [`TransactionManager`]: super::TransactionManager
#[derive(Clone, Debug, Default)]
pub struct TransactionHandle {
    session_id: Arc<RwLock<Option<String>>>,
}

impl TransactionHandle {
    /// A handle with no active transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active transaction id, if any.
    pub fn id(&self) -> Option<String> {
        self.session_id.read().clone()
    }

    /// Whether a transaction is active.
    pub fn is_active(&self) -> bool {
        self.session_id.read().is_some()
    }

    pub(crate) fn set(&self, id: String) {
        *self.session_id.write() = Some(id);
    }

    /// Clear the id and return what it was.
    pub(crate) fn take(&self) -> Option<String> {
        self.session_id.write().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_inactive() {
        let handle = TransactionHandle::new();
        assert!(!handle.is_active());
        assert_eq!(handle.id(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = TransactionHandle::new();
        let reader = handle.clone();

        handle.set("tx:abc".to_string());
        assert_eq!(reader.id().as_deref(), Some("tx:abc"));

        assert_eq!(handle.take().as_deref(), Some("tx:abc"));
        assert!(!reader.is_active());
        assert_eq!(handle.take(), None);
    }
}
