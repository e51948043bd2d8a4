//! Canonical field stores.
//!
//! A store holds the authoritative envelope for one section and exposes a
//! whole-list `read` and `replace`. [`MemoryStore`] keeps the snapshot in
//! process and simulates network latency before each call.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use folio_common::{Field, GroupEnvelope, Payload, StoreError};

/// Abstraction over the section backend. Real implementation: `MemoryStore`.
#[async_trait]
pub trait FieldStore<P: Payload>: Send + Sync {
    /// Current authoritative envelope. Never partial.
    async fn read(&self) -> Result<GroupEnvelope<P>, StoreError>;

    /// Swap the whole field list. Other envelope attributes are untouched.
    /// No validation happens here.
    async fn replace(&self, fields: Vec<Field<P>>) -> Result<(), StoreError>;
}

/// Artificial delay applied before a store call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLatency {
    pub read: Duration,
    pub replace: Duration,
}

impl StoreLatency {
    pub const NONE: StoreLatency = StoreLatency {
        read: Duration::ZERO,
        replace: Duration::ZERO,
    };
}

impl Default for StoreLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(100),
            replace: Duration::from_millis(200),
        }
    }
}

/// In-process snapshot store. Concurrent replaces are last-writer-wins.
pub struct MemoryStore<P: Payload> {
    snapshot: RwLock<GroupEnvelope<P>>,
    latency: StoreLatency,
}

impl<P: Payload> MemoryStore<P> {
    pub fn new(envelope: GroupEnvelope<P>, latency: StoreLatency) -> Self {
        Self {
            snapshot: RwLock::new(envelope),
            latency,
        }
    }

    async fn delay(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[async_trait]
impl<P: Payload> FieldStore<P> for MemoryStore<P> {
    async fn read(&self) -> Result<GroupEnvelope<P>, StoreError> {
        Self::delay(self.latency.read).await;
        let guard = self.snapshot.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    async fn replace(&self, fields: Vec<Field<P>>) -> Result<(), StoreError> {
        Self::delay(self.latency.replace).await;
        let mut guard = self.snapshot.write().map_err(|_| StoreError::LockPoisoned)?;
        tracing::debug!(group = %guard.data.group, fields = fields.len(), "replacing field list");
        guard.data.field_list = fields;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::text::TextField;
    use folio_common::GroupData;
    use std::sync::Arc;

    fn envelope() -> GroupEnvelope<TextField> {
        GroupEnvelope::ok(GroupData {
            account_id: 25,
            enable_share_button: Some(false),
            group: "contact".into(),
            field_list: vec![
                Field::new(TextField::new("mobile", "Mobile", "+971"), true, 1),
                Field::new(TextField::new("email", "Email", "a@b.c"), true, 2),
            ],
        })
    }

    #[tokio::test]
    async fn test_read_returns_full_snapshot() {
        let store = MemoryStore::new(envelope(), StoreLatency::NONE);
        let read = store.read().await.unwrap();
        assert_eq!(read, envelope());
    }

    #[tokio::test]
    async fn test_replace_swaps_list_and_keeps_envelope() {
        let store = MemoryStore::new(envelope(), StoreLatency::NONE);
        let fields = vec![Field::new(TextField::new("email", "Email", "x@y.z"), false, 1)];
        store.replace(fields.clone()).await.unwrap();

        let read = store.read().await.unwrap();
        assert_eq!(read.data.field_list, fields);
        assert_eq!(read.data.account_id, 25);
        assert_eq!(read.data.group, "contact");
        assert_eq!(read.data.enable_share_button, Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied_before_resolving() {
        let store = MemoryStore::new(envelope(), StoreLatency::default());
        let start = tokio::time::Instant::now();
        store.read().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(100));
        store.replace(vec![]).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_concurrent_replaces_last_writer_wins() {
        let store = Arc::new(MemoryStore::new(envelope(), StoreLatency::NONE));
        let first = vec![Field::new(TextField::new("mobile", "Mobile", "1"), true, 1)];
        let second = vec![Field::new(TextField::new("mobile", "Mobile", "2"), true, 1)];
        store.replace(first).await.unwrap();
        store.replace(second.clone()).await.unwrap();
        assert_eq!(store.read().await.unwrap().data.field_list, second);
    }
}
