use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use folio_common::StoreError;

use super::model::{HubEnvelope, HubUpdate};
use crate::store::StoreLatency;

/// Backend for the profile hub. Real implementation: `MemoryHubStore`.
#[async_trait]
pub trait HubStore: Send + Sync {
    async fn read(&self) -> Result<HubEnvelope, StoreError>;

    /// Overwrite the parts present in `update`.
    async fn update(&self, update: HubUpdate) -> Result<(), StoreError>;
}

/// In-process hub snapshot with simulated latency.
pub struct MemoryHubStore {
    snapshot: RwLock<HubEnvelope>,
    latency: StoreLatency,
}

impl MemoryHubStore {
    pub fn new(envelope: HubEnvelope, latency: StoreLatency) -> Self {
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
impl HubStore for MemoryHubStore {
    async fn read(&self) -> Result<HubEnvelope, StoreError> {
        Self::delay(self.latency.read).await;
        let guard = self.snapshot.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    async fn update(&self, update: HubUpdate) -> Result<(), StoreError> {
        Self::delay(self.latency.replace).await;
        let mut guard = self.snapshot.write().map_err(|_| StoreError::LockPoisoned)?;
        tracing::debug!(
            profile = update.profile.is_some(),
            icons = update.contact_icons.is_some(),
            groups = update.group_list.is_some(),
            "updating profile hub"
        );
        guard.data.apply(update);
        Ok(())
    }
}
