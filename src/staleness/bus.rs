use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Published after a section's field list was replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invalidation {
    pub group: String,
    pub flag: String,
    pub session_id: Uuid,
    pub at: DateTime<Utc>,
}

impl Invalidation {
    pub fn new(group: impl Into<String>, flag: impl Into<String>, session_id: Uuid) -> Self {
        Self {
            group: group.into(),
            flag: flag.into(),
            session_id,
            at: Utc::now(),
        }
    }
}

/// Fan-out of [`Invalidation`]s to every display consumer and WebSocket.
#[derive(Debug, Clone)]
pub struct InvalidationBus {
    tx: broadcast::Sender<Invalidation>,
}

impl InvalidationBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Returns silently even if nobody is subscribed.
    pub fn publish(&self, invalidation: Invalidation) {
        let group = invalidation.group.clone();
        match self.tx.send(invalidation) {
            Ok(receivers) => tracing::debug!(%group, receivers, "published invalidation"),
            Err(_) => tracing::debug!(%group, "no invalidation subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
