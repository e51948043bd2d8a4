use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{HUB_SLUG, HubView, ProfileHub};
use crate::staleness::{Freshness, StaleConsumer, StalenessChannel, Trigger};

#[derive(Debug, Clone, PartialEq)]
pub enum HubDisplayState {
    Loading,
    Ready(Box<HubView>),
    Unavailable(String),
}

/// Cached profile page. Reloads once per hub commit, like a section display.
pub struct HubDisplay<'a> {
    hub: &'a ProfileHub,
    flag: Arc<StalenessChannel>,
    state: HubDisplayState,
    updates: Option<mpsc::Sender<Value>>,
    loads: u64,
}

impl<'a> HubDisplay<'a> {
    pub fn new(hub: &'a ProfileHub) -> Self {
        Self {
            hub,
            flag: hub.channel.subscribe(),
            state: HubDisplayState::Loading,
            updates: None,
            loads: 0,
        }
    }

    pub fn with_updates(mut self, tx: mpsc::Sender<Value>) -> Self {
        self.updates = Some(tx);
        self
    }

    pub fn state(&self) -> &HubDisplayState {
        &self.state
    }

    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub async fn load(&mut self) {
        self.loads += 1;
        match self.hub.view().await {
            Ok(view) => {
                self.publish(&view).await;
                self.state = HubDisplayState::Ready(Box::new(view));
            }
            Err(e) => {
                tracing::error!(group = HUB_SLUG, error = %e, "failed to load profile hub");
                self.state = HubDisplayState::Unavailable(e.to_string());
            }
        }
    }

    async fn publish(&self, view: &HubView) {
        let Some(tx) = &self.updates else {
            return;
        };
        match serde_json::to_value(view) {
            Ok(value) => {
                if tx.send(value).await.is_err() {
                    tracing::debug!(group = HUB_SLUG, "display update receiver dropped");
                }
            }
            Err(e) => tracing::error!(group = HUB_SLUG, error = %e, "failed to encode profile hub"),
        }
    }
}

#[async_trait]
impl StaleConsumer for HubDisplay<'_> {
    fn group(&self) -> &str {
        HUB_SLUG
    }

    async fn on_trigger(&mut self, trigger: Trigger) -> Freshness {
        let freshness = self.flag.consume();
        if freshness.is_stale() {
            tracing::info!(group = HUB_SLUG, ?trigger, "profile hub is stale, reloading");
            self.load().await;
        }
        freshness
    }
}
