use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use folio_common::Payload;

use super::Section;
use crate::collection::ViewRecord;
use crate::staleness::{Freshness, StaleConsumer, StalenessChannel, Trigger};

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState<P> {
    Loading,
    Ready(Vec<ViewRecord<P>>),
    /// The last fetch failed. Nothing is retried until the next stale flag.
    Unavailable(String),
}

/// Read context for one section: a cached view that re-reads the store
/// only when its staleness flag was raised.
///
/// Every view subscribes its own flag to the section channel, so any
/// number of views of one section each reload once per commit.
pub struct DisplayView<'a, P: Payload> {
    section: &'a Section<P>,
    flag: Arc<StalenessChannel>,
    state: DisplayState<P>,
    updates: Option<mpsc::Sender<Value>>,
    loads: u64,
}

impl<'a, P: Payload> DisplayView<'a, P> {
    pub fn new(section: &'a Section<P>) -> Self {
        Self {
            section,
            flag: section.channel.subscribe(),
            state: DisplayState::Loading,
            updates: None,
            loads: 0,
        }
    }

    /// Push the shaped view to `tx` after every successful load.
    pub fn with_updates(mut self, tx: mpsc::Sender<Value>) -> Self {
        self.updates = Some(tx);
        self
    }

    pub fn state(&self) -> &DisplayState<P> {
        &self.state
    }

    /// Number of store reads performed so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub async fn load(&mut self) {
        self.loads += 1;
        match self.section.view().await {
            Ok(records) => {
                self.publish(&records).await;
                self.state = DisplayState::Ready(records);
            }
            Err(e) => {
                tracing::error!(group = self.section.slug(), error = %e, "failed to load section view");
                self.state = DisplayState::Unavailable(e.to_string());
            }
        }
    }

    async fn publish(&self, records: &[ViewRecord<P>]) {
        let Some(tx) = &self.updates else {
            return;
        };
        match self.section.shape(records.to_vec()) {
            Ok(value) => {
                if tx.send(value).await.is_err() {
                    tracing::debug!(group = self.section.slug(), "display update receiver dropped");
                }
            }
            Err(e) => tracing::error!(group = self.section.slug(), error = %e, "failed to shape section view"),
        }
    }
}

#[async_trait]
impl<P: Payload> StaleConsumer for DisplayView<'_, P> {
    fn group(&self) -> &str {
        self.section.slug()
    }

    async fn on_trigger(&mut self, trigger: Trigger) -> Freshness {
        let freshness = self.flag.consume();
        if freshness.is_stale() {
            tracing::info!(group = self.section.slug(), ?trigger, "section is stale, reloading");
            self.load().await;
        }
        freshness
    }
}
