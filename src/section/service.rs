use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};

use folio_common::Payload;

use super::Section;
use crate::collection::EditSession;
use crate::errors::SectionError;
use crate::staleness::{Freshness, Invalidation, Trigger, WatchSummary, watch};

/// A section with its payload type erased, so sections of different
/// payloads can live in one registry and be served over JSON.
#[async_trait]
pub trait SectionService: Send + Sync {
    fn slug(&self) -> &'static str;

    fn flag_name(&self) -> &str;

    /// Display view, shaped for the section.
    async fn view_json(&self) -> Result<Value, SectionError>;

    /// Full stored envelope.
    async fn raw_json(&self) -> Result<Value, SectionError>;

    /// A fresh dashboard snapshot: session plus rendered fields.
    async fn dashboard_json(&self) -> Result<Value, SectionError>;

    /// Commit an edit session received as JSON. Returns the stored list.
    async fn commit_json(&self, session: Value) -> Result<Value, SectionError>;

    fn consume(&self) -> Freshness;

    /// Run a display for this section until `triggers` closes, pushing the
    /// shaped view to `updates` on the initial load and every reload.
    async fn run_display(
        &self,
        poll_interval: Duration,
        bus: broadcast::Receiver<Invalidation>,
        triggers: mpsc::Receiver<Trigger>,
        updates: mpsc::Sender<Value>,
    ) -> WatchSummary;
}

#[async_trait]
impl<P: Payload> SectionService for Section<P> {
    fn slug(&self) -> &'static str {
        Section::slug(self)
    }

    fn flag_name(&self) -> &str {
        self.channel().name()
    }

    async fn view_json(&self) -> Result<Value, SectionError> {
        let records = self.view().await?;
        self.shape(records)
    }

    async fn raw_json(&self) -> Result<Value, SectionError> {
        Ok(serde_json::to_value(self.raw().await?)?)
    }

    async fn dashboard_json(&self) -> Result<Value, SectionError> {
        let dashboard = self.open_dashboard().await?;
        Ok(serde_json::to_value(dashboard.snapshot())?)
    }

    async fn commit_json(&self, session: Value) -> Result<Value, SectionError> {
        let session: EditSession<P> =
            serde_json::from_value(session).map_err(|e| SectionError::InvalidSession(e.to_string()))?;
        let fields = self.commit_against_store(&session).await?;
        Ok(serde_json::to_value(fields)?)
    }

    fn consume(&self) -> Freshness {
        Section::consume(self)
    }

    async fn run_display(
        &self,
        poll_interval: Duration,
        bus: broadcast::Receiver<Invalidation>,
        triggers: mpsc::Receiver<Trigger>,
        updates: mpsc::Sender<Value>,
    ) -> WatchSummary {
        let mut display = self.display().with_updates(updates);
        display.load().await;
        watch(&mut display, poll_interval, bus, triggers).await
    }
}
