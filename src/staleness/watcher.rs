use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;

use super::bus::Invalidation;
use super::channel::Freshness;

/// Why a display consumer is checking its staleness flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Recurring poll while the display is mounted.
    Tick,
    /// The display became visible again.
    Visibility,
    /// The display regained input focus.
    Focus,
    /// An invalidation for this section arrived on the bus.
    Invalidated,
}

/// A display that re-reads its section when its staleness flag is set.
#[async_trait]
pub trait StaleConsumer: Send {
    /// Section slug this consumer displays.
    fn group(&self) -> &str;

    /// Consume the staleness flag and reload if it was set.
    async fn on_trigger(&mut self, trigger: Trigger) -> Freshness;
}

/// Counters returned when a watch loop ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    pub triggers: u64,
    pub reloads: u64,
}

/// Drive `consumer` from every trigger source until the display unmounts
/// (the `triggers` sender is dropped).
///
/// Sources are independent and may all fire for one commit. The consumer's
/// flag makes the first one win; the rest see `Fresh` and no-op. A closed
/// bus disables only the bus source, polling continues.
pub async fn watch<C: StaleConsumer>(
    consumer: &mut C,
    poll_interval: Duration,
    mut bus: broadcast::Receiver<Invalidation>,
    mut triggers: mpsc::Receiver<Trigger>,
) -> WatchSummary {
    let group = consumer.group().to_string();
    let mut interval = tokio::time::interval(poll_interval.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut bus_open = true;
    let mut summary = WatchSummary::default();

    loop {
        let trigger = tokio::select! {
            _ = interval.tick() => Trigger::Tick,

            result = bus.recv(), if bus_open => {
                match result {
                    Ok(inv) if inv.group == group => Trigger::Invalidated,
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(%group, skipped, "invalidation bus lagged");
                        Trigger::Invalidated
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        bus_open = false;
                        continue;
                    }
                }
            }

            external = triggers.recv() => {
                match external {
                    Some(trigger) => trigger,
                    None => break,
                }
            }
        };

        summary.triggers += 1;
        if consumer.on_trigger(trigger).await.is_stale() {
            summary.reloads += 1;
        } else {
            tracing::trace!(%group, ?trigger, "flag idle");
        }
    }

    tracing::debug!(%group, triggers = summary.triggers, reloads = summary.reloads, "display watcher stopped");
    summary
}
