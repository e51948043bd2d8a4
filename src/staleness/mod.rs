//! Cross-view staleness notification.
//!
//! A dashboard commit raises the section's named flag (`channel`) and
//! publishes an [`Invalidation`] on the bus (`bus`). Each display subscribes
//! its own flag to the section's channel and checks it from several
//! independent triggers (`watcher`). Within one display the first trigger
//! to see the flag raised clears it and re-reads; later triggers are no-ops.

pub mod bus;
pub mod channel;
pub mod watcher;

pub use bus::{Invalidation, InvalidationBus};
pub use channel::{ChannelState, Freshness, StaleFlags, StalenessChannel, flag_name};
pub use watcher::{StaleConsumer, Trigger, WatchSummary, watch};
