use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use serde::Serialize;

/// Result of a [`StalenessChannel::consume`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Fresh,
    Stale,
}

impl Freshness {
    pub fn is_stale(self) -> bool {
        matches!(self, Freshness::Stale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    Idle,
    Flagged,
}

/// Named staleness flag for one section.
///
/// `commit` raises the flag; `consume` clears it and reports whether it was
/// raised. Only the first consumer after a commit observes `Stale`.
///
/// Each display that needs its own read-then-clear takes a [`subscribe`]d
/// child. A commit on the parent raises every live child as well, so two
/// displays of one section never race for a single flag.
///
/// [`subscribe`]: StalenessChannel::subscribe
#[derive(Debug)]
pub struct StalenessChannel {
    name: String,
    flagged: AtomicBool,
    subscribers: Mutex<Vec<Weak<StalenessChannel>>>,
}

impl StalenessChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flagged: AtomicBool::new(false),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a child flag with the same name. It starts idle and is
    /// dropped from the fan-out once the returned handle is dropped.
    pub fn subscribe(&self) -> Arc<StalenessChannel> {
        let child = Arc::new(StalenessChannel::new(self.name.clone()));
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&child));
        child
    }

    /// Live subscribers. Dead handles are pruned on the next commit.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn commit(&self) {
        self.flagged.store(true, Ordering::SeqCst);
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|weak| match weak.upgrade() {
            Some(child) => {
                child.commit();
                true
            }
            None => false,
        });
    }

    pub fn consume(&self) -> Freshness {
        if self.flagged.swap(false, Ordering::SeqCst) {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }

    pub fn state(&self) -> ChannelState {
        if self.flagged.load(Ordering::SeqCst) {
            ChannelState::Flagged
        } else {
            ChannelState::Idle
        }
    }
}

/// Flag name for a section slug, e.g. `"contact-data-updated"`.
pub fn flag_name(slug: &str) -> String {
    format!("{}-data-updated", slug)
}

/// Process-wide registry of staleness flags keyed by name.
#[derive(Debug, Default)]
pub struct StaleFlags {
    channels: Mutex<HashMap<String, Arc<StalenessChannel>>>,
}

impl StaleFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the channel for `name`, creating it in the idle state if needed.
    pub fn channel(&self, name: &str) -> Arc<StalenessChannel> {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(StalenessChannel::new(name)))
            .clone()
    }

    pub fn set(&self, name: &str) {
        self.channel(name).commit();
    }

    /// Read-then-clear. Returns true if the flag was set.
    pub fn take(&self, name: &str) -> bool {
        self.channel(name).consume().is_stale()
    }

    pub fn names(&self) -> Vec<String> {
        let channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = channels.keys().cloned().collect();
        names.sort();
        names
    }
}
