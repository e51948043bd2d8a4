//! Profile hub: the landing page that links every section.
//!
//! The hub stores an identity card, contact quick actions and the section
//! link list in one envelope. Quick actions and section links are both
//! ordered editable collections; the emergency link is split off before
//! the dashboard sees the list and re-appended on commit with its own
//! toggle, so it never takes part in the module ordering.
//!
//! | Module    | Responsibility                                    |
//! |-----------|---------------------------------------------------|
//! | `model`   | stored shape, icon resolution, name splitting     |
//! | `store`   | `HubStore` and its in-memory implementation       |
//! | `session` | dashboard session and its fold back into the hub  |
//! | `display` | cached hub view driven by the staleness watcher   |
//! | `seed`    | demo hub                                          |

pub mod display;
pub mod model;
pub mod seed;
pub mod session;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};

use crate::collection::{OrderedEditableCollection, UnknownFieldPolicy};
use crate::errors::SectionError;
use crate::section::SectionService;
use crate::staleness::{
    Freshness, Invalidation, InvalidationBus, StaleFlags, StalenessChannel, Trigger, WatchSummary, flag_name, watch,
};

pub use display::{HubDisplay, HubDisplayState};
pub use model::{EMERGENCY_GROUP, HubData, HubEnvelope, IconKind, ModuleGroup, ProfileCard, QuickAction};
pub use session::{HubSession, HubSnapshot, ProfileEdit};
pub use store::{HubStore, MemoryHubStore};

/// Slug the hub is registered and flagged under.
pub const HUB_SLUG: &str = "profile";

/// Profile card plus the name as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    #[serde(flatten)]
    pub card: ProfileCard,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactIconView {
    pub field: String,
    pub label: String,
    pub value: String,
    pub icon_type: IconKind,
    pub resolved_icon: String,
    pub icon_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLink {
    pub group: String,
    pub label: String,
    pub value: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub icon_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub route: String,
}

/// What the profile page renders: visible icons and links only, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubView {
    pub profile: ProfileSummary,
    pub contact_icons: Vec<ContactIconView>,
    pub groups: Vec<GroupLink>,
}

pub struct ProfileHub {
    store: Arc<dyn HubStore>,
    quick_actions: OrderedEditableCollection<QuickAction>,
    modules: OrderedEditableCollection<ModuleGroup>,
    channel: Arc<StalenessChannel>,
    bus: InvalidationBus,
}

impl ProfileHub {
    pub fn new(store: Arc<dyn HubStore>, policy: UnknownFieldPolicy, flags: &StaleFlags, bus: InvalidationBus) -> Self {
        Self {
            store,
            quick_actions: OrderedEditableCollection::new(&model::PROFILE_ICONS, policy),
            modules: OrderedEditableCollection::new(&model::MODULES, policy),
            channel: flags.channel(&flag_name(HUB_SLUG)),
            bus,
        }
    }

    pub fn channel(&self) -> &StalenessChannel {
        &self.channel
    }

    pub async fn raw(&self) -> Result<HubEnvelope, SectionError> {
        Ok(self.store.read().await?)
    }

    pub async fn view(&self) -> Result<HubView, SectionError> {
        let envelope = self.store.read().await?;
        Ok(self.to_view(&envelope.data))
    }

    fn to_view(&self, data: &HubData) -> HubView {
        let contact_icons = self
            .quick_actions
            .to_view(&data.contact_icons)
            .into_iter()
            .map(|record| {
                let action = record.payload;
                let (icon_type, resolved_icon) = model::resolve_icon(&action.icon, record.presentation.icon);
                ContactIconView {
                    icon_type,
                    resolved_icon,
                    icon_color: action
                        .icon_color
                        .unwrap_or_else(|| record.presentation.icon_color.to_string()),
                    field: action.field,
                    label: action.label,
                    value: action.value,
                }
            })
            .collect();

        let groups = self
            .modules
            .to_view(&data.group_list)
            .into_iter()
            .map(|record| {
                let group = record.payload;
                GroupLink {
                    route: format!("/profile/{}", group.group),
                    icon: group.icon.unwrap_or_else(|| record.presentation.icon.to_string()),
                    icon_color: group
                        .icon_color
                        .unwrap_or_else(|| record.presentation.icon_color.to_string()),
                    group: group.group,
                    label: group.label,
                    value: group.value,
                    color: group.color,
                    subtitle: group.subtitle,
                }
            })
            .collect();

        HubView {
            profile: ProfileSummary {
                display_name: data.profile.display_name(),
                card: data.profile.clone(),
            },
            contact_icons,
            groups,
        }
    }

    /// Seed a dashboard session from the stored hub.
    pub async fn open_dashboard(&self) -> Result<HubSnapshot, SectionError> {
        let envelope = self.store.read().await?;
        let session = HubSession::open(&envelope.data, &self.quick_actions, &self.modules);
        tracing::info!(group = HUB_SLUG, session = %session.session_id, "opened hub dashboard");
        Ok(HubSnapshot::new(&envelope.data, session))
    }

    /// Fold `session` over `original`, write the result, then raise the
    /// flag and publish an invalidation. Nothing is signalled on failure.
    pub async fn commit(&self, original: &HubData, session: &HubSession) -> Result<HubData, SectionError> {
        let update = session.fold(original, &self.quick_actions, &self.modules)?;
        self.store.update(update.clone()).await?;

        let mut committed = original.clone();
        committed.apply(update);

        self.channel.commit();
        self.bus
            .publish(Invalidation::new(HUB_SLUG, self.channel.name(), session.session_id));
        tracing::info!(
            group = HUB_SLUG,
            session = %session.session_id,
            modules = committed.group_list.len(),
            "committed hub session"
        );
        Ok(committed)
    }

    pub async fn commit_against_store(&self, session: &HubSession) -> Result<HubData, SectionError> {
        let envelope = self.store.read().await?;
        self.commit(&envelope.data, session).await
    }

    pub fn consume(&self) -> Freshness {
        self.channel.consume()
    }

    pub fn display(&self) -> HubDisplay<'_> {
        HubDisplay::new(self)
    }
}

#[async_trait]
impl SectionService for ProfileHub {
    fn slug(&self) -> &'static str {
        HUB_SLUG
    }

    fn flag_name(&self) -> &str {
        self.channel.name()
    }

    async fn view_json(&self) -> Result<Value, SectionError> {
        Ok(serde_json::to_value(self.view().await?)?)
    }

    async fn raw_json(&self) -> Result<Value, SectionError> {
        Ok(serde_json::to_value(self.raw().await?)?)
    }

    async fn dashboard_json(&self) -> Result<Value, SectionError> {
        Ok(serde_json::to_value(self.open_dashboard().await?)?)
    }

    async fn commit_json(&self, session: Value) -> Result<Value, SectionError> {
        let session: HubSession =
            serde_json::from_value(session).map_err(|e| SectionError::InvalidSession(e.to_string()))?;
        let data = self.commit_against_store(&session).await?;
        Ok(serde_json::to_value(data)?)
    }

    fn consume(&self) -> Freshness {
        ProfileHub::consume(self)
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

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::store::StoreLatency;

    pub fn hub(policy: UnknownFieldPolicy, bus: InvalidationBus) -> ProfileHub {
        ProfileHub::new(
            Arc::new(MemoryHubStore::new(seed::hub(25), StoreLatency::NONE)),
            policy,
            &StaleFlags::new(),
            bus,
        )
    }
}
