use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_common::FieldId;

use super::HUB_SLUG;
use super::model::{self, HubData, HubUpdate, ModuleGroup, ProfileCard, QuickAction, split_display_name};
use crate::collection::{EditSession, OrderedEditableCollection};
use crate::errors::CollectionError;

/// The profile panel of the hub dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEdit {
    /// Display name, title included.
    pub name: String,
    /// Shown under the name; stored as the profession.
    pub title: String,
    pub description: String,
    pub avatar_url: String,
}

impl ProfileEdit {
    pub fn from_card(card: &ProfileCard) -> Self {
        Self {
            name: card.display_name(),
            title: card.profession.clone(),
            description: card.profile_intro.clone().unwrap_or_default(),
            avatar_url: card.profile_photo_url.clone(),
        }
    }

    /// Apply the attributes that differ from what `card` would show.
    pub fn apply(&self, card: &ProfileCard) -> ProfileCard {
        let shown = Self::from_card(card);
        let mut next = card.clone();
        if self.name != shown.name {
            (next.title, next.fullname) = split_display_name(&self.name);
        }
        if self.title != shown.title {
            next.profession = self.title.clone();
        }
        if self.description != shown.description {
            next.profile_intro = Some(self.description.clone());
        }
        if self.avatar_url != shown.avatar_url {
            next.profile_photo_url = self.avatar_url.clone();
        }
        next
    }
}

/// Pending hub edits. Each absent part is left as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSession {
    #[serde(default = "Uuid::new_v4")]
    pub session_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_actions: Option<EditSession<QuickAction>>,
    /// Section links without the emergency link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<EditSession<ModuleGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileEdit>,
}

impl HubSession {
    pub fn open(
        data: &HubData,
        quick_actions: &OrderedEditableCollection<QuickAction>,
        modules: &OrderedEditableCollection<ModuleGroup>,
    ) -> Self {
        let (regular, emergency) = data.split_emergency();
        Self {
            session_id: Uuid::new_v4(),
            quick_actions: Some(quick_actions.to_edit_session(&data.contact_icons)),
            modules: Some(modules.to_edit_session(&regular)),
            emergency_enabled: Some(emergency.is_none_or(|e| e.visible)),
            profile: Some(ProfileEdit::from_card(&data.profile)),
        }
    }

    /// Fold the session over `original`.
    ///
    /// Modules are renumbered `1..=N` in session order. The emergency link
    /// is appended after them with order `N + 1` and the session's toggle.
    pub fn fold(
        &self,
        original: &HubData,
        quick_actions: &OrderedEditableCollection<QuickAction>,
        modules: &OrderedEditableCollection<ModuleGroup>,
    ) -> Result<HubUpdate, CollectionError> {
        let contact_icons = self
            .quick_actions
            .as_ref()
            .map(|session| quick_actions.from_edit_session(&original.contact_icons, session))
            .transpose()?;

        let group_list = if self.modules.is_some() || self.emergency_enabled.is_some() {
            let (regular, emergency) = original.split_emergency();
            let mut groups = match &self.modules {
                Some(session) => modules.from_edit_session(&regular, session)?,
                None => regular,
            };
            if let Some(mut emergency) = emergency {
                emergency.visible = self.emergency_enabled.unwrap_or(emergency.visible);
                emergency.order = groups.iter().map(|g| g.order).max().unwrap_or(0) + 1;
                groups.push(emergency);
            }
            Some(groups)
        } else {
            None
        };

        Ok(HubUpdate {
            profile: self.profile.as_ref().map(|edit| edit.apply(&original.profile)),
            contact_icons,
            group_list,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickActionTile {
    pub id: FieldId,
    pub label: String,
    pub description: String,
    pub icon: String,
    pub icon_bg_color: &'static str,
    pub icon_color: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTile {
    pub id: FieldId,
    pub label: String,
    pub description: String,
    pub icon: String,
    pub icon_color: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmergencyToggle {
    pub enabled: bool,
}

/// What the hub dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSnapshot {
    #[serde(rename = "accountID")]
    pub account_id: i64,
    pub group: &'static str,
    pub profile: ProfileEdit,
    pub quick_actions: Vec<QuickActionTile>,
    pub modules: Vec<ModuleTile>,
    pub emergency: EmergencyToggle,
    pub session: HubSession,
}

impl HubSnapshot {
    pub fn new(data: &HubData, session: HubSession) -> Self {
        let quick_actions = session
            .quick_actions
            .as_ref()
            .map(|s| s.current())
            .unwrap_or_default()
            .into_iter()
            .map(|field| {
                let tile = model::QUICK_ACTION_TILES.lookup(&field.payload.field);
                let (_, icon) = model::resolve_icon(&field.payload.icon, tile.icon);
                QuickActionTile {
                    id: field.id,
                    label: field.payload.label,
                    description: field.description,
                    icon,
                    icon_bg_color: tile.icon_bg_color,
                    icon_color: field.payload.icon_color.unwrap_or_else(|| tile.icon_color.to_string()),
                    enabled: field.enabled,
                }
            })
            .collect();

        let fallback = model::MODULES.fallback();
        let modules = session
            .modules
            .as_ref()
            .map(|s| s.current())
            .unwrap_or_default()
            .into_iter()
            .map(|field| ModuleTile {
                id: field.id,
                label: field.payload.label,
                description: field.description,
                icon: field.payload.icon.unwrap_or_else(|| fallback.icon.to_string()),
                icon_color: field.payload.icon_color.unwrap_or_else(|| fallback.icon_color.to_string()),
                enabled: field.enabled,
            })
            .collect();

        Self {
            account_id: data.account.account_id,
            group: HUB_SLUG,
            profile: session
                .profile
                .clone()
                .unwrap_or_else(|| ProfileEdit::from_card(&data.profile)),
            quick_actions,
            modules,
            emergency: EmergencyToggle {
                enabled: session.emergency_enabled.unwrap_or(true),
            },
            session,
        }
    }
}
