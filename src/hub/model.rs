//! Stored shape of the profile hub: identity card, contact quick actions
//! and the list of section links.

use serde::{Deserialize, Serialize};

use folio_common::{Field, FieldId, Payload};

use crate::collection::{Presentation, PresentationTable};

/// Group name of the emergency link. It is kept out of the module ordering
/// and carries its own visibility toggle.
pub const EMERGENCY_GROUP: &str = "emergency";

/// One contact shortcut on the profile card (call, WhatsApp, email, map).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    pub field: String,
    pub label: String,
    pub value: String,
    /// Font icon (`fa-...`), image URL, or empty for the built-in icon.
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickActionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Payload for QuickAction {
    type Patch = QuickActionPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(self.field.clone())
    }

    fn presentation_key(&self) -> &str {
        &self.field
    }

    fn apply(&self, patch: &QuickActionPatch) -> Self {
        Self {
            value: patch.value.clone().unwrap_or_else(|| self.value.clone()),
            ..self.clone()
        }
    }

    fn merge_patch(pending: &mut QuickActionPatch, update: QuickActionPatch) {
        if update.value.is_some() {
            pending.value = update.value;
        }
    }

    fn describe(&self) -> String {
        format!("{} button on your profile", self.label)
    }
}

/// Link from the hub to one profile section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleGroup {
    pub group: String,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGroupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl Payload for ModuleGroup {
    type Patch = ModuleGroupPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(self.group.clone())
    }

    fn presentation_key(&self) -> &str {
        &self.group
    }

    fn apply(&self, patch: &ModuleGroupPatch) -> Self {
        Self {
            label: patch.label.clone().unwrap_or_else(|| self.label.clone()),
            subtitle: patch.subtitle.clone().or_else(|| self.subtitle.clone()),
            ..self.clone()
        }
    }

    fn merge_patch(pending: &mut ModuleGroupPatch, update: ModuleGroupPatch) {
        if update.label.is_some() {
            pending.label = update.label;
        }
        if update.subtitle.is_some() {
            pending.subtitle = update.subtitle;
        }
    }

    fn describe(&self) -> String {
        self.subtitle.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "accountID")]
    pub account_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "personID")]
    pub person_id: i64,
    pub name: String,
    pub account_type: String,
    pub account_expiry: String,
    pub is_paid: String,
    pub subscription_code: String,
    pub status: String,
    pub status_message: String,
}

/// Identity shown at the top of the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCard {
    pub profile_photo_url: String,
    #[serde(default)]
    pub title: String,
    pub fullname: String,
    pub profession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_intro: Option<String>,
    pub data_ref_id: String,
    pub share_link: String,
    pub enable_share_button: bool,
}

impl ProfileCard {
    /// `"<title> <fullname>"`, or just the full name when there is no title.
    pub fn display_name(&self) -> String {
        if self.title.is_empty() {
            self.fullname.clone()
        } else {
            format!("{} {}", self.title, self.fullname)
        }
    }
}

const TITLES: [&str; 5] = ["dr", "mr", "mrs", "ms", "prof"];

/// Split an edited display name back into `(title, fullname)`.
///
/// The first word is a title when more words follow and it ends in a dot
/// or is one of the common honorifics. Otherwise the title is cleared.
pub fn split_display_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    let mut words = trimmed.split_whitespace();
    let first = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    let honorific = TITLES.contains(&first.to_ascii_lowercase().as_str());
    if !rest.is_empty() && (first.ends_with('.') || honorific) {
        (first.to_string(), rest.join(" "))
    } else {
        (String::new(), trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubData {
    pub enable_account_selection: bool,
    pub account: Account,
    pub profile: ProfileCard,
    pub contact_icons: Vec<Field<QuickAction>>,
    pub group_list: Vec<Field<ModuleGroup>>,
}

impl HubData {
    /// Split the group list into section links and the emergency link.
    pub fn split_emergency(&self) -> (Vec<Field<ModuleGroup>>, Option<Field<ModuleGroup>>) {
        let (emergency, modules): (Vec<_>, Vec<_>) = self
            .group_list
            .iter()
            .cloned()
            .partition(|g| g.payload.group == EMERGENCY_GROUP);
        (modules, emergency.into_iter().next())
    }

    /// Overwrite the parts present in `update`.
    pub fn apply(&mut self, update: HubUpdate) {
        if let Some(profile) = update.profile {
            self.profile = profile;
        }
        if let Some(icons) = update.contact_icons {
            self.contact_icons = icons;
        }
        if let Some(groups) = update.group_list {
            self.group_list = groups;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubEnvelope {
    pub is_success: bool,
    pub status_code: u16,
    pub status_message: Option<String>,
    pub data: HubData,
}

impl HubEnvelope {
    pub fn ok(data: HubData) -> Self {
        Self {
            is_success: true,
            status_code: 200,
            status_message: None,
            data,
        }
    }
}

/// Partial hub write. Absent parts are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_icons: Option<Vec<Field<QuickAction>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_list: Option<Vec<Field<ModuleGroup>>>,
}

/// How a contact icon is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Font,
    Image,
    Material,
}

fn is_web_url(s: &str) -> bool {
    s.strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty())
}

/// Resolve a stored icon: font icons and web images are used as given,
/// anything else falls back to the built-in Material icon.
pub fn resolve_icon(icon: &str, material: &str) -> (IconKind, String) {
    if icon.starts_with("fa-") {
        (IconKind::Font, icon.to_string())
    } else if is_web_url(icon) {
        (IconKind::Image, icon.to_string())
    } else {
        (IconKind::Material, material.to_string())
    }
}

/// Contact icons as drawn on the profile page.
pub static PROFILE_ICONS: PresentationTable = PresentationTable::new(
    &[
        ("call", Presentation::new("phone", "#2563EB", "#EFF6FF")),
        ("email", Presentation::new("email", "#2563EB", "#EFF6FF")),
        ("whatsapp", Presentation::new("chat", "#059669", "#ECFDF5")),
        ("location", Presentation::new("location_on", "#2563EB", "#EFF6FF")),
    ],
    Presentation::new("help_outline", "#2563EB", "#EFF6FF"),
);

/// Quick action tiles in the hub dashboard.
pub static QUICK_ACTION_TILES: PresentationTable = PresentationTable::new(
    &[
        ("call", Presentation::new("call", "#2563EB", "#FEF2F2")),
        ("email", Presentation::new("mail", "#9333EA", "#FAF5FF")),
        ("whatsapp", Presentation::new("chat_bubble", "#059669", "#FFFBEB")),
        ("location", Presentation::new("location_on", "#DC2626", "#FEF2F2")),
    ],
    Presentation::new("help_outline", "#136dec", "#F3F4F6"),
);

/// Section links carry their own icon; this is the fallback.
pub static MODULES: PresentationTable =
    PresentationTable::new(&[], Presentation::new("folder", "#136dec", "#F8FAFC"));
