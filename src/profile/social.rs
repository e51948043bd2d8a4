//! Social media accounts, displayed grouped by category.

use serde::{Deserialize, Serialize};

use folio_common::{FieldId, Payload};

use crate::collection::{Presentation, PresentationTable, ViewRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaField {
    #[serde(rename = "socialMediaID")]
    pub social_media_id: i64,
    pub platform: String,
    pub platform_name: String,
    pub url: String,
    pub category: String,
}

/// Only the profile URL is editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Payload for SocialMediaField {
    type Patch = SocialMediaPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(format!("socialmedia-{}", self.social_media_id))
    }

    fn presentation_key(&self) -> &str {
        &self.platform
    }

    fn apply(&self, patch: &SocialMediaPatch) -> Self {
        Self {
            url: patch.url.clone().unwrap_or_else(|| self.url.clone()),
            ..self.clone()
        }
    }

    fn merge_patch(pending: &mut SocialMediaPatch, update: SocialMediaPatch) {
        if update.url.is_some() {
            pending.url = update.url;
        }
    }

    fn describe(&self) -> String {
        match self.platform.as_str() {
            "twitter" => "Your X / Twitter profile URL".to_string(),
            "telegram" => "Your Telegram channel URL".to_string(),
            "youtube" => "Your YouTube channel URL".to_string(),
            "linkedin" | "instagram" | "facebook" | "snapchat" | "tiktok" | "github" | "medium"
            | "reddit" => format!("Your {} profile URL", self.platform_name),
            _ => format!("Your {} network profile URL", self.category),
        }
    }
}

pub static SOCIAL: PresentationTable = PresentationTable::new(
    &[
        ("linkedin", Presentation::new("business", "#0077B5", "rgba(0, 119, 181, 0.1)")),
        ("twitter", Presentation::new("close", "#000000", "rgba(0, 0, 0, 0.05)")),
        ("instagram", Presentation::new("photo_camera", "#E4405F", "rgba(236, 72, 153, 0.1)")),
        ("facebook", Presentation::new("facebook", "#1877F2", "rgba(37, 99, 235, 0.1)")),
        ("snapchat", Presentation::new("photo_camera", "#000000", "#FFFC00")),
        ("telegram", Presentation::new("send", "#0088CC", "rgba(96, 165, 250, 0.1)")),
    ],
    Presentation::new("share", "#617289", "#F3F4F6"),
);

/// Display order and labels of the known categories.
const CATEGORIES: &[(&str, &str, &str)] = &[
    ("professional", "Professional Networks", "laptop"),
    ("personal", "Personal Channels", "sentiment_satisfied"),
    ("community", "Community Platforms", "forum"),
];

const CATEGORY_COLOR: &str = "#136DEC";

/// One category heading with its visible accounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialGroup {
    pub category: &'static str,
    pub category_label: &'static str,
    pub category_icon: &'static str,
    pub category_color: &'static str,
    pub items: Vec<ViewRecord<SocialMediaField>>,
}

/// Split view records into the known categories in their fixed order.
///
/// Items keep their relative order from `records`. Empty categories and
/// records with an unknown category are left out.
pub fn group_by_category(records: Vec<ViewRecord<SocialMediaField>>) -> Vec<SocialGroup> {
    CATEGORIES
        .iter()
        .filter_map(|&(category, label, icon)| {
            let items: Vec<_> = records
                .iter()
                .filter(|r| r.payload.category == category)
                .cloned()
                .collect();
            (!items.is_empty()).then_some(SocialGroup {
                category,
                category_label: label,
                category_icon: icon,
                category_color: CATEGORY_COLOR,
                items,
            })
        })
        .collect()
}

/// Display shape of the social section: category groups instead of a flat list.
pub fn grouped_view(records: Vec<ViewRecord<SocialMediaField>>) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(group_by_category(records))
}
