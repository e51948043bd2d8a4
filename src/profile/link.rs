use serde::{Deserialize, Serialize};

use folio_common::{FieldId, Payload};

use crate::collection::{Presentation, PresentationTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkField {
    #[serde(rename = "linksID")]
    pub links_id: i64,
    pub name: String,
    pub description: String,
    pub link_text: String,
    pub link_url: String,
}

/// `label` edits the link's display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

/// Keyword groups checked against the link's name and URL, first hit wins.
const KEYWORDS: &[(&str, &[&str])] = &[
    ("website", &["website", "official", "company", "home"]),
    ("support", &["support", "help", "customer"]),
    ("linkedin", &["linkedin"]),
    ("facebook", &["facebook"]),
    ("instagram", &["instagram"]),
    ("twitter", &["twitter", "x.com"]),
    ("github", &["github"]),
    ("youtube", &["youtube"]),
    ("portfolio", &["portfolio"]),
    ("blog", &["blog"]),
    ("contact", &["contact", "email"]),
    ("shop", &["shop", "store", "buy"]),
    ("docs", &["docs", "documentation"]),
];

impl LinkField {
    /// Keyword group this link falls into, or `"link"` when none matches.
    pub fn kind(&self) -> &'static str {
        let haystack = format!("{} {}", self.name, self.link_url).to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| haystack.contains(w)))
            .map(|(kind, _)| *kind)
            .unwrap_or("link")
    }
}

impl Payload for LinkField {
    type Patch = LinkPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(format!("link-{}", self.links_id))
    }

    fn presentation_key(&self) -> &str {
        self.kind()
    }

    fn apply(&self, patch: &LinkPatch) -> Self {
        Self {
            links_id: self.links_id,
            name: patch.label.clone().unwrap_or_else(|| self.name.clone()),
            description: patch.description.clone().unwrap_or_else(|| self.description.clone()),
            link_text: patch.link_text.clone().unwrap_or_else(|| self.link_text.clone()),
            link_url: patch.link_url.clone().unwrap_or_else(|| self.link_url.clone()),
        }
    }

    fn merge_patch(pending: &mut LinkPatch, update: LinkPatch) {
        let LinkPatch {
            label,
            description,
            link_text,
            link_url,
        } = update;
        pending.label = label.or(pending.label.take());
        pending.description = description.or(pending.description.take());
        pending.link_text = link_text.or(pending.link_text.take());
        pending.link_url = link_url.or(pending.link_url.take());
    }

    fn describe(&self) -> String {
        self.link_url.clone()
    }
}

const fn link(icon: &'static str) -> Presentation {
    Presentation::new(icon, "#617289", "#DBEAFE")
}

pub static LINKS: PresentationTable = PresentationTable::new(
    &[
        ("website", link("language")),
        ("support", link("support_agent")),
        ("linkedin", link("business")),
        ("facebook", link("facebook")),
        ("instagram", link("photo_camera")),
        ("twitter", link("alternate_email")),
        ("github", link("code")),
        ("youtube", link("play_circle")),
        ("portfolio", link("work")),
        ("blog", link("article")),
        ("contact", link("mail")),
        ("shop", link("shopping_cart")),
        ("docs", link("description")),
    ],
    link("link"),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn link_named(name: &str, url: &str) -> LinkField {
        LinkField {
            links_id: 100,
            name: name.into(),
            description: "d".into(),
            link_text: "Open".into(),
            link_url: url.into(),
        }
    }

    #[test]
    fn test_kind_from_name_or_url() {
        assert_eq!(link_named("Official Website", "https://a.test").kind(), "website");
        assert_eq!(link_named("Code", "https://github.com/me").kind(), "github");
        assert_eq!(link_named("Misc", "https://a.test").kind(), "link");
    }

    #[test]
    fn test_presentation_uses_kind() {
        let l = link_named("Customer Support", "https://support.test");
        assert_eq!(LINKS.lookup(l.presentation_key()).icon, "support_agent");
        assert_eq!(LINKS.lookup(link_named("x", "y").presentation_key()).icon, "link");
    }

    #[test]
    fn test_label_patch_renames_without_changing_identity() {
        let l = link_named("Old", "https://a.test");
        let renamed = l.apply(&LinkPatch {
            label: Some("New".into()),
            ..Default::default()
        });
        assert_eq!(renamed.name, "New");
        assert_eq!(renamed.identity().as_str(), "link-100");
    }

    #[test]
    fn test_merge_patch_folds_attributes() {
        let mut pending = LinkPatch {
            label: Some("A".into()),
            ..Default::default()
        };
        LinkField::merge_patch(
            &mut pending,
            LinkPatch {
                link_url: Some("https://b.test".into()),
                ..Default::default()
            },
        );
        assert_eq!(pending.label.as_deref(), Some("A"));
        assert_eq!(pending.link_url.as_deref(), Some("https://b.test"));
    }
}
