use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Stable identity of a field within one section's list.
///
/// Derived from the payload's identity key (a field name such as `"mobile"`,
/// or a prefixed record id such as `"document-12"`), never from position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Domain-specific content of a field.
///
/// A payload owns its identity key and knows how to layer a pending edit
/// (`Patch`) over itself. Patches never carry the identity key, so applying
/// one cannot change [`Payload::identity`].
pub trait Payload:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Pending edits for one field. Every attribute is optional; an absent
    /// attribute falls back to the payload's current value.
    type Patch: Clone
        + fmt::Debug
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    fn identity(&self) -> FieldId;

    /// Key used to look up icon and colour metadata for display.
    fn presentation_key(&self) -> &str;

    /// Return a copy of `self` with every attribute present in `patch` replaced.
    fn apply(&self, patch: &Self::Patch) -> Self;

    /// Fold `update` into `pending`; attributes set in `update` win.
    fn merge_patch(pending: &mut Self::Patch, update: Self::Patch);

    /// One-line helper text shown next to the field in the dashboard.
    fn describe(&self) -> String {
        String::new()
    }
}

/// One editable unit of profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "P: Payload")]
pub struct Field<P> {
    #[serde(flatten)]
    pub payload: P,
    #[serde(rename = "isVisible")]
    pub visible: bool,
    #[serde(rename = "displayOrder")]
    pub order: u32,
}

impl<P: Payload> Field<P> {
    pub fn new(payload: P, visible: bool, order: u32) -> Self {
        Self {
            payload,
            visible,
            order,
        }
    }

    pub fn id(&self) -> FieldId {
        self.payload.identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        key: String,
        text: String,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct NotePatch {
        text: Option<String>,
    }

    impl Payload for Note {
        type Patch = NotePatch;

        fn identity(&self) -> FieldId {
            FieldId::new(format!("note-{}", self.key))
        }

        fn presentation_key(&self) -> &str {
            &self.key
        }

        fn apply(&self, patch: &NotePatch) -> Self {
            Self {
                key: self.key.clone(),
                text: patch.text.clone().unwrap_or_else(|| self.text.clone()),
            }
        }

        fn merge_patch(pending: &mut NotePatch, update: NotePatch) {
            if update.text.is_some() {
                pending.text = update.text;
            }
        }
    }

    #[test]
    fn test_field_serializes_flat_with_wire_names() {
        let field = Field::new(
            Note {
                key: "a".into(),
                text: "hello".into(),
            },
            true,
            3,
        );
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["key"], "a");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["isVisible"], true);
        assert_eq!(json["displayOrder"], 3);
    }

    #[test]
    fn test_field_deserializes_from_wire_shape() {
        let json = r#"{"key":"b","text":"x","isVisible":false,"displayOrder":2}"#;
        let field: Field<Note> = serde_json::from_str(json).unwrap();
        assert_eq!(field.id(), FieldId::from("note-b"));
        assert!(!field.visible);
        assert_eq!(field.order, 2);
    }

    #[test]
    fn test_identity_survives_patch() {
        let note = Note {
            key: "c".into(),
            text: "old".into(),
        };
        let patched = note.apply(&NotePatch {
            text: Some("new".into()),
        });
        assert_eq!(note.identity(), patched.identity());
        assert_eq!(patched.text, "new");
    }

    #[test]
    fn test_merge_patch_keeps_earlier_attributes() {
        let mut pending = NotePatch {
            text: Some("first".into()),
        };
        Note::merge_patch(&mut pending, NotePatch::default());
        assert_eq!(pending.text.as_deref(), Some("first"));
    }

    #[test]
    fn test_field_id_display() {
        assert_eq!(FieldId::new("mobile").to_string(), "mobile");
    }
}
