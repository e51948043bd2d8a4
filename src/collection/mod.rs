//! Ordered editable collections.
//!
//! Every profile section is an ordered list of fields that is shown
//! read-only (hidden fields filtered out) and edited through a dashboard
//! session. This module implements that pattern once, generic over the
//! section's [`Payload`]:
//!
//! | Module    | Responsibility                                          |
//! |-----------|---------------------------------------------------------|
//! | `view`    | canonical list → display records (`to_view`)            |
//! | `session` | canonical list ↔ `EditSession` (forward and reverse)    |
//! | `reorder` | positional `move_item` on the id ordering               |

pub mod reorder;
pub mod session;
pub mod view;

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use folio_common::{Field, Payload};

use crate::errors::CollectionError;

pub use reorder::move_item;
pub use session::{DashboardField, EditSession, SessionEntry};
pub use view::{Presentation, PresentationTable, ViewRecord};

/// What the reverse transform does with session ids that do not resolve to
/// a stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Drop unknown and duplicate ids with a warning.
    #[default]
    Skip,
    /// Fail the commit on unknown, duplicate or missing ids.
    Reject,
}

impl std::fmt::Display for UnknownFieldPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownFieldPolicy::Skip => write!(f, "skip"),
            UnknownFieldPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for UnknownFieldPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(UnknownFieldPolicy::Skip),
            "reject" => Ok(UnknownFieldPolicy::Reject),
            _ => anyhow::bail!(
                "Invalid unknown field policy '{}'. Valid values: skip, reject",
                s
            ),
        }
    }
}

/// The read and edit transforms for one section, bound to its presentation
/// table and unknown-id policy.
pub struct OrderedEditableCollection<P> {
    presentation: &'static PresentationTable,
    policy: UnknownFieldPolicy,
    _payload: PhantomData<fn() -> P>,
}

impl<P> Clone for OrderedEditableCollection<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for OrderedEditableCollection<P> {}

impl<P: Payload> OrderedEditableCollection<P> {
    pub fn new(presentation: &'static PresentationTable, policy: UnknownFieldPolicy) -> Self {
        Self {
            presentation,
            policy,
            _payload: PhantomData,
        }
    }

    pub fn policy(&self) -> UnknownFieldPolicy {
        self.policy
    }

    pub fn with_policy(self, policy: UnknownFieldPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn to_view(&self, fields: &[Field<P>]) -> Vec<ViewRecord<P>> {
        view::to_view(fields, self.presentation)
    }

    pub fn to_edit_session(&self, fields: &[Field<P>]) -> EditSession<P> {
        session::to_edit_session(fields)
    }

    pub fn from_edit_session(
        &self,
        original: &[Field<P>],
        session: &EditSession<P>,
    ) -> Result<Vec<Field<P>>, CollectionError> {
        session::from_edit_session(original, session, self.policy)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal payload used by the collection tests.

    use serde::{Deserialize, Serialize};

    use folio_common::{Field, FieldId, Payload};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Item {
        pub key: String,
        pub kind: String,
        pub value: String,
    }

    impl Item {
        pub fn keyed(key: &str, kind: &str, value: &str) -> Self {
            Self {
                key: key.into(),
                kind: kind.into(),
                value: value.into(),
            }
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ItemPatch {
        pub value: Option<String>,
    }

    impl Payload for Item {
        type Patch = ItemPatch;

        fn identity(&self) -> FieldId {
            FieldId::new(self.key.clone())
        }

        fn presentation_key(&self) -> &str {
            &self.kind
        }

        fn apply(&self, patch: &ItemPatch) -> Self {
            Self {
                value: patch.value.clone().unwrap_or_else(|| self.value.clone()),
                ..self.clone()
            }
        }

        fn merge_patch(pending: &mut ItemPatch, update: ItemPatch) {
            if update.value.is_some() {
                pending.value = update.value;
            }
        }

        fn describe(&self) -> String {
            format!("{} item", self.kind)
        }
    }

    pub fn item(key: &str, value: &str, visible: bool, order: u32) -> Field<Item> {
        Field::new(Item::keyed(key, key, value), visible, order)
    }
}
