//! Dashboard editing: the canonical list seeded into an [`EditSession`],
//! mutated by toggle/edit/reorder, and folded back into a canonical list.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_common::{Field, FieldId, Payload};

use super::UnknownFieldPolicy;
use super::reorder::move_item;
use crate::errors::CollectionError;

/// Pending state for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct SessionEntry<P: Payload> {
    /// Pending visibility. `None` falls back to the field's stored value.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Pending attribute edits layered over the stored payload.
    #[serde(default)]
    pub patch: P::Patch,
    /// Snapshot of the field as loaded, kept so untouched attributes
    /// reproduce verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Field<P>>,
}

/// A field as the dashboard currently shows it: stored values with the
/// session's pending edits applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct DashboardField<P> {
    pub id: FieldId,
    #[serde(flatten)]
    pub payload: P,
    pub enabled: bool,
    pub description: String,
}

/// Ephemeral per-load editing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct EditSession<P: Payload> {
    #[serde(default = "Uuid::new_v4")]
    pub session_id: Uuid,
    /// Entries may be left out; the fold falls back to the stored field.
    #[serde(default)]
    pub fields: BTreeMap<FieldId, SessionEntry<P>>,
    pub fields_order: Vec<FieldId>,
}

impl<P: Payload> EditSession<P> {
    pub fn len(&self) -> usize {
        self.fields_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields_order.is_empty()
    }

    pub fn toggle(&mut self, id: &FieldId, enabled: bool) -> Result<(), CollectionError> {
        let entry = self.entry_mut(id)?;
        entry.enabled = Some(enabled);
        Ok(())
    }

    /// Merge `patch` into the field's pending edits.
    pub fn edit(&mut self, id: &FieldId, patch: P::Patch) -> Result<(), CollectionError> {
        let entry = self.entry_mut(id)?;
        P::merge_patch(&mut entry.patch, patch);
        Ok(())
    }

    /// Relocate the field at `source` to `dest`; `None` means the drag was
    /// cancelled.
    pub fn reorder(&mut self, source: usize, dest: Option<usize>) {
        self.fields_order = move_item(&self.fields_order, source, dest);
    }

    /// The fields in session order with pending edits applied. Ids without a
    /// loaded snapshot are left out.
    pub fn current(&self) -> Vec<DashboardField<P>> {
        self.fields_order
            .iter()
            .filter_map(|id| {
                let entry = self.fields.get(id)?;
                let base = entry.base.as_ref()?;
                let payload = base.payload.apply(&entry.patch);
                let description = payload.describe();
                Some(DashboardField {
                    id: id.clone(),
                    payload,
                    enabled: entry.enabled.unwrap_or(base.visible),
                    description,
                })
            })
            .collect()
    }

    /// True when any visibility, value or position differs from the loaded
    /// snapshot.
    pub fn is_dirty(&self) -> bool {
        let mut loaded: Vec<(&FieldId, u32)> = self
            .fields
            .iter()
            .filter_map(|(id, e)| e.base.as_ref().map(|b| (id, b.order)))
            .collect();
        loaded.sort_by_key(|(_, order)| *order);
        let loaded_order: Vec<&FieldId> = loaded.into_iter().map(|(id, _)| id).collect();
        if loaded_order != self.fields_order.iter().collect::<Vec<_>>() {
            return true;
        }

        self.fields.values().any(|entry| match &entry.base {
            Some(base) => {
                entry.enabled.is_some_and(|e| e != base.visible)
                    || base.payload.apply(&entry.patch) != base.payload
            }
            None => true,
        })
    }

    fn entry_mut(&mut self, id: &FieldId) -> Result<&mut SessionEntry<P>, CollectionError> {
        self.fields
            .get_mut(id)
            .ok_or_else(|| CollectionError::UnknownField { id: id.to_string() })
    }
}

/// Seed a session from the canonical list. Hidden fields are included so the
/// user can re-enable them.
pub fn to_edit_session<P: Payload>(fields: &[Field<P>]) -> EditSession<P> {
    let mut sorted: Vec<&Field<P>> = fields.iter().collect();
    sorted.sort_by_key(|f| f.order);

    let mut entries = BTreeMap::new();
    let mut fields_order = Vec::with_capacity(sorted.len());
    for field in sorted {
        let id = field.id();
        entries.insert(
            id.clone(),
            SessionEntry {
                enabled: Some(field.visible),
                patch: P::Patch::default(),
                base: Some(field.clone()),
            },
        );
        fields_order.push(id);
    }

    EditSession {
        session_id: Uuid::new_v4(),
        fields: entries,
        fields_order,
    }
}

/// Fold a session back into a canonical list.
///
/// Fields come out in `fields_order` with `order` renumbered `1..=N`. Each
/// attribute takes the session's pending value when present and the
/// original's otherwise.
pub fn from_edit_session<P: Payload>(
    original: &[Field<P>],
    session: &EditSession<P>,
    policy: UnknownFieldPolicy,
) -> Result<Vec<Field<P>>, CollectionError> {
    let by_id: HashMap<FieldId, &Field<P>> = original.iter().map(|f| (f.id(), f)).collect();
    let mut seen: HashSet<&FieldId> = HashSet::with_capacity(session.fields_order.len());
    let mut rebuilt = Vec::with_capacity(session.fields_order.len());

    for id in &session.fields_order {
        let Some(field) = by_id.get(id) else {
            match policy {
                UnknownFieldPolicy::Reject => {
                    return Err(CollectionError::UnknownField { id: id.to_string() });
                }
                UnknownFieldPolicy::Skip => {
                    tracing::warn!(session = %session.session_id, field = %id, "skipping unknown field id");
                    continue;
                }
            }
        };
        if !seen.insert(id) {
            match policy {
                UnknownFieldPolicy::Reject => {
                    return Err(CollectionError::DuplicateField { id: id.to_string() });
                }
                UnknownFieldPolicy::Skip => {
                    tracing::warn!(session = %session.session_id, field = %id, "skipping duplicate field id");
                    continue;
                }
            }
        }

        let entry = session.fields.get(id);
        let payload = match entry {
            Some(e) => field.payload.apply(&e.patch),
            None => field.payload.clone(),
        };
        let visible = entry.and_then(|e| e.enabled).unwrap_or(field.visible);
        let order = rebuilt.len() as u32 + 1;
        rebuilt.push(Field::new(payload, visible, order));
    }

    if policy == UnknownFieldPolicy::Reject
        && let Some(missing) = original.iter().map(|f| f.id()).find(|id| !seen.contains(id))
    {
        return Err(CollectionError::MissingField {
            id: missing.to_string(),
        });
    }

    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::testing::{ItemPatch, item};

    fn abc() -> Vec<Field<crate::collection::testing::Item>> {
        vec![item("A", "a", true, 1), item("B", "b", true, 2), item("C", "c", true, 3)]
    }

    fn orders<P: Payload>(fields: &[Field<P>]) -> Vec<u32> {
        fields.iter().map(|f| f.order).collect()
    }

    fn id_list<P: Payload>(fields: &[Field<P>]) -> Vec<String> {
        fields.iter().map(|f| f.id().to_string()).collect()
    }

    #[test]
    fn test_forward_sorts_and_keeps_hidden_fields() {
        let fields = vec![item("B", "b", false, 2), item("A", "a", true, 1)];
        let session = to_edit_session(&fields);
        assert_eq!(session.fields_order, vec![FieldId::from("A"), FieldId::from("B")]);
        assert_eq!(session.fields[&FieldId::from("B")].enabled, Some(false));
        assert!(session.fields[&FieldId::from("A")].base.is_some());
    }

    #[test]
    fn test_round_trip_without_edits_is_identity() {
        let original = vec![item("A", "a", true, 1), item("B", "b", false, 2), item("C", "c", true, 3)];
        let session = to_edit_session(&original);
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(rebuilt, original);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_round_trip_renumbers_gapped_orders() {
        let original = vec![item("A", "a", true, 5), item("B", "b", true, 9)];
        let session = to_edit_session(&original);
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(orders(&rebuilt), vec![1, 2]);
        assert_eq!(id_list(&rebuilt), vec!["A", "B"]);
    }

    #[test]
    fn test_scenario_move_last_to_front() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.reorder(2, Some(0));
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(id_list(&rebuilt), vec!["C", "A", "B"]);
        assert_eq!(orders(&rebuilt), vec![1, 2, 3]);
    }

    #[test]
    fn test_scenario_toggle_keeps_orders() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.toggle(&FieldId::from("B"), false).unwrap();
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert!(!rebuilt[1].visible);
        assert_eq!(rebuilt[1].id(), FieldId::from("B"));
        assert_eq!(orders(&rebuilt), orders(&original));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_edit_layers_over_original() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session
            .edit(&FieldId::from("A"), ItemPatch { value: Some("new".into()) })
            .unwrap();
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(rebuilt[0].payload.value, "new");
        assert_eq!(rebuilt[1].payload.value, "b");
    }

    #[test]
    fn test_successive_edits_merge() {
        let original = abc();
        let mut session = to_edit_session(&original);
        let id = FieldId::from("A");
        session.edit(&id, ItemPatch { value: Some("one".into()) }).unwrap();
        session.edit(&id, ItemPatch::default()).unwrap();
        assert_eq!(session.current()[0].payload.value, "one");
    }

    #[test]
    fn test_toggle_unknown_id_is_error() {
        let mut session = to_edit_session(&abc());
        let err = session.toggle(&FieldId::from("Z"), true).unwrap_err();
        assert!(matches!(err, CollectionError::UnknownField { ref id } if id == "Z"));
    }

    #[test]
    fn test_missing_entry_falls_back_to_original() {
        let original = vec![item("A", "a", false, 1)];
        let mut session = to_edit_session(&original);
        session.fields.clear();
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_skip_policy_drops_unknown_and_stays_contiguous() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.fields_order.insert(1, FieldId::from("ghost"));
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(id_list(&rebuilt), vec!["A", "B", "C"]);
        assert_eq!(orders(&rebuilt), vec![1, 2, 3]);
    }

    #[test]
    fn test_skip_policy_drops_duplicates() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.fields_order.push(FieldId::from("A"));
        let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(id_list(&rebuilt), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_reject_policy_reports_unknown_id() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.fields_order.push(FieldId::from("ghost"));
        let err = from_edit_session(&original, &session, UnknownFieldPolicy::Reject).unwrap_err();
        assert!(matches!(err, CollectionError::UnknownField { ref id } if id == "ghost"));
    }

    #[test]
    fn test_reject_policy_reports_duplicate_id() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.fields_order.push(FieldId::from("B"));
        let err = from_edit_session(&original, &session, UnknownFieldPolicy::Reject).unwrap_err();
        assert!(matches!(err, CollectionError::DuplicateField { ref id } if id == "B"));
    }

    #[test]
    fn test_reject_policy_reports_missing_id() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.fields_order.retain(|id| id.as_str() != "C");
        let err = from_edit_session(&original, &session, UnknownFieldPolicy::Reject).unwrap_err();
        assert!(matches!(err, CollectionError::MissingField { ref id } if id == "C"));
    }

    #[test]
    fn test_contiguity_and_identity_over_all_moves_and_toggles() {
        let original: Vec<_> = (0..5)
            .map(|i| item(&format!("f{i}"), "v", i % 2 == 0, i as u32 + 1))
            .collect();
        let mut expected_ids: Vec<String> = id_list(&original);
        expected_ids.sort();

        for source in 0..5 {
            for dest in 0..5 {
                let mut session = to_edit_session(&original);
                session.reorder(source, Some(dest));
                session.toggle(&FieldId::from("f1"), true).unwrap();
                session
                    .edit(&FieldId::from("f3"), ItemPatch { value: Some("x".into()) })
                    .unwrap();
                let rebuilt = from_edit_session(&original, &session, UnknownFieldPolicy::Reject).unwrap();

                let mut sorted_orders = orders(&rebuilt);
                sorted_orders.sort_unstable();
                assert_eq!(sorted_orders, vec![1, 2, 3, 4, 5]);

                let mut ids = id_list(&rebuilt);
                ids.sort();
                assert_eq!(ids, expected_ids);
            }
        }
    }

    #[test]
    fn test_commit_of_unchanged_session_is_idempotent() {
        let original = abc();
        let session = to_edit_session(&original);
        let first = from_edit_session(&original, &session, UnknownFieldPolicy::Skip).unwrap();
        let second = from_edit_session(&first, &session, UnknownFieldPolicy::Skip).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_current_reflects_pending_state() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.toggle(&FieldId::from("A"), false).unwrap();
        session.reorder(0, Some(2));
        let current = session.current();
        assert_eq!(current.len(), 3);
        assert_eq!(current[2].id, FieldId::from("A"));
        assert!(!current[2].enabled);
    }

    #[test]
    fn test_session_json_round_trip_without_base() {
        let original = abc();
        let mut session = to_edit_session(&original);
        session.toggle(&FieldId::from("C"), false).unwrap();
        let mut json = serde_json::to_value(&session).unwrap();
        for entry in json["fields"].as_object_mut().unwrap().values_mut() {
            entry.as_object_mut().unwrap().remove("base");
        }
        let parsed: EditSession<crate::collection::testing::Item> = serde_json::from_value(json).unwrap();
        let rebuilt = from_edit_session(&original, &parsed, UnknownFieldPolicy::Skip).unwrap();
        assert!(!rebuilt[2].visible);
        assert_eq!(parsed.session_id, session.session_id);
    }
}
