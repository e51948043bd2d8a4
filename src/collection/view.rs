//! Read path: canonical fields to display records.

use serde::Serialize;

use folio_common::{Field, FieldId, Payload};

/// Icon and colour metadata attached to a display record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub icon: &'static str,
    pub icon_color: &'static str,
    pub icon_bg_color: &'static str,
}

impl Presentation {
    pub const fn new(icon: &'static str, icon_color: &'static str, icon_bg_color: &'static str) -> Self {
        Self {
            icon,
            icon_color,
            icon_bg_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyMatch {
    Exact,
    Contains,
}

/// Static lookup from a payload's presentation key to its metadata.
///
/// Keys compare ASCII case-insensitively. Unknown keys resolve to `fallback`.
#[derive(Debug)]
pub struct PresentationTable {
    entries: &'static [(&'static str, Presentation)],
    fallback: Presentation,
    matching: KeyMatch,
}

impl PresentationTable {
    pub const fn new(entries: &'static [(&'static str, Presentation)], fallback: Presentation) -> Self {
        Self {
            entries,
            fallback,
            matching: KeyMatch::Exact,
        }
    }

    /// Like [`PresentationTable::new`], but an entry matches when its key
    /// occurs anywhere in the lookup key. First match in table order wins.
    pub const fn keywords(entries: &'static [(&'static str, Presentation)], fallback: Presentation) -> Self {
        Self {
            entries,
            fallback,
            matching: KeyMatch::Contains,
        }
    }

    pub fn lookup(&self, key: &str) -> Presentation {
        let lowered = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| match self.matching {
                KeyMatch::Exact => k.eq_ignore_ascii_case(key),
                KeyMatch::Contains => lowered.contains(&k.to_ascii_lowercase()),
            })
            .map(|(_, p)| *p)
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Presentation {
        self.fallback
    }
}

/// One visible field, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct ViewRecord<P> {
    pub id: FieldId,
    #[serde(flatten)]
    pub payload: P,
    #[serde(rename = "displayOrder")]
    pub order: u32,
    #[serde(flatten)]
    pub presentation: Presentation,
}

/// Filter hidden fields, sort by `order` and attach presentation metadata.
/// The input is not modified.
pub fn to_view<P: Payload>(fields: &[Field<P>], table: &PresentationTable) -> Vec<ViewRecord<P>> {
    let mut visible: Vec<&Field<P>> = fields.iter().filter(|f| f.visible).collect();
    visible.sort_by_key(|f| f.order);
    visible
        .into_iter()
        .map(|f| ViewRecord {
            id: f.id(),
            payload: f.payload.clone(),
            order: f.order,
            presentation: table.lookup(f.payload.presentation_key()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::testing::{Item, item};

    static TABLE: PresentationTable = PresentationTable::new(
        &[("mail", Presentation::new("email", "#DC2626", "#FEF2F2"))],
        Presentation::new("info", "#617289", "#F3F4F6"),
    );

    #[test]
    fn test_hidden_fields_are_filtered_and_rest_sorted() {
        let fields = vec![item("b", "2", true, 2), item("h", "x", false, 1), item("a", "1", true, 3)];
        let view = to_view(&fields, &TABLE);
        let ids: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(view.windows(2).all(|w| w[0].order <= w[1].order));
    }

    #[test]
    fn test_view_never_contains_hidden_field() {
        let fields = vec![item("a", "1", false, 1), item("b", "2", false, 2)];
        assert!(to_view(&fields, &TABLE).is_empty());
    }

    #[test]
    fn test_presentation_lookup_and_fallback() {
        let fields = vec![
            Field::new(Item::keyed("x", "mail", "v"), true, 1),
            Field::new(Item::keyed("y", "unknown", "v"), true, 2),
        ];
        let view = to_view(&fields, &TABLE);
        assert_eq!(view[0].presentation.icon, "email");
        assert_eq!(view[1].presentation, TABLE.fallback());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(TABLE.lookup("MAIL").icon, "email");
    }

    #[test]
    fn test_keyword_table_matches_substrings_in_order() {
        static KEYWORDS: PresentationTable = PresentationTable::keywords(
            &[
                ("note", Presentation::new("note", "#64748B", "#F1F5F9")),
                ("date", Presentation::new("calendar_today", "#64748B", "#F1F5F9")),
            ],
            Presentation::new("label", "#64748B", "#F1F5F9"),
        );
        assert_eq!(KEYWORDS.lookup("meetingNotes").icon, "note");
        assert_eq!(KEYWORDS.lookup("startDate").icon, "calendar_today");
        assert_eq!(KEYWORDS.lookup("customField1").icon, "label");
        assert_eq!(TABLE.lookup("mailbox").icon, "info");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let fields = vec![item("b", "2", true, 2), item("a", "1", true, 1)];
        let before = fields.clone();
        let _ = to_view(&fields, &TABLE);
        assert_eq!(fields, before);
    }

    #[test]
    fn test_view_record_serializes_flat() {
        let fields = vec![item("a", "1", true, 1)];
        let json = serde_json::to_value(&to_view(&fields, &TABLE)[0]).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["displayOrder"], 1);
        assert_eq!(json["iconColor"], "#617289");
        assert_eq!(json["value"], "1");
    }
}
