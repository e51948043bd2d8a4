//! Emergency contact section. Stored like the other label/value sections;
//! the display adds a tap action for numbers and mail addresses.

use serde::Serialize;

use super::text::TextField;
use crate::collection::{Presentation, PresentationTable, ViewRecord};

const fn emergency(icon: &'static str) -> Presentation {
    Presentation::new(icon, "#DC2626", "#FEE2E2")
}

pub static EMERGENCY: PresentationTable = PresentationTable::new(
    &[
        ("emerContactName", emergency("person")),
        ("emerContactNo", emergency("phone")),
        ("emerContactRelation", emergency("supervisor_account")),
        ("emerContactEmail", emergency("email")),
        ("emerContactAddress", emergency("location_on")),
    ],
    emergency("local_hospital"),
);

/// What tapping an emergency record does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactAction {
    Call,
    Message,
    None,
}

impl ContactAction {
    pub fn for_field(field: &str) -> Self {
        match field {
            "emerContactNo" => ContactAction::Call,
            "emerContactEmail" => ContactAction::Message,
            _ => ContactAction::None,
        }
    }

    pub fn icon(self) -> Option<&'static str> {
        match self {
            ContactAction::Call => Some("call"),
            ContactAction::Message => Some("mail"),
            ContactAction::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRecord {
    #[serde(flatten)]
    pub record: ViewRecord<TextField>,
    pub action_type: ContactAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_icon: Option<&'static str>,
}

/// Display shape of the emergency section: the flat list plus actions.
pub fn action_view(records: Vec<ViewRecord<TextField>>) -> serde_json::Result<serde_json::Value> {
    let shaped: Vec<EmergencyRecord> = records
        .into_iter()
        .map(|record| {
            let action = ContactAction::for_field(&record.payload.field);
            EmergencyRecord {
                record,
                action_type: action,
                action_icon: action.icon(),
            }
        })
        .collect();
    serde_json::to_value(shaped)
}
