//! Label/value sections: contact, personal, address, professional and
//! custom fields all store a flat list of `{field, label, value}`.

use serde::{Deserialize, Serialize};

use folio_common::{FieldId, Payload};

use crate::collection::{Presentation, PresentationTable};

/// One labelled value. `field` is the identity key and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    pub field: String,
    pub label: String,
    pub value: String,
}

impl TextField {
    pub fn new(field: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Only the value of a text field is editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TextPatch {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl Payload for TextField {
    type Patch = TextPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(self.field.clone())
    }

    fn presentation_key(&self) -> &str {
        &self.field
    }

    fn apply(&self, patch: &TextPatch) -> Self {
        Self {
            value: patch.value.clone().unwrap_or_else(|| self.value.clone()),
            ..self.clone()
        }
    }

    fn merge_patch(pending: &mut TextPatch, update: TextPatch) {
        if update.value.is_some() {
            pending.value = update.value;
        }
    }

    fn describe(&self) -> String {
        DESCRIPTIONS
            .iter()
            .find(|(key, _)| *key == self.field)
            .map(|(_, text)| (*text).to_string())
            .unwrap_or_else(|| format!("{} information", self.label))
    }
}

const DESCRIPTIONS: &[(&str, &str)] = &[
    // contact
    ("mobile", "Your primary mobile number"),
    ("mobileAlt", "Alternate mobile number"),
    ("phone", "Your phone number"),
    ("whatsapp", "Your WhatsApp contact number"),
    ("email", "Your email address"),
    // personal
    ("fullname", "Your full legal name"),
    ("profileIntro", "Brief introduction about yourself"),
    ("qualification", "Your educational qualification"),
    ("profession", "Your current profession or occupation"),
    ("gender", "Your gender identity"),
    ("languageSpeak", "Languages you can speak"),
    ("bloodGroup", "Your blood group"),
    ("biography", "Your detailed biography"),
    ("dateOfBirth", "Your date of birth"),
    ("married", "Your marital status"),
    // address
    ("address", "Your full address"),
    ("place", "Your location/city"),
    ("LocationMapUrl", "Google Maps location link"),
    // professional
    ("company", "Your company name"),
    ("designation", "Your job title"),
    ("professionSpecialization", "Your area of specialization"),
    ("serviceProviding", "Services you provide"),
    ("compAddress", "Company address"),
    ("compPlace", "Company location"),
    ("compEmail", "Company email address"),
    ("compMobile", "Company mobile number"),
    ("compPhone", "Company phone number"),
    ("compWhatsApp", "Company WhatsApp number"),
    ("compWebsite", "Company website URL"),
    // emergency
    ("emerContactName", "Who to contact in an emergency"),
    ("emerContactNo", "Number to call in an emergency"),
    ("emerContactRelation", "How the contact is related to you"),
    ("emerContactEmail", "Email of your emergency contact"),
    ("emerContactAddress", "Address of your emergency contact"),
];

const MOBILE: Presentation = Presentation::new("smartphone", "#DC2626", "#FEF2F2");

/// Unknown contact keys render like a mobile number.
pub static CONTACT: PresentationTable = PresentationTable::new(
    &[
        ("mobile", MOBILE),
        ("mobileAlt", MOBILE),
        ("phone", MOBILE),
        ("whatsapp", Presentation::new("chat", "#16A34A", "#DBEAFE")),
        ("email", Presentation::new("email", "#DC2626", "#FEF2F2")),
        ("fax", Presentation::new("print", "#64748B", "#F1F5F9")),
    ],
    MOBILE,
);

const fn personal(icon: &'static str) -> Presentation {
    Presentation::new(icon, "#617289", "#F3F4F6")
}

pub static PERSONAL: PresentationTable = PresentationTable::new(
    &[
        ("fullname", personal("person")),
        ("profileIntro", personal("description")),
        ("qualification", personal("school")),
        ("profession", personal("work")),
        ("gender", personal("wc")),
        ("languageSpeak", personal("language")),
        ("bloodGroup", personal("bloodtype")),
        ("biography", personal("description")),
        ("dateOfBirth", personal("event")),
        ("married", personal("favorite")),
    ],
    personal("info"),
);

/// Every address line shares one icon.
pub static ADDRESS: PresentationTable =
    PresentationTable::new(&[], Presentation::new("home", "#617289", "#FFE4E6"));

pub static PROFESSIONAL: PresentationTable = PresentationTable::new(
    &[
        ("company", personal("business")),
        ("designation", personal("badge")),
        ("professionSpecialization", personal("work")),
        ("serviceProviding", personal("handyman")),
        ("compAddress", personal("location_on")),
        ("compPlace", personal("place")),
        ("compEmail", personal("email")),
        ("compMobile", personal("smartphone")),
        ("compPhone", personal("call")),
        ("compWhatsApp", personal("chat")),
        ("compWebsite", personal("language")),
    ],
    personal("info"),
);

const fn custom(icon: &'static str) -> Presentation {
    Presentation::new(icon, "#64748B", "#F1F5F9")
}

/// Custom field names are free-form, so icons are picked by keyword.
pub static CUSTOM: PresentationTable = PresentationTable::keywords(
    &[
        ("note", custom("note")),
        ("comment", custom("note")),
        ("link", custom("link")),
        ("url", custom("link")),
        ("date", custom("calendar_today")),
        ("time", custom("calendar_today")),
        ("number", custom("tag")),
        ("count", custom("tag")),
        ("text", custom("description")),
        ("description", custom("description")),
    ],
    custom("label"),
);
