//! Demo hub served by a fresh process.

use folio_common::Field;

use super::model::{Account, HubData, HubEnvelope, ModuleGroup, ProfileCard, QuickAction};

fn action(field: &str, label: &str, value: &str, color: &str, order: u32) -> Field<QuickAction> {
    Field::new(
        QuickAction {
            field: field.into(),
            label: label.into(),
            value: value.into(),
            icon: String::new(),
            icon_color: Some(color.into()),
        },
        true,
        order,
    )
}

fn module(group: &str, label: &str, value: &str, icon: &str, color: &str, icon_color: &str) -> ModuleGroup {
    ModuleGroup {
        group: group.into(),
        label: label.into(),
        value: value.into(),
        icon: Some(icon.into()),
        color: Some(color.into()),
        icon_color: Some(icon_color.into()),
        subtitle: None,
    }
}

pub fn hub(account_id: i64) -> HubEnvelope {
    let groups = [
        module("personal", "Personal", "Personal", "person", "#F8FAFC", "#9333EA"),
        module("contact", "Contact", "Contact", "contact_phone", "#EFF6FF", "#2563EB"),
        module("address", "Address", "Address", "location_on", "#F0FDF4", "#10B981"),
        module("professional", "Professional", "Professional", "work", "#EFF6FF", "#2563EB"),
        module("links", "Links", "Links", "link", "#ECFEFF", "#06B6D4"),
        module("social-media", "Social Media", "SocialMedia", "share", "#EFF6FF", "#3B82F6"),
        module("skills", "Skills", "Skills", "psychology", "#FFFBEB", "#F59E0B"),
        module("documents", "Documents", "Documents", "description", "#EEF2FF", "#6366F1"),
        module("gallery", "Gallery", "Gallery", "photo_library", "#F0FDF4", "#10B981"),
        module("customFields", "Custom Fields", "CustomFields", "settings", "#F8FAFC", "#64748B"),
        module("emergency", "Emergency", "Emergency", "local_hospital", "#FEF2F2", "#DC2626"),
    ];
    let group_list = groups
        .into_iter()
        .zip(1..)
        .map(|(group, order)| {
            let visible = group.group != "customFields";
            Field::new(group, visible, order)
        })
        .collect();

    HubEnvelope::ok(HubData {
        enable_account_selection: false,
        account: Account {
            account_id,
            user_id: 500,
            person_id: 256,
            name: "Sam Rivera".into(),
            account_type: "INDV".into(),
            account_expiry: "25-Jan-2027 10:00 PM".into(),
            is_paid: "false".into(),
            subscription_code: "SF-TRIAL".into(),
            status: "TRIAL".into(),
            status_message: "Trial account expires on 25-Jan-2027 at 10:00 PM".into(),
        },
        profile: ProfileCard {
            profile_photo_url: "https://images.folio.example/avatar/sam.jpg".into(),
            title: String::new(),
            fullname: "Sam Rivera".into(),
            profession: "Business Developer".into(),
            location: Some("Dubai".into()),
            profile_intro: Some("Business developer focused on industrial automation.".into()),
            data_ref_id: "s89sdflfjsj654sjhdj56584smloopuyt".into(),
            share_link: "https://folio.example/share/s89sdflfjsj654sjhdj56584smloopuyt".into(),
            enable_share_button: true,
        },
        contact_icons: vec![
            action("call", "Call", "+971555000111", "#2563EB", 1),
            action("whatsapp", "WhatsApp", "+971555000111", "#059669", 2),
            action("email", "Email", "hello@folio.example", "#2563EB", 3),
            action("location", "Place", "https://maps.folio.example/sam", "#2563EB", 4),
        ],
        group_list,
    })
}
