//! Demo profile served by a fresh process.

use folio_common::{Field, GroupData, GroupEnvelope, Payload};

use super::document::DocumentField;
use super::gallery::GalleryImage;
use super::link::LinkField;
use super::skill::SkillField;
use super::social::SocialMediaField;
use super::text::TextField;

pub fn envelope<P: Payload>(
    account_id: i64,
    group: &str,
    enable_share_button: Option<bool>,
    field_list: Vec<Field<P>>,
) -> GroupEnvelope<P> {
    GroupEnvelope::ok(GroupData {
        account_id,
        enable_share_button,
        group: group.to_string(),
        field_list,
    })
}

/// Visible text fields numbered in the order given.
fn texts(rows: &[(&str, &str, &str)]) -> Vec<Field<TextField>> {
    rows.iter()
        .zip(1..)
        .map(|(&(field, label, value), order)| Field::new(TextField::new(field, label, value), true, order))
        .collect()
}

pub fn contact() -> Vec<Field<TextField>> {
    texts(&[
        ("mobile", "Mobile", "+971555000111"),
        ("mobileAlt", "Alternate Mobile", "+971555000222"),
        ("phone", "Phone", "+97144000333"),
        ("whatsapp", "WhatsApp", "+971555000111"),
        ("email", "Email", "hello@folio.example"),
    ])
}

pub fn emergency() -> Vec<Field<TextField>> {
    texts(&[
        ("emerContactName", "Emergency Contact Name", "Alex Rivera"),
        ("emerContactNo", "Emergency Contact No", "+915845565555"),
        ("emerContactRelation", "Relation", "Brother"),
    ])
}

pub fn personal() -> Vec<Field<TextField>> {
    texts(&[
        ("fullname", "Full Name", "Sam Rivera"),
        ("profileIntro", "Profile Introduction", "Business developer focused on industrial automation."),
        ("qualification", "Qualification", "B.Tech in Computer Science"),
        ("profession", "Profession", "Business Developer"),
        ("gender", "Gender", "Prefer not to say"),
        ("languageSpeak", "Languages Spoken", "English, Arabic"),
        ("bloodGroup", "Blood Group", "O+"),
        ("biography", "Biography", "Builds scalable digital platforms and friendly tools."),
        ("dateOfBirth", "Date of Birth", "1994-05-14"),
        ("married", "Marital Status", "Single"),
    ])
}

pub fn address() -> Vec<Field<TextField>> {
    texts(&[
        ("address", "Address", "Building 4, Lane 3, Harbour District"),
        ("place", "Location", "Harbour District"),
        ("LocationMapUrl", "Location Map", "https://maps.example.com/harbour-district"),
    ])
}

pub fn professional() -> Vec<Field<TextField>> {
    texts(&[
        ("company", "Company Name", "Northwind Systems"),
        ("designation", "Designation", "Business Developer"),
        ("professionSpecialization", "Profession / Specialization", "Machine vision"),
        ("serviceProviding", "Service Providing", "Inspection system rollout"),
        ("compAddress", "Company Address", "Building 2, Harbour District"),
        ("compPlace", "Company Place", "Harbour District"),
        ("compEmail", "Company Email", "office@northwind.example"),
        ("compMobile", "Company Mobile", "+971555000444"),
        ("compPhone", "Company Phone", "+97144000555"),
        ("compWhatsApp", "Company WhatsApp", "+971555000444"),
        ("compWebsite", "Company Website", "https://northwind.example"),
    ])
}

pub fn custom_fields() -> Vec<Field<TextField>> {
    texts(&[
        ("customField1", "Custom Field 1", "Custom Value 1"),
        ("customField2", "Custom Field 2", "Custom Value 2"),
        (
            "customField3",
            "Custom Field 3",
            "A longer custom value that spans more than one line when displayed.",
        ),
    ])
}

pub fn skills() -> Vec<Field<SkillField>> {
    let skill = |id, name: &str, description: &str, duration: &str, level: &str| SkillField {
        skill_set_id: id,
        name: name.into(),
        description: description.into(),
        duration: duration.into(),
        level: level.into(),
    };
    vec![
        Field::new(
            skill(
                200,
                "Web Application Development",
                "Designing and building scalable web applications",
                "5 Years",
                "Advanced",
            ),
            true,
            1,
        ),
        Field::new(
            skill(
                201,
                "Cloud Infrastructure Management",
                "Deploying and operating services on public clouds",
                "3 Years",
                "Intermediate",
            ),
            true,
            3,
        ),
    ]
}

pub fn links() -> Vec<Field<LinkField>> {
    let link = |id, name: &str, description: &str, text: &str, url: &str| LinkField {
        links_id: id,
        name: name.into(),
        description: description.into(),
        link_text: text.into(),
        link_url: url.into(),
    };
    vec![
        Field::new(
            link(
                100,
                "Official Website",
                "Company overview and product catalogue",
                "Visit Website",
                "https://northwind.example",
            ),
            true,
            1,
        ),
        Field::new(
            link(
                102,
                "Customer Support",
                "Reach the support team",
                "Get Support",
                "https://support.northwind.example",
            ),
            true,
            3,
        ),
    ]
}

pub fn documents() -> Vec<Field<DocumentField>> {
    let doc = |id, name: &str, kind: &str, file: &str, size: &str, title: &str, description: &str| DocumentField {
        document_id: id,
        name: name.into(),
        file_type: kind.into(),
        file_url: format!("https://files.folio.example/{}", file),
        file_size: size.into(),
        title: title.into(),
        description: description.into(),
    };
    vec![
        Field::new(
            doc(101, "Biodata", "PDF", "biodata.pdf", "250KB", "Biodata", "Education and work experience"),
            true,
            1,
        ),
        Field::new(
            doc(102, "License copy", "JPEG", "license.jpeg", "500KB", "Driving License Copy", "Scanned license"),
            true,
            2,
        ),
        Field::new(
            doc(103, "Other Doc", "PDF", "other.pdf", "150KB", "Other Document", "Additional document"),
            false,
            3,
        ),
    ]
}

pub fn gallery() -> Vec<Field<GalleryImage>> {
    let rows: [(i64, &str, &str, &str, bool); 7] = [
        (201, "Company Event", "Annual company event", "1.2MB", true),
        (202, "Product Launch", "New product launch ceremony", "900KB", true),
        (203, "Team Building", "Team-building activities", "1.5MB", false),
        (204, "Office Space", "Workspace and collaborative areas", "850KB", true),
        (205, "Innovation Lab", "Research and development workspace", "1.1MB", true),
        (206, "Client Meeting Room", "Meeting spaces for client visits", "950KB", true),
        (207, "Recreation Area", "Lounge and relaxation zone", "1.3MB", true),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((id, title, description, size, visible), order)| {
            Field::new(
                GalleryImage {
                    gallery_id: id,
                    title: title.into(),
                    description: description.into(),
                    image_url: format!("https://images.folio.example/{}.jpg?w=800", id),
                    thumbnail_url: format!("https://images.folio.example/{}.jpg?w=400", id),
                    file_size: size.into(),
                    file_type: "JPEG".into(),
                },
                visible,
                order,
            )
        })
        .collect()
}

/// Orders restart per category, as the social view groups by category.
pub fn social_media() -> Vec<Field<SocialMediaField>> {
    let rows: [(i64, &str, &str, &str, &str, u32); 6] = [
        (201, "linkedin", "LinkedIn", "https://linkedin.com/in/sam-rivera", "professional", 1),
        (202, "twitter", "X / Twitter", "https://twitter.com/samrivera", "professional", 2),
        (203, "instagram", "Instagram", "https://instagram.com/sam.rivera", "personal", 1),
        (204, "facebook", "Facebook", "https://facebook.com/sam.rivera", "personal", 2),
        (205, "snapchat", "Snapchat", "https://snapchat.com/add/samr", "personal", 3),
        (206, "telegram", "Telegram", "https://t.me/samrivera", "community", 1),
    ];
    rows.into_iter()
        .map(|(id, platform, name, url, category, order)| {
            Field::new(
                SocialMediaField {
                    social_media_id: id,
                    platform: platform.into(),
                    platform_name: name.into(),
                    url: url.into(),
                    category: category.into(),
                },
                true,
                order,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids_unique<P: Payload>(fields: &[Field<P>]) -> bool {
        let ids: HashSet<_> = fields.iter().map(|f| f.id()).collect();
        ids.len() == fields.len()
    }

    #[test]
    fn test_seed_ids_are_unique_per_section() {
        assert!(ids_unique(&contact()));
        assert!(ids_unique(&personal()));
        assert!(ids_unique(&professional()));
        assert!(ids_unique(&skills()));
        assert!(ids_unique(&links()));
        assert!(ids_unique(&documents()));
        assert!(ids_unique(&gallery()));
        assert!(ids_unique(&social_media()));
    }

    #[test]
    fn test_text_seed_orders_are_contiguous() {
        let orders: Vec<u32> = contact().iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_seed_has_hidden_fields() {
        assert!(documents().iter().any(|f| !f.visible));
        assert!(gallery().iter().any(|f| !f.visible));
    }
}
