use serde::{Deserialize, Serialize};

use folio_common::{FieldId, Payload};

use crate::collection::{Presentation, PresentationTable};

/// An uploaded document listed on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentField {
    #[serde(rename = "documentID")]
    pub document_id: i64,
    pub name: String,
    pub file_type: String,
    pub file_url: String,
    pub file_size: String,
    pub title: String,
    pub description: String,
}

/// Reference to a stored asset produced by the upload step. Its encoding is
/// opaque here; the dashboard only swaps one reference for another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub url: String,
    pub kind: String,
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,
}

impl Payload for DocumentField {
    type Patch = DocumentPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(format!("document-{}", self.document_id))
    }

    fn presentation_key(&self) -> &str {
        &self.file_type
    }

    fn apply(&self, patch: &DocumentPatch) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(asset) = &patch.asset {
            next.file_url = asset.url.clone();
            next.file_type = asset.kind.clone();
            next.file_size = asset.size.clone();
        }
        next
    }

    fn merge_patch(pending: &mut DocumentPatch, update: DocumentPatch) {
        if update.title.is_some() {
            pending.title = update.title;
        }
        if update.description.is_some() {
            pending.description = update.description;
        }
        if update.asset.is_some() {
            pending.asset = update.asset;
        }
    }

    fn describe(&self) -> String {
        format!("{} document • {}", self.file_type, self.file_size)
    }
}

const PDF: Presentation = Presentation::new("picture_as_pdf", "#DC2626", "#FEE2E2");
const WORD: Presentation = Presentation::new("description", "#2563EB", "#DBEAFE");
const SHEET: Presentation = Presentation::new("table_chart", "#059669", "#D1FAE5");
const IMAGE: Presentation = Presentation::new("image", "#7C3AED", "#EDE9FE");
const SLIDES: Presentation = Presentation::new("slideshow", "#DC2626", "#FEE2E2");
const ARCHIVE: Presentation = Presentation::new("folder_zip", "#CA8A04", "#FEF3C7");

/// Keyed by file type.
pub static DOCUMENTS: PresentationTable = PresentationTable::new(
    &[
        ("PDF", PDF),
        ("DOC", WORD),
        ("DOCX", WORD),
        ("TXT", Presentation::new("article", "#64748B", "#F1F5F9")),
        ("XLS", SHEET),
        ("XLSX", SHEET),
        ("CSV", Presentation::new("grid_on", "#059669", "#D1FAE5")),
        ("JPG", IMAGE),
        ("JPEG", IMAGE),
        ("PNG", IMAGE),
        ("GIF", Presentation::new("gif", "#7C3AED", "#EDE9FE")),
        ("PPT", SLIDES),
        ("PPTX", SLIDES),
        ("ZIP", ARCHIVE),
        ("RAR", ARCHIVE),
    ],
    Presentation::new("insert_drive_file", "#617289", "#F3F4F6"),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn biodata() -> DocumentField {
        DocumentField {
            document_id: 101,
            name: "Biodata".into(),
            file_type: "PDF".into(),
            file_url: "https://files.test/biodata.pdf".into(),
            file_size: "250KB".into(),
            title: "Biodata".into(),
            description: "Education and work".into(),
        }
    }

    #[test]
    fn test_identity_is_prefixed_document_id() {
        assert_eq!(biodata().identity().as_str(), "document-101");
    }

    #[test]
    fn test_asset_substitution_replaces_url_type_and_size() {
        let patch = DocumentPatch {
            asset: Some(AssetRef {
                url: "blob:abc".into(),
                kind: "DOCX".into(),
                size: "1.1 MB".into(),
            }),
            ..Default::default()
        };
        let doc = biodata().apply(&patch);
        assert_eq!(doc.file_url, "blob:abc");
        assert_eq!(doc.file_type, "DOCX");
        assert_eq!(doc.file_size, "1.1 MB");
        assert_eq!(doc.title, "Biodata");
        assert_eq!(doc.identity(), biodata().identity());
    }

    #[test]
    fn test_merge_keeps_earlier_attributes() {
        let mut pending = DocumentPatch {
            title: Some("CV".into()),
            ..Default::default()
        };
        DocumentField::merge_patch(
            &mut pending,
            DocumentPatch {
                description: Some("Updated".into()),
                ..Default::default()
            },
        );
        assert_eq!(pending.title.as_deref(), Some("CV"));
        assert_eq!(pending.description.as_deref(), Some("Updated"));
    }

    #[test]
    fn test_describe_and_presentation() {
        assert_eq!(biodata().describe(), "PDF document • 250KB");
        assert_eq!(DOCUMENTS.lookup("pdf").icon, "picture_as_pdf");
        assert_eq!(DOCUMENTS.lookup("EXE").icon, "insert_drive_file");
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(biodata()).unwrap();
        assert_eq!(json["documentID"], 101);
        assert_eq!(json["fileType"], "PDF");
        assert_eq!(json["fileUrl"], "https://files.test/biodata.pdf");
    }
}
