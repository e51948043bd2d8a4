use serde::{Deserialize, Serialize};

use folio_common::{FieldId, Payload};

use crate::collection::{Presentation, PresentationTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(rename = "galleryID")]
    pub gallery_id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub file_size: String,
    pub file_type: String,
}

/// Replacing the image swaps both URLs; type and size are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

fn layer(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

fn fold(pending: &mut Option<String>, update: Option<String>) {
    if update.is_some() {
        *pending = update;
    }
}

impl Payload for GalleryImage {
    type Patch = GalleryPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(format!("gallery-{}", self.gallery_id))
    }

    fn presentation_key(&self) -> &str {
        &self.file_type
    }

    fn apply(&self, patch: &GalleryPatch) -> Self {
        let mut next = self.clone();
        layer(&mut next.title, &patch.title);
        layer(&mut next.description, &patch.description);
        layer(&mut next.image_url, &patch.image_url);
        layer(&mut next.thumbnail_url, &patch.thumbnail_url);
        next
    }

    fn merge_patch(pending: &mut GalleryPatch, update: GalleryPatch) {
        fold(&mut pending.title, update.title);
        fold(&mut pending.description, update.description);
        fold(&mut pending.image_url, update.image_url);
        fold(&mut pending.thumbnail_url, update.thumbnail_url);
    }

    fn describe(&self) -> String {
        format!("{} image • {}", self.file_type, self.file_size)
    }
}

pub static GALLERY: PresentationTable = PresentationTable::new(
    &[("GIF", Presentation::new("gif", "#7C3AED", "#EDE9FE"))],
    Presentation::new("image", "#7C3AED", "#EDE9FE"),
);
