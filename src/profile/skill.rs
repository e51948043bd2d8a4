use serde::{Deserialize, Serialize};

use folio_common::{FieldId, Payload};

use crate::collection::{Presentation, PresentationTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillField {
    #[serde(rename = "skillSetID")]
    pub skill_set_id: i64,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub level: String,
}

/// Name, description and duration are editable; the level is not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Payload for SkillField {
    type Patch = SkillPatch;

    fn identity(&self) -> FieldId {
        FieldId::new(format!("skill-{}", self.skill_set_id))
    }

    fn presentation_key(&self) -> &str {
        &self.level
    }

    fn apply(&self, patch: &SkillPatch) -> Self {
        Self {
            name: patch.label.clone().unwrap_or_else(|| self.name.clone()),
            description: patch.description.clone().unwrap_or_else(|| self.description.clone()),
            duration: patch.duration.clone().unwrap_or_else(|| self.duration.clone()),
            ..self.clone()
        }
    }

    fn merge_patch(pending: &mut SkillPatch, update: SkillPatch) {
        pending.label = update.label.or(pending.label.take());
        pending.description = update.description.or(pending.description.take());
        pending.duration = update.duration.or(pending.duration.take());
    }

    fn describe(&self) -> String {
        format!("{} level skill • {} experience", self.level, self.duration)
    }
}

/// Keyed by proficiency level.
pub static SKILLS: PresentationTable = PresentationTable::new(
    &[
        ("Beginner", Presentation::new("star_outline", "#64748B", "#F1F5F9")),
        ("Intermediate", Presentation::new("star_half", "#F59E0B", "#FEF3C7")),
        ("Advanced", Presentation::new("star", "#3B82F6", "#DBEAFE")),
        ("Expert", Presentation::new("workspace_premium", "#8B5CF6", "#EDE9FE")),
    ],
    Presentation::new("psychology", "#617289", "#F3F4F6"),
);
