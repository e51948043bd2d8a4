use serde::Serialize;

use folio_common::{Field, FieldId, Payload};

use super::Section;
use crate::collection::{DashboardField, EditSession};
use crate::errors::SectionError;

/// Edit context for one section.
///
/// Holds the field list as it was loaded; `save` folds the session over
/// that snapshot, so concurrent edits elsewhere are overwritten. A
/// successful save reseeds both from the committed list.
pub struct Dashboard<'a, P: Payload> {
    section: &'a Section<P>,
    account_id: i64,
    group: String,
    original: Vec<Field<P>>,
    session: EditSession<P>,
}

/// What an editor renders: the session plus the fields as currently edited.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", bound = "P: Payload")]
pub struct DashboardSnapshot<P: Payload> {
    #[serde(rename = "accountID")]
    pub account_id: i64,
    pub group: String,
    pub session: EditSession<P>,
    pub fields: Vec<DashboardField<P>>,
}

impl<'a, P: Payload> Dashboard<'a, P> {
    pub async fn open(section: &'a Section<P>) -> Result<Self, SectionError> {
        let envelope = section.raw().await?;
        let session = section.open_session_from(&envelope.data.field_list);
        tracing::info!(
            group = section.slug(),
            session = %session.session_id,
            fields = session.len(),
            "opened dashboard"
        );
        Ok(Self {
            section,
            account_id: envelope.data.account_id,
            group: envelope.data.group,
            original: envelope.data.field_list,
            session,
        })
    }

    pub fn session(&self) -> &EditSession<P> {
        &self.session
    }

    pub fn toggle(&mut self, id: &FieldId, enabled: bool) -> Result<(), SectionError> {
        Ok(self.session.toggle(id, enabled)?)
    }

    pub fn edit(&mut self, id: &FieldId, patch: P::Patch) -> Result<(), SectionError> {
        Ok(self.session.edit(id, patch)?)
    }

    pub fn reorder(&mut self, source: usize, dest: Option<usize>) {
        self.session.reorder(source, dest);
    }

    pub fn fields(&self) -> Vec<DashboardField<P>> {
        self.session.current()
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    pub fn snapshot(&self) -> DashboardSnapshot<P> {
        DashboardSnapshot {
            account_id: self.account_id,
            group: self.group.clone(),
            session: self.session.clone(),
            fields: self.fields(),
        }
    }

    /// Commit the session. On error the store is unchanged and the
    /// dashboard keeps its pending edits so the user can retry.
    ///
    /// On success the dashboard is clean again: a second `save` without
    /// further edits commits nothing new but still raises the flag.
    pub async fn save(&mut self) -> Result<Vec<Field<P>>, SectionError> {
        let fields = self
            .section
            .commit(&self.original, &self.session)
            .await
            .inspect_err(|e| tracing::error!(group = self.section.slug(), error = %e, "dashboard save failed"))?;
        self.session = self.section.open_session_from(&fields);
        self.original = fields.clone();
        Ok(fields)
    }
}
