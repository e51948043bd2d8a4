//! One profile section: a store, its collection transforms and its
//! staleness channel wired together.
//!
//! | Module      | Responsibility                                        |
//! |-------------|-------------------------------------------------------|
//! | `dashboard` | edit context: load session, mutate, save               |
//! | `display`   | read context: cached view refreshed on staleness      |
//! | `service`   | object-safe JSON facade used by the registry and HTTP |

pub mod dashboard;
pub mod display;
pub mod service;

use std::sync::Arc;

use serde_json::Value;

use folio_common::{Field, GroupEnvelope, Payload};

use crate::collection::{EditSession, OrderedEditableCollection, PresentationTable, UnknownFieldPolicy, ViewRecord};
use crate::errors::SectionError;
use crate::staleness::{Freshness, Invalidation, InvalidationBus, StaleFlags, StalenessChannel, flag_name};
use crate::store::FieldStore;

pub use dashboard::{Dashboard, DashboardSnapshot};
pub use display::{DisplayState, DisplayView};
pub use service::SectionService;

/// Turns the view records of a section into the JSON shown to displays.
pub type ViewShape<P> = fn(Vec<ViewRecord<P>>) -> serde_json::Result<Value>;

fn flat_list<P: Payload>(records: Vec<ViewRecord<P>>) -> serde_json::Result<Value> {
    serde_json::to_value(records)
}

pub struct Section<P: Payload> {
    slug: &'static str,
    store: Arc<dyn FieldStore<P>>,
    collection: OrderedEditableCollection<P>,
    channel: Arc<StalenessChannel>,
    bus: InvalidationBus,
    shape: ViewShape<P>,
}

impl<P: Payload> Section<P> {
    pub fn new(
        slug: &'static str,
        store: Arc<dyn FieldStore<P>>,
        presentation: &'static PresentationTable,
        policy: UnknownFieldPolicy,
        flags: &StaleFlags,
        bus: InvalidationBus,
    ) -> Self {
        Self {
            slug,
            store,
            collection: OrderedEditableCollection::new(presentation, policy),
            channel: flags.channel(&flag_name(slug)),
            bus,
            shape: flat_list::<P>,
        }
    }

    /// Replace the default flat list with a custom display shape.
    pub fn with_view_shape(mut self, shape: ViewShape<P>) -> Self {
        self.shape = shape;
        self
    }

    pub fn slug(&self) -> &'static str {
        self.slug
    }

    pub fn channel(&self) -> &StalenessChannel {
        &self.channel
    }

    pub fn policy(&self) -> UnknownFieldPolicy {
        self.collection.policy()
    }

    /// Read path: visible fields, sorted, with presentation metadata.
    pub async fn view(&self) -> Result<Vec<ViewRecord<P>>, SectionError> {
        let envelope = self.store.read().await?;
        Ok(self.collection.to_view(&envelope.data.field_list))
    }

    pub(crate) fn shape(&self, records: Vec<ViewRecord<P>>) -> Result<Value, SectionError> {
        Ok((self.shape)(records)?)
    }

    /// Full stored envelope, hidden fields included.
    pub async fn raw(&self) -> Result<GroupEnvelope<P>, SectionError> {
        Ok(self.store.read().await?)
    }

    pub async fn open_session(&self) -> Result<EditSession<P>, SectionError> {
        let envelope = self.store.read().await?;
        Ok(self.open_session_from(&envelope.data.field_list))
    }

    pub(crate) fn open_session_from(&self, fields: &[Field<P>]) -> EditSession<P> {
        self.collection.to_edit_session(fields)
    }

    pub async fn open_dashboard(&self) -> Result<Dashboard<'_, P>, SectionError> {
        Dashboard::open(self).await
    }

    /// A display with its own staleness flag, raised by every commit.
    pub fn display(&self) -> DisplayView<'_, P> {
        DisplayView::new(self)
    }

    /// Fold `session` over `original`, replace the stored list, then raise
    /// the staleness flag and publish an invalidation.
    ///
    /// Nothing is signalled when the replace fails.
    pub async fn commit(&self, original: &[Field<P>], session: &EditSession<P>) -> Result<Vec<Field<P>>, SectionError> {
        let fields = self.collection.from_edit_session(original, session)?;
        self.store.replace(fields.clone()).await?;

        self.channel.commit();
        self.bus
            .publish(Invalidation::new(self.slug, self.channel.name(), session.session_id));
        tracing::info!(
            group = self.slug,
            session = %session.session_id,
            fields = fields.len(),
            "committed edit session"
        );
        Ok(fields)
    }

    /// Commit against a fresh read of the store instead of a snapshot held by
    /// the caller. Used when the session arrives over the wire.
    pub async fn commit_against_store(&self, session: &EditSession<P>) -> Result<Vec<Field<P>>, SectionError> {
        let envelope = self.store.read().await?;
        self.commit(&envelope.data.field_list, session).await
    }

    /// Read-then-clear the section's shared named flag. Displays consume
    /// their own subscribed flags instead.
    pub fn consume(&self) -> Freshness {
        self.channel.consume()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::profile::text::TextPatch;
    use folio_common::FieldId;

    #[tokio::test]
    async fn test_view_hides_hidden_fields() {
        let section = contact_section(UnknownFieldPolicy::Skip, InvalidationBus::new(4));
        let view = section.view().await.unwrap();
        let ids: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["mobile", "email"]);
    }

    #[tokio::test]
    async fn test_commit_replaces_flags_and_publishes() {
        let bus = InvalidationBus::new(4);
        let mut rx = bus.subscribe();
        let section = contact_section(UnknownFieldPolicy::Skip, bus);

        let mut session = section.open_session().await.unwrap();
        session.toggle(&FieldId::from("phone"), true).unwrap();
        session.edit(&FieldId::from("email"), TextPatch::value("new@folio.test")).unwrap();
        session.reorder(2, Some(0));
        let fields = section.commit_against_store(&session).await.unwrap();

        let ids: Vec<&str> = fields.iter().map(|f| f.payload.field.as_str()).collect();
        assert_eq!(ids, vec!["email", "mobile", "phone"]);
        assert_eq!(fields.iter().map(|f| f.order).collect::<Vec<_>>(), vec![1, 2, 3]);

        let raw = section.raw().await.unwrap();
        assert_eq!(raw.data.field_list, fields);
        assert_eq!(raw.data.account_id, 25);

        let inv = rx.recv().await.unwrap();
        assert_eq!(inv.group, "contact");
        assert_eq!(inv.flag, "contact-data-updated");
        assert_eq!(inv.session_id, session.session_id);

        assert_eq!(section.consume(), Freshness::Stale);
        assert_eq!(section.consume(), Freshness::Fresh);
    }

    #[tokio::test]
    async fn test_rejected_commit_signals_nothing() {
        let bus = InvalidationBus::new(4);
        let mut rx = bus.subscribe();
        let section = contact_section(UnknownFieldPolicy::Reject, bus);

        let mut session = section.open_session().await.unwrap();
        session.fields_order.push(FieldId::from("fax"));
        let err = section.commit_against_store(&session).await.unwrap_err();
        assert!(matches!(err, SectionError::Collection(_)));

        assert_eq!(section.consume(), Freshness::Fresh);
        assert!(rx.try_recv().is_err());
        assert_eq!(section.raw().await.unwrap().data.field_list, contact_fields());
    }

    #[tokio::test]
    async fn test_unchanged_session_commit_is_idempotent() {
        let section = contact_section(UnknownFieldPolicy::Skip, InvalidationBus::new(4));
        let session = section.open_session().await.unwrap();
        let first = section.commit_against_store(&session).await.unwrap();
        let second = section.commit_against_store(&section.open_session().await.unwrap()).await.unwrap();
        assert_eq!(first, contact_fields());
        assert_eq!(first, second);
    }
}
