//! Shared domain types for folio profile sections.
//!
//! Every section stores an ordered list of [`Field`]s whose payload type
//! implements [`Payload`]. The wire shape is the [`GroupEnvelope`].

pub mod envelope;
pub mod error;
pub mod field;

pub use envelope::{GroupData, GroupEnvelope, GroupUpdate};
pub use error::StoreError;
pub use field::{Field, FieldId, Payload};
