//! Typed error hierarchy for folio.
//!
//! - `CollectionError`: edit-session and reverse-transform failures
//! - `SectionError`: section service failures (store, collection, routing)
//!
//! Store failures live in `folio_common::StoreError`.

use folio_common::StoreError;
use thiserror::Error;

/// Errors from editing a collection or folding a session back into it.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Field '{id}' is not part of this section")]
    UnknownField { id: String },

    #[error("Field '{id}' appears more than once in the session order")]
    DuplicateField { id: String },

    #[error("Field '{id}' is missing from the session order")]
    MissingField { id: String },
}

/// Errors from a section service.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("Unknown profile group '{0}'")]
    UnknownGroup(String),

    #[error("Invalid edit session: {0}")]
    InvalidSession(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("Failed to encode section data: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_error_unknown_field_carries_id() {
        let err = CollectionError::UnknownField { id: "fax".into() };
        match &err {
            CollectionError::UnknownField { id } => assert_eq!(id, "fax"),
            _ => panic!("Expected UnknownField"),
        }
        assert!(err.to_string().contains("fax"));
    }

    #[test]
    fn section_error_converts_from_collection_error() {
        let inner = CollectionError::DuplicateField { id: "email".into() };
        let err: SectionError = inner.into();
        match &err {
            SectionError::Collection(CollectionError::DuplicateField { id }) => {
                assert_eq!(id, "email");
            }
            _ => panic!("Expected SectionError::Collection(DuplicateField)"),
        }
    }

    #[test]
    fn section_error_converts_from_store_error() {
        let err: SectionError = StoreError::Unavailable("timeout".into()).into();
        assert!(matches!(err, SectionError::Store(StoreError::Unavailable(_))));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn section_error_variants_are_distinct() {
        let group = SectionError::UnknownGroup("pets".into());
        let session = SectionError::InvalidSession("bad json".into());
        assert!(matches!(group, SectionError::UnknownGroup(_)));
        assert!(!matches!(session, SectionError::UnknownGroup(_)));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&CollectionError::MissingField { id: "x".into() });
        assert_std_error(&SectionError::UnknownGroup("x".into()));
    }
}
