use thiserror::Error;

/// Failures reported by a canonical field store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_carries_message() {
        let err = StoreError::Unavailable("network down".into());
        assert!(err.to_string().contains("network down"));
    }

    #[test]
    fn test_store_error_is_std_error() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&StoreError::LockPoisoned);
    }
}
