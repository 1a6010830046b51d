use thiserror::Error;

use crate::page::MAX_LIMIT;

/// Convenient result alias for the catalog library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a page is requested with a limit outside `1..=MAX_LIMIT`.
    #[error("page limit {limit} is outside the allowed range 1..={max}", max = MAX_LIMIT)]
    InvalidPage { limit: u32 },

    /// Raised when a record handed to a writable store violates an entity invariant.
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },

    /// Wrapper for document store failures (connection loss, timeouts, decode errors).
    #[error(transparent)]
    Storage(#[from] mongodb::error::Error),
}

impl Error {
    /// Whether the error originated in the document store rather than in the caller's input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_page_mentions_bounds() {
        let err = Error::InvalidPage { limit: 101 };
        let message = err.to_string();
        assert!(message.contains("101"));
        assert!(message.contains("1..=100"));
        assert!(!err.is_storage());
    }

    #[test]
    fn invalid_record_carries_message() {
        let err = Error::InvalidRecord {
            message: "amount must be non-negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid record: amount must be non-negative"
        );
    }
}
