//! Error types for cmdgen core collections.

use std::fmt;
use thiserror::Error;

/// Error type for unique collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An item with the same unique key is already stored.
    #[error("duplicate key {key}: {item}")]
    DuplicateKey {
        /// Debug rendering of the conflicting key.
        key: String,
        /// Debug rendering of the rejected item.
        item: String,
    },

    /// No stored item matches the probed key.
    #[error("item with key {key} does not exist")]
    NotFound {
        /// Debug rendering of the probed key.
        key: String,
    },
}

impl CollectionError {
    /// Creates a duplicate key error.
    pub fn duplicate(key: &impl fmt::Debug, item: &impl fmt::Debug) -> Self {
        Self::DuplicateKey {
            key: format!("{key:?}"),
            item: format!("{item:?}"),
        }
    }

    /// Creates a not found error.
    pub fn not_found(key: &impl fmt::Debug) -> Self {
        Self::NotFound {
            key: format!("{key:?}"),
        }
    }

    /// Returns true if this is a duplicate key error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

/// Result type alias for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
