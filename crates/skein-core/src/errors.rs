//! Core error types
//!
//! Errors from identifier validation and feed model construction.

use thiserror::Error;

/// Errors from foundation type validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A DID failed validation.
    #[error("invalid did '{value}': {reason}")]
    InvalidDid {
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// An at:// record URI failed validation.
    #[error("invalid at-uri '{value}': {reason}")]
    InvalidAtUri {
        /// The rejected input
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A record URI named a collection this core does not model.
    #[error("unsupported collection '{collection}' in '{value}'")]
    UnsupportedCollection {
        /// The collection segment of the URI
        collection: String,
        /// The full rejected input
        value: String,
    },

    /// A thread item was constructed without any posts.
    #[error("a thread item requires at least one post")]
    EmptyThread,
}

impl CoreError {
    /// Shorthand for an invalid DID.
    pub fn invalid_did(value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidDid {
            value: value.into(),
            reason,
        }
    }

    /// Shorthand for an invalid at:// URI.
    pub fn invalid_at_uri(value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidAtUri {
            value: value.into(),
            reason,
        }
    }
}
