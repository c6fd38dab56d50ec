//! Utilities for registry error handling.

use thiserror::Error;

/// Result of any registry operation which can fail.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Key already holds a different value.
    #[error("{key} is already bound to {bound}, cannot bind to {value}")]
    AlreadyBound {
        key: String,
        bound: String,
        value: String,
    },

    /// Holder has no value bound yet.
    #[error("no value bound to {0}")]
    Unbound(String),
}
