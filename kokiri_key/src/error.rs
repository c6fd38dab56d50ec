//! Utilities for key error handling.

use thiserror::Error;

/// Result of key creation or parsing.
pub type Result<T> = std::result::Result<T, KeyError>;

/// Error returned when a [`Key`](crate::Key) cannot be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid format of `{0}`, expected `namespace:value`")]
    MissingSeparator(String),

    #[error("namespace `{0}` must consist of `a-z`, `0-9`, `_`, `-` or `.`")]
    InvalidNamespace(String),

    #[error("value `{0}` must consist of `a-z`, `0-9`, `_`, `-`, `.` or `/`")]
    InvalidValue(String),
}
