//! Namespaced identifier type.

use std::fmt;
use std::str::FromStr;

use crate::{KeyError, Keyed, Namespaced, Result};

/// Identifier made of a namespace and a value, written as `namespace:value`.
///
/// Namespace may contain lowercase ASCII letters, digits, `_`, `-` and `.`;
/// value additionally allows `/`.
///
/// ```
/// use kokiri_key::Key;
///
/// let key: Key = "kokiri:systems/movement".parse().unwrap();
/// assert_eq!(key.namespace(), "kokiri");
/// assert_eq!(key.value(), "systems/movement");
/// assert_eq!(key, Key::new("kokiri", "systems/movement").unwrap());
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    namespace: String,
    value: String,
}

impl Key {
    /// Separator between namespace and value.
    pub const SEPARATOR: char = ':';

    /// Creates new key from its namespace and value.
    ///
    /// # Errors
    ///
    /// Returns an error if either part is empty or contains forbidden characters.
    ///
    pub fn new(namespace: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let value = value.into();
        if !is_valid(&namespace, false) {
            return Err(KeyError::InvalidNamespace(namespace));
        }
        if !is_valid(&value, true) {
            return Err(KeyError::InvalidValue(value));
        }
        Ok(Self { namespace, value })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

fn is_valid(part: &str, allow_slash: bool) -> bool {
    !part.is_empty()
        && part.chars().all(|c| {
            matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.') || (allow_slash && c == '/')
        })
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(Self::SEPARATOR) {
            Some((namespace, value)) if !namespace.is_empty() && !value.is_empty() => {
                Self::new(namespace, value)
            }
            _ => Err(KeyError::MissingSeparator(s.to_owned())),
        }
    }
}

impl TryFrom<&str> for Key {
    type Error = KeyError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, Self::SEPARATOR, self.value)
    }
}

impl Keyed for Key {
    fn key(&self) -> &Key {
        self
    }
}

impl Namespaced for Key {
    fn namespace(&self) -> &str {
        &self.namespace
    }
}
