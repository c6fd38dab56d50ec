//! Holders of registered values.

use std::cell::OnceCell;
use std::fmt;

use crate::{RegistryError, Result};

/// The way a [`Holder`] was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolderKind {
    /// Value was available at the time of creation.
    Immediate,
    /// Value is bound later, so holder may be referenced before registration.
    Lazy,
}

/// Holder of a value registered for some key.
///
/// Value of the holder can be bound only once and never changes after that.
///
pub struct Holder<K, V> {
    key: K,
    kind: HolderKind,
    value: OnceCell<V>,
}

impl<K, V> Holder<K, V> {
    pub(crate) fn immediate(key: K, value: V) -> Self {
        Self {
            key,
            kind: HolderKind::Immediate,
            value: OnceCell::from(value),
        }
    }

    pub(crate) fn lazy(key: K) -> Self {
        Self {
            key,
            kind: HolderKind::Lazy,
            value: OnceCell::new(),
        }
    }

    /// Binds the value if nothing is bound yet.
    ///
    /// Returns `false` if some value was already bound.
    ///
    pub(crate) fn bind(&self, value: V) -> bool {
        self.value.set(value).is_ok()
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn kind(&self) -> HolderKind {
        self.kind
    }

    /// Returns `true` if this holder has a value bound.
    pub fn is_bound(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn value(&self) -> Option<&V> {
        self.value.get()
    }

    /// Returns the bound value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unbound`] if no value is bound yet.
    ///
    pub fn value_or_err(&self) -> Result<&V>
    where
        K: fmt::Display,
    {
        self.value()
            .ok_or_else(|| RegistryError::Unbound(self.key.to_string()))
    }
}

impl<K, V> fmt::Debug for Holder<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Holder")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("value", &self.value.get())
            .finish()
    }
}
