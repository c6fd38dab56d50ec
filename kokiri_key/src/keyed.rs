//! Traits for types identified by a [`Key`].

use crate::Key;

/// Something that has an associated [`Key`].
pub trait Keyed {
    fn key(&self) -> &Key;
}

/// Something that belongs to a namespace.
pub trait Namespaced {
    fn namespace(&self) -> &str;
}

impl<T> Keyed for &T
where
    T: Keyed + ?Sized,
{
    fn key(&self) -> &Key {
        (**self).key()
    }
}
