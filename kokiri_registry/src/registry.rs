//! Registry of holders.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::{Holder, RegistryError, Result};

/// Map of keys to [`Holder`]s, where every value can be written only once.
///
/// Holders are shared, so a holder obtained before the registration of
/// its value observes the value as soon as it is registered.
///
pub struct Registry<K, V> {
    holders: HashMap<K, Rc<Holder<K, V>>>,
    /// Keys in order of their first appearance.
    keys: Vec<K>,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            holders: HashMap::new(),
            keys: Vec::new(),
        }
    }

    /// Retrieves the holder for the key, if one was registered or created.
    pub fn get(&self, key: &K) -> Option<Rc<Holder<K, V>>> {
        self.holders.get(key).cloned()
    }

    /// Retrieves the holder for the key, creating an unbound lazy one if needed.
    pub fn get_or_create(&mut self, key: K) -> Rc<Holder<K, V>> {
        if let Some(holder) = self.holders.get(&key) {
            return Rc::clone(holder);
        }
        let holder = Rc::new(Holder::lazy(key.clone()));
        self.insert(key, Rc::clone(&holder));
        holder
    }

    /// Registers value for the key.
    ///
    /// Binds the value to the lazy holder created earlier for this key, if any.
    /// Registering a value equal to the bound one is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyBound`] if a different value is already bound.
    ///
    pub fn register(&mut self, key: K, value: V) -> Result<Rc<Holder<K, V>>>
    where
        K: fmt::Display,
        V: PartialEq + fmt::Display,
    {
        let Some(holder) = self.get(&key) else {
            log::debug!("{} registered", key);
            let holder = Rc::new(Holder::immediate(key.clone(), value));
            self.insert(key, Rc::clone(&holder));
            return Ok(holder);
        };

        match holder.value() {
            Some(bound) if *bound == value => {}
            Some(bound) => {
                return Err(RegistryError::AlreadyBound {
                    key: key.to_string(),
                    bound: bound.to_string(),
                    value: value.to_string(),
                });
            }
            None => {
                log::debug!("{} bound to lazy holder", key);
                holder.bind(value);
            }
        }
        Ok(holder)
    }

    fn insert(&mut self, key: K, holder: Rc<Holder<K, V>>) {
        self.keys.push(key.clone());
        self.holders.insert(key, holder);
    }

    /// Returns iterator over all keys in order of their first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.keys.iter()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.holders.contains_key(key)
    }

    /// Number of holders, bound or not.
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Registry<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let holders = self.keys.iter().filter_map(|key| self.holders.get(key));
        f.debug_list().entries(holders).finish()
    }
}
