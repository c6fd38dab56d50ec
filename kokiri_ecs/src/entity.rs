//! Utilities for *entities* in ECS.

use std::fmt;

/// Unique identifier of the *entity* of ECS.
///
/// Entity has no structure of its own: it only groups components
/// stored inside of the [`Table`](crate::Table).
/// Identifiers are never reused automatically.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u64);

impl Entity {
    /// Creates entity with given identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier of this entity.
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl From<u64> for Entity {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Entity> for u64 {
    fn from(entity: Entity) -> Self {
        entity.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let mut entities = vec![Entity::new(7), Entity::from(2), Entity::new(5)];
        entities.sort();
        let ids: Vec<u64> = entities.into_iter().map(u64::from).collect();
        assert_eq!(ids, [2, 5, 7]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity::new(42).to_string(), "42");
        assert_eq!(Entity::default().id(), 0);
    }
}
