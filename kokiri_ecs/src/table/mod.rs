//! Storage and query engine of ECS.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use slotmap::{new_key_type, HopSlotMap};

use crate::component::StoredComponent;
use crate::{AnyHandle, Bundle, Component, ComponentBox, Entity, Fetch, Handle, Match, Query};

mod tests;

new_key_type! {
    /// Unique identifier of the stored *component* of ECS.
    struct ComponentID;
}

/// Storage for all entities and their components.
///
/// Every entity owns an ordered list of components, at most one per
/// concrete component type: attaching a component of a type the entity
/// already has replaces the previous one in place.
///
/// Besides that, table keeps an index from every view (concrete type or
/// capability) to the set of entities having it, which drives [`Table::find`].
///
#[derive(Default)]
pub struct Table {
    /// Components are actually stored here.
    components: HopSlotMap<ComponentID, StoredComponent>,
    entity_to_components: BTreeMap<Entity, Vec<ComponentID>>,
    view_to_entities: HashMap<TypeId, BTreeSet<Entity>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            components: HopSlotMap::with_key(),
            entity_to_components: BTreeMap::new(),
            view_to_entities: HashMap::new(),
        }
    }

    /// Attaches component to the entity, creating the entity if needed.
    ///
    /// Returns previously attached component of the same type, if any.
    ///
    pub fn add<T>(&mut self, entity: Entity, component: T) -> Option<Handle<T>>
    where
        T: Component,
    {
        let replaced = self.insert(entity, ComponentBox::new(component))?;
        replaced.handle().downcast()
    }

    /// Attaches all components of the bundle to the entity,
    /// creating the entity even if the bundle is empty.
    pub fn add_all<B>(&mut self, entity: Entity, bundle: B)
    where
        B: Bundle,
    {
        self.entity_to_components.entry(entity).or_default();
        for component in bundle.into_components() {
            self.insert(entity, component);
        }
    }

    fn insert(&mut self, entity: Entity, component: ComponentBox) -> Option<StoredComponent> {
        let component = component.into_stored();
        let type_id = component.type_id();
        for view in component.view_ids() {
            self.view_to_entities.entry(view).or_default().insert(entity);
        }

        let ids = self.entity_to_components.entry(entity).or_default();
        let existing = ids
            .iter()
            .copied()
            .find(|&id| self.components[id].type_id() == type_id);
        match existing {
            // Same concrete type provides the same views, index stays valid.
            Some(id) => Some(std::mem::replace(&mut self.components[id], component)),
            None => {
                let id = self.components.insert(component);
                ids.push(id);
                None
            }
        }
    }

    /// Returns `true` if the entity exists in the table.
    pub fn exists(&self, entity: Entity) -> bool {
        self.entity_to_components.contains_key(&entity)
    }

    /// Returns `true` if the entity has a component matching `F`.
    pub fn has<F>(&self, entity: Entity) -> bool
    where
        F: Fetch,
    {
        self.has_view(entity, TypeId::of::<F::Target>())
    }

    /// Returns `true` if the entity has components matching every element of `Q`.
    pub fn has_all<Q>(&self, entity: Entity) -> bool
    where
        Q: Query,
    {
        self.exists(entity)
            && Q::type_ids()
                .iter()
                .all(|&type_id| self.has_view(entity, type_id))
    }

    fn has_view(&self, entity: Entity, type_id: TypeId) -> bool {
        self.view_to_entities
            .get(&type_id)
            .map_or(false, |entities| entities.contains(&entity))
    }

    /// Retrieves the first component of the entity matching `F`.
    pub fn get<F>(&self, entity: Entity) -> Option<Handle<F::Target>>
    where
        F: Fetch,
    {
        self.entity_to_components
            .get(&entity)?
            .iter()
            .find_map(|&id| self.components[id].view::<F::Target>())
    }

    /// Retrieves the first component of the entity having given view, type-erased.
    pub(crate) fn get_any(&self, entity: Entity, view: TypeId) -> Option<AnyHandle> {
        self.entity_to_components
            .get(&entity)?
            .iter()
            .map(|&id| &self.components[id])
            .find(|component| component.view_ids().any(|id| id == view))
            .map(|component| component.handle().clone())
    }

    /// Retrieves all components of the entity in the order they were attached.
    pub fn get_all(&self, entity: Entity) -> Option<Vec<AnyHandle>> {
        let ids = self.entity_to_components.get(&entity)?;
        let handles = ids
            .iter()
            .map(|&id| self.components[id].handle().clone())
            .collect();
        Some(handles)
    }

    /// Finds every entity having components matching all elements of `Q`.
    ///
    /// Matched components are returned in query order, entities are
    /// returned in ascending order, so repeated calls without mutation
    /// in between yield equal results. Empty query matches nothing.
    ///
    pub fn find<Q>(&self) -> Vec<Match<Q>>
    where
        Q: Query,
    {
        let type_ids = Q::type_ids();
        let mut candidates = Vec::with_capacity(type_ids.len());
        for type_id in type_ids.iter() {
            match self.view_to_entities.get(type_id) {
                Some(entities) => candidates.push(entities),
                None => return Vec::new(),
            }
        }
        let Some(rarest) = candidates.iter().min_by_key(|entities| entities.len()) else {
            return Vec::new();
        };

        rarest
            .iter()
            .filter(|&entity| candidates.iter().all(|entities| entities.contains(entity)))
            .filter_map(|&entity| {
                let components = Q::fetch(self, entity)?;
                Some(Match { entity, components })
            })
            .collect()
    }

    /// Number of entities which would be returned by [`Table::find`] for `Q`.
    pub fn count<Q>(&self) -> usize
    where
        Q: Query,
    {
        if Q::type_ids().is_empty() {
            return 0;
        }
        self.entities().filter(|&entity| self.has_all::<Q>(entity)).count()
    }

    /// Removes the entity together with all its components.
    ///
    /// Returns `true` if the entity existed.
    ///
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(ids) = self.entity_to_components.remove(&entity) else {
            return false;
        };
        for id in ids {
            let Some(component) = self.components.remove(id) else {
                continue;
            };
            for view in component.view_ids() {
                if let Some(entities) = self.view_to_entities.get_mut(&view) {
                    entities.remove(&entity);
                    if entities.is_empty() {
                        self.view_to_entities.remove(&view);
                    }
                }
            }
        }
        true
    }

    /// Returns iterator over all entities in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entity_to_components.keys().copied()
    }

    /// Number of entities in the table.
    pub fn len(&self) -> usize {
        self.entity_to_components.len()
    }

    /// Returns `true` if the table contains no entities.
    pub fn is_empty(&self) -> bool {
        self.entity_to_components.is_empty()
    }
}
