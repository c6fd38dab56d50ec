//! Utilities for queries of *systems* in ECS.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use crate::{Component, Entity, Handle, Table};

/// Single element of a [`Query`].
///
/// Implemented for every [`Component`] type, which matches components of
/// exactly that type, and for [`Capability`], which matches every component
/// providing the capability.
///
pub trait Fetch: 'static {
    /// Type the matched component is viewed as.
    type Target: ?Sized + 'static;
}

impl<T> Fetch for T
where
    T: Component,
{
    type Target = T;
}

/// Query element matching every component which provides capability `C`.
///
/// ```ignore
/// let shapes = table.find::<(Capability<dyn Shape>,)>();
/// ```
///
pub struct Capability<C>(PhantomData<fn() -> Box<C>>)
where
    C: ?Sized;

impl<C> Fetch for Capability<C>
where
    C: ?Sized + 'static,
{
    type Target = C;
}

/// Set of component types requested from the [`Table`].
///
/// Describes which types are matched and in which order
/// the matched components are returned.
///
pub trait Query: 'static {
    /// Tuple of handles to the matched components, in query order.
    type Item: Clone;

    /// Array of [`TypeId`]s which represents set of types in this query.
    fn type_ids() -> Box<[TypeId]>;

    /// Retrieves matched components of the entity, if it has all of them.
    fn fetch(table: &Table, entity: Entity) -> Option<Self::Item>;
}

// Generate implementations of Query for empty tuple (unit type)
// and for tuples up to 8 elements.

impl Query for () {
    type Item = ();

    fn type_ids() -> Box<[TypeId]> {
        Box::from([])
    }

    fn fetch(table: &Table, entity: Entity) -> Option<Self::Item> {
        table.exists(entity).then_some(())
    }
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name),+> Query for ($($name,)+)
        where
            $($name: Fetch,)+
        {
            type Item = ($(Handle<<$name as Fetch>::Target>,)+);

            fn type_ids() -> Box<[TypeId]> {
                Box::from([$(TypeId::of::<<$name as Fetch>::Target>()),+])
            }

            fn fetch(table: &Table, entity: Entity) -> Option<Self::Item> {
                Some(($(table.get::<$name>(entity)?,)+))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);
impl_query!(A, B, C, D, E, F, G);
impl_query!(A, B, C, D, E, F, G, H);

/// Entity matched by a [`Query`] together with its components.
pub struct Match<Q>
where
    Q: Query,
{
    /// Entity which owns the components.
    pub entity: Entity,
    /// Handles to the matched components, in query order.
    pub components: Q::Item,
}

impl<Q> Clone for Match<Q>
where
    Q: Query,
{
    fn clone(&self) -> Self {
        Self {
            entity: self.entity,
            components: self.components.clone(),
        }
    }
}

impl<Q> fmt::Debug for Match<Q>
where
    Q: Query,
    Q::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Match")
            .field("entity", &self.entity)
            .field("components", &self.components)
            .finish()
    }
}
