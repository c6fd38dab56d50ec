//! Utilities for *components* in ECS.

use std::any::{self, Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use bundle::Bundle;
pub use handle::{AnyHandle, Handle};

mod bundle;
mod handle;
mod tests;

/// Objects of this trait represent *component* of ECS.
///
/// Components are matched by their concrete type. Besides that, a component
/// type may opt into *capabilities* (usually trait objects) so that queries
/// for the capability match it too:
///
/// ```
/// use kokiri_ecs::{Capabilities, Component};
///
/// trait Shape {
///     fn area(&self) -> f32;
/// }
///
/// struct Circle(f32);
///
/// impl Shape for Circle {
///     fn area(&self) -> f32 {
///         std::f32::consts::PI * self.0 * self.0
///     }
/// }
///
/// impl Component for Circle {
///     fn capabilities(capabilities: &mut Capabilities<Self>) {
///         capabilities.provide::<dyn Shape>(|circle| circle);
///     }
/// }
/// ```
///
pub trait Component: Any + Sized {
    /// Name of the component type, used for diagnostics.
    fn name() -> &'static str {
        any::type_name::<Self>()
    }

    /// Declares capabilities provided by this component type.
    ///
    /// Capabilities depend on the type only, never on the value.
    ///
    fn capabilities(_capabilities: &mut Capabilities<Self>) {}
}

/// Collects views under which a component of type `T` can be queried.
pub struct Capabilities<T>
where
    T: Component,
{
    inner: Rc<RefCell<T>>,
    views: Vec<View>,
}

impl<T> Capabilities<T>
where
    T: Component,
{
    fn new(inner: Rc<RefCell<T>>) -> Self {
        let views = vec![View::new(Handle::from_rc(Rc::clone(&inner)))];
        Self { inner, views }
    }

    /// Makes the component available to queries for capability `C`.
    ///
    /// `cast` only has to coerce the shared cell to the capability type,
    /// in most cases `|component| component` is enough.
    /// Repeated declarations of the same capability are ignored.
    ///
    pub fn provide<C>(&mut self, cast: fn(Rc<RefCell<T>>) -> Rc<RefCell<C>>) -> &mut Self
    where
        C: ?Sized + 'static,
    {
        let type_id = TypeId::of::<C>();
        if !self.views.iter().any(|view| view.type_id == type_id) {
            let handle = Handle::from_rc(cast(Rc::clone(&self.inner)));
            self.views.push(View::new(handle));
        }
        self
    }
}

/// Type-erased handle of a component under one of its views.
struct View {
    type_id: TypeId,
    handle: Box<dyn Any>,
}

impl View {
    fn new<C>(handle: Handle<C>) -> Self
    where
        C: ?Sized + 'static,
    {
        Self {
            type_id: TypeId::of::<C>(),
            handle: Box::new(handle),
        }
    }
}

/// Component stored in the table, together with all its views.
///
/// The first view is always the concrete type of the component.
///
pub(crate) struct StoredComponent {
    handle: AnyHandle,
    views: Vec<View>,
}

impl StoredComponent {
    fn new<T>(component: T) -> Self
    where
        T: Component,
    {
        let inner = Rc::new(RefCell::new(component));
        let mut capabilities = Capabilities::new(Rc::clone(&inner));
        T::capabilities(&mut capabilities);
        Self {
            handle: AnyHandle::new(Handle::from_rc(inner), T::name()),
            views: capabilities.views,
        }
    }

    /// [`TypeId`] of the concrete type of the component.
    pub fn type_id(&self) -> TypeId {
        self.handle.type_id()
    }

    pub fn handle(&self) -> &AnyHandle {
        &self.handle
    }

    /// Type ids of every view of this component.
    pub fn view_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.views.iter().map(|view| view.type_id)
    }

    /// Returns the handle of the component viewed as `C`, if it provides `C`.
    pub fn view<C>(&self) -> Option<Handle<C>>
    where
        C: ?Sized + 'static,
    {
        let type_id = TypeId::of::<C>();
        self.views
            .iter()
            .find(|view| view.type_id == type_id)
            .and_then(|view| view.handle.downcast_ref::<Handle<C>>())
            .cloned()
    }
}

/// Owned component with its type erased.
///
/// Used to build component lists at runtime, see [`Bundle`].
///
pub struct ComponentBox(StoredComponent);

impl ComponentBox {
    /// Erases the type of given component.
    pub fn new<T>(component: T) -> Self
    where
        T: Component,
    {
        Self(StoredComponent::new(component))
    }

    /// [`TypeId`] of the concrete type of the component.
    pub fn type_id(&self) -> TypeId {
        self.0.type_id()
    }

    /// Name of the concrete type of the component.
    pub fn name(&self) -> &'static str {
        self.0.handle.name()
    }

    pub(crate) fn into_stored(self) -> StoredComponent {
        self.0
    }
}

impl fmt::Debug for ComponentBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ComponentBox").field(&self.name()).finish()
    }
}
