//! Shared handles to components stored in the table.

use std::any::{Any, TypeId};
use std::cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Shared handle to the live instance of a component.
///
/// Every handle obtained from the [`Table`](crate::Table) for the same stored
/// component points to the same value, so changes made through one handle
/// are observed by all the others.
///
/// `T` may be unsized: a handle to a capability such as `Handle<dyn Shape>`
/// refers to the same instance as the handle of its concrete type.
///
pub struct Handle<T>(Rc<RefCell<T>>)
where
    T: ?Sized;

impl<T> Handle<T>
where
    T: ?Sized,
{
    pub(crate) fn from_rc(inner: Rc<RefCell<T>>) -> Self {
        Self(inner)
    }

    /// Immutably borrows the component.
    ///
    /// # Panics
    ///
    /// Panics if the component is currently mutably borrowed.
    ///
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrows the component.
    ///
    /// # Panics
    ///
    /// Panics if the component is currently borrowed.
    ///
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Immutably borrows the component, failing if it is mutably borrowed.
    pub fn try_borrow(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.0.try_borrow()
    }

    /// Mutably borrows the component, failing if it is borrowed.
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, T>, BorrowMutError> {
        self.0.try_borrow_mut()
    }

    /// Returns `true` if both handles refer to the same component instance.
    pub fn ptr_eq<U>(&self, other: &Handle<U>) -> bool
    where
        U: ?Sized,
    {
        Rc::as_ptr(&self.0).cast::<()>() == Rc::as_ptr(&other.0).cast::<()>()
    }
}

impl<T> Clone for Handle<T>
where
    T: ?Sized,
{
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Handle<T>
where
    T: ?Sized + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => f.debug_tuple("Handle").field(&&*value).finish(),
            Err(_) => f.write_str("Handle(<borrowed>)"),
        }
    }
}

/// Type-erased [`Handle`] to a component of any type.
#[derive(Clone)]
pub struct AnyHandle {
    inner: Rc<dyn Any>,
    type_id: TypeId,
    name: &'static str,
}

impl AnyHandle {
    pub(crate) fn new<T>(handle: Handle<T>, name: &'static str) -> Self
    where
        T: Any,
    {
        let inner: Rc<dyn Any> = handle.0;
        Self {
            inner,
            type_id: TypeId::of::<T>(),
            name,
        }
    }

    /// [`TypeId`] of the concrete type of the component.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the concrete type of the component.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the component is of type `T`.
    pub fn is<T>(&self) -> bool
    where
        T: Any,
    {
        self.type_id == TypeId::of::<T>()
    }

    /// Recovers the typed handle, if the component is of type `T`.
    pub fn downcast<T>(&self) -> Option<Handle<T>>
    where
        T: Any,
    {
        Rc::clone(&self.inner)
            .downcast::<RefCell<T>>()
            .ok()
            .map(Handle)
    }

    /// Returns `true` if both handles refer to the same component instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.inner).cast::<()>() == Rc::as_ptr(&other.inner).cast::<()>()
    }
}

impl fmt::Debug for AnyHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AnyHandle").field("type", &self.name).finish()
    }
}
