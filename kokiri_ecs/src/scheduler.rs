//! Utilities for *schedulers* in ECS.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Unique identifier of the [`Scheduler`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchedulerId(Cow<'static, str>);

impl SchedulerId {
    /// Creates new identifier from given name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for SchedulerId {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SchedulerId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for SchedulerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named, ordered and gated group of systems.
///
/// Schedulers with lower `order` run first in a round. The gate is
/// evaluated anew every time the scheduler is reached, so it may be
/// backed by state changed from outside.
///
/// Clones share the gate; schedulers are identified by their [`SchedulerId`],
/// so a world accepts only clones of one scheduler under the same id.
///
#[derive(Clone)]
pub struct Scheduler {
    id: SchedulerId,
    order: i32,
    should_run: Rc<dyn Fn() -> bool>,
}

impl Scheduler {
    /// Creates new scheduler with given identifier, order and gate.
    pub fn new<F>(id: impl Into<SchedulerId>, order: i32, should_run: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self {
            id: id.into(),
            order,
            should_run: Rc::new(should_run),
        }
    }

    /// Creates new scheduler which runs on every tick.
    pub fn always(id: impl Into<SchedulerId>, order: i32) -> Self {
        Self::new(id, order, || true)
    }

    pub fn id(&self) -> &SchedulerId {
        &self.id
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    /// Evaluates the gate of this scheduler.
    pub fn should_run(&self) -> bool {
        (self.should_run)()
    }

    /// Returns `true` if `other` is this scheduler or a clone of it.
    pub fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
            && self.order == other.order
            && Rc::ptr_eq(&self.should_run, &other.should_run)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("id", &self.id)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
