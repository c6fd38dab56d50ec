//! Utilities for *hooks* in ECS.

use std::borrow::Cow;
use std::fmt;

use crate::{AnyHandle, BoxError, Entity, Scheduler};

type Callback = Box<dyn FnMut(&HookEvent<'_>) -> Result<(), BoxError>>;

/// Kind of the point in the tick lifecycle a hook can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    PreTick,
    PostTick,
    PreSystemUpdate,
    PostSystemUpdate,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::PreTick => "pre tick",
            Self::PostTick => "post tick",
            Self::PreSystemUpdate => "pre system update",
            Self::PostSystemUpdate => "post system update",
        };
        f.write_str(name)
    }
}

/// Entity selected by a system together with its matched components.
#[derive(Debug, Clone)]
pub struct Selected {
    pub entity: Entity,
    /// Concrete components matched by the query of the system, in query order.
    pub components: Vec<AnyHandle>,
}

/// Event delivered to hooks.
#[derive(Debug, Clone, Copy)]
pub enum HookEvent<'a> {
    /// Step of the scheduler is about to run its systems.
    PreTick { scheduler: &'a Scheduler },
    /// Step of the scheduler has run all its systems.
    PostTick { scheduler: &'a Scheduler },
    /// System is about to update matched entities.
    PreSystemUpdate {
        scheduler: &'a Scheduler,
        system: &'a str,
        selected: &'a [Selected],
    },
    /// System has updated all matched entities.
    PostSystemUpdate {
        scheduler: &'a Scheduler,
        system: &'a str,
        selected: &'a [Selected],
    },
}

impl HookEvent<'_> {
    pub fn kind(&self) -> HookKind {
        match self {
            Self::PreTick { .. } => HookKind::PreTick,
            Self::PostTick { .. } => HookKind::PostTick,
            Self::PreSystemUpdate { .. } => HookKind::PreSystemUpdate,
            Self::PostSystemUpdate { .. } => HookKind::PostSystemUpdate,
        }
    }

    /// Scheduler whose step produced this event.
    pub fn scheduler(&self) -> &Scheduler {
        match *self {
            Self::PreTick { scheduler }
            | Self::PostTick { scheduler }
            | Self::PreSystemUpdate { scheduler, .. }
            | Self::PostSystemUpdate { scheduler, .. } => scheduler,
        }
    }
}

/// Observer invoked around tick and system update boundaries.
///
/// Hook listens only to the kinds of events it has a callback for.
/// Failure of a callback aborts the current step.
///
/// ```
/// use kokiri_ecs::Hook;
///
/// let hook = Hook::new("trace").on_pre_tick(|event| {
///     println!("stepping {}", event.scheduler().id());
///     Ok(())
/// });
/// ```
///
pub struct Hook {
    name: Cow<'static, str>,
    pre_tick: Option<Callback>,
    post_tick: Option<Callback>,
    pre_system_update: Option<Callback>,
    post_system_update: Option<Callback>,
}

impl Hook {
    /// Creates new hook without any callbacks.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            pre_tick: None,
            post_tick: None,
            pre_system_update: None,
            post_system_update: None,
        }
    }

    /// Sets callback which runs before systems of the scheduler step.
    pub fn on_pre_tick<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HookEvent<'_>) -> Result<(), BoxError> + 'static,
    {
        self.pre_tick = Some(Box::new(callback));
        self
    }

    /// Sets callback which runs after systems of the scheduler step.
    pub fn on_post_tick<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HookEvent<'_>) -> Result<(), BoxError> + 'static,
    {
        self.post_tick = Some(Box::new(callback));
        self
    }

    /// Sets callback which runs before a system updates its matched entities.
    pub fn on_pre_system_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HookEvent<'_>) -> Result<(), BoxError> + 'static,
    {
        self.pre_system_update = Some(Box::new(callback));
        self
    }

    /// Sets callback which runs after a system updated its matched entities.
    pub fn on_post_system_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HookEvent<'_>) -> Result<(), BoxError> + 'static,
    {
        self.post_system_update = Some(Box::new(callback));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this hook has a callback for events of given kind.
    pub fn listens_to(&self, kind: HookKind) -> bool {
        self.callback(kind).is_some()
    }

    fn callback(&self, kind: HookKind) -> Option<&Callback> {
        match kind {
            HookKind::PreTick => self.pre_tick.as_ref(),
            HookKind::PostTick => self.post_tick.as_ref(),
            HookKind::PreSystemUpdate => self.pre_system_update.as_ref(),
            HookKind::PostSystemUpdate => self.post_system_update.as_ref(),
        }
    }

    pub(crate) fn notify(&mut self, event: &HookEvent<'_>) -> Result<(), BoxError> {
        let callback = match event.kind() {
            HookKind::PreTick => &mut self.pre_tick,
            HookKind::PostTick => &mut self.post_tick,
            HookKind::PreSystemUpdate => &mut self.pre_system_update,
            HookKind::PostSystemUpdate => &mut self.post_system_update,
        };
        match callback {
            Some(callback) => callback(event),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kinds = [
            HookKind::PreTick,
            HookKind::PostTick,
            HookKind::PreSystemUpdate,
            HookKind::PostSystemUpdate,
        ];
        let listens: Vec<_> = kinds
            .into_iter()
            .filter(|&kind| self.listens_to(kind))
            .collect();
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("listens", &listens)
            .finish()
    }
}
