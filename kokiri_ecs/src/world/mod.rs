//! Utilities for storage of ECS.

use std::borrow::Cow;
use std::fmt;

use crate::system::{notify, AnySystem};
use crate::{Bundle, Entity, Error, Hook, HookEvent, Result, Scheduler, System, Table};


/// System registered within the world together with its scheduler.
struct Association {
    scheduler: Scheduler,
    system: Box<dyn AnySystem>,
}

/// Storage for entities, components, systems and hooks of ECS.
///
/// World drives ticking: every [`tick`](World::tick) moves the cursor to
/// the next scheduler in ascending `order` and runs one step of it if its
/// gate allows. When the cursor moves past the last scheduler, the round
/// is complete and the next tick starts a new one.
///
pub struct World {
    /// Table with all entities and their components.
    table: Table,
    /// Systems with their schedulers, in registration order.
    systems: Vec<Association>,
    /// Hooks in registration order, which is also the order of their invocation.
    hooks: Vec<Hook>,
    /// Next candidate for automatically generated entity id.
    next_entity: u64,
    /// Scheduler currently in control of execution flow.
    current: Option<Scheduler>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            table: Table::new(),
            systems: Vec::new(),
            hooks: Vec::new(),
            next_entity: 0,
            current: None,
        }
    }

    /// Adds new entity with given components.
    ///
    /// If `id` is `None`, new identifier is generated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntity`] if an entity with given `id`
    /// already exists; the table stays untouched then.
    ///
    pub fn add_entity<B>(&mut self, id: impl Into<Option<Entity>>, bundle: B) -> Result<&mut Self>
    where
        B: Bundle,
    {
        let entity = match id.into() {
            Some(entity) if self.table.exists(entity) => {
                log::warn!("entity {} was rejected: id is already taken", entity);
                return Err(Error::DuplicateEntity(entity));
            }
            Some(entity) => entity,
            None => self.generate_entity(),
        };
        self.table.add_all(entity, bundle);
        log::debug!("entity {} added", entity);
        Ok(self)
    }

    /// Adds new entity with generated id and given components.
    pub fn spawn<B>(&mut self, bundle: B) -> Entity
    where
        B: Bundle,
    {
        let entity = self.generate_entity();
        self.table.add_all(entity, bundle);
        log::debug!("entity {} spawned", entity);
        entity
    }

    /// Generated ids grow monotonically, skipping ids taken explicitly.
    fn generate_entity(&mut self) -> Entity {
        loop {
            let entity = Entity::new(self.next_entity);
            self.next_entity += 1;
            if !self.table.exists(entity) {
                return entity;
            }
        }
    }

    /// Removes the entity with all its components.
    ///
    /// Returns `true` if the entity existed.
    ///
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        let removed = self.table.remove(entity);
        if removed {
            log::debug!("entity {} removed", entity);
        }
        removed
    }

    /// Registers system to be run by given scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if scheduler id is empty
    /// or is already taken by a scheduler which is not a clone of given one.
    ///
    pub fn add_system<S>(&mut self, scheduler: Scheduler, system: S) -> Result<&mut Self>
    where
        S: System,
    {
        if scheduler.id().is_empty() {
            return Err(Error::InvalidArgument("scheduler id must not be empty"));
        }
        let taken = self.systems.iter().any(|association| {
            association.scheduler.id() == scheduler.id()
                && !association.scheduler.is_same(&scheduler)
        });
        if taken {
            log::warn!(
                "system `{}` was rejected: scheduler id `{}` is taken by another scheduler",
                System::name(&system),
                scheduler.id(),
            );
            return Err(Error::InvalidArgument(
                "scheduler id is already taken by another scheduler",
            ));
        }
        log::debug!(
            "system `{}` registered for scheduler `{}`",
            System::name(&system),
            scheduler.id(),
        );
        self.systems.push(Association {
            scheduler,
            system: Box::new(system),
        });
        Ok(self)
    }

    /// Constructs system from the table of this world and registers it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if scheduler is rejected by [`World::add_system`].
    ///
    pub fn add_system_with<S, F>(&mut self, scheduler: Scheduler, factory: F) -> Result<&mut Self>
    where
        S: System,
        F: FnOnce(&Table) -> S,
    {
        let system = factory(&self.table);
        self.add_system(scheduler, system)
    }

    /// Registers hook, which will be invoked after all previously registered ones.
    pub fn add_hook(&mut self, hook: Hook) -> &mut Self {
        log::debug!("hook `{}` registered", hook.name());
        self.hooks.push(hook);
        self
    }

    /// Table with all entities and their components.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns iterator over registered systems with their schedulers, in registration order.
    pub fn systems(&self) -> impl Iterator<Item = (&Scheduler, Cow<'static, str>)> + '_ {
        self.systems
            .iter()
            .map(|association| (&association.scheduler, association.system.name()))
    }

    /// Registered hooks, in invocation order.
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// Scheduler currently in control of execution flow, if any.
    pub fn current_scheduler(&self) -> Option<&Scheduler> {
        self.current.as_ref()
    }

    /// Distinct schedulers with at least one system, sorted by ascending order.
    ///
    /// Schedulers with equal order keep the order of their first registration.
    ///
    pub fn schedulers(&self) -> Vec<&Scheduler> {
        let mut schedulers: Vec<&Scheduler> = Vec::new();
        for association in &self.systems {
            let scheduler = &association.scheduler;
            if !schedulers.iter().any(|known| known.id() == scheduler.id()) {
                schedulers.push(scheduler);
            }
        }
        schedulers.sort_by_key(|scheduler| scheduler.order());
        schedulers
    }

    /// Moves the cursor to the next scheduler.
    ///
    /// Without running scheduler cursor moves to the first one; after the
    /// last one there is no running scheduler anymore.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSystems`] if no system was registered.
    ///
    pub fn advance(&mut self) -> Result<()> {
        if self.systems.is_empty() {
            return Err(Error::NoSystems);
        }
        let next = {
            let schedulers = self.schedulers();
            let position = match &self.current {
                None => Some(0),
                Some(current) => schedulers
                    .iter()
                    .position(|scheduler| scheduler.id() == current.id())
                    .map(|position| position + 1),
            };
            position
                .and_then(|position| schedulers.get(position))
                .map(|&scheduler| scheduler.clone())
        };
        self.current = next;
        Ok(())
    }

    /// Ticks the world once.
    ///
    /// Advances the cursor and, if the gate of the reached scheduler allows,
    /// runs one step of it. Returns `false` if the round is complete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSystems`] if no system was registered,
    /// or any error produced by systems or hooks during the step.
    ///
    pub fn tick(&mut self) -> Result<bool> {
        self.advance()?;
        let Some(scheduler) = self.current.clone() else {
            log::trace!("round is complete");
            return Ok(false);
        };
        if scheduler.should_run() {
            self.step(&scheduler)?;
        } else {
            log::trace!("scheduler `{}` skipped", scheduler.id());
        }
        Ok(true)
    }

    /// Ticks the world until the current round is complete.
    ///
    /// Returns the number of schedulers reached during the round.
    ///
    pub fn run_round(&mut self) -> Result<usize> {
        let mut reached = 0;
        while self.tick()? {
            reached += 1;
        }
        Ok(reached)
    }

    /// Executes a single step of all systems of given scheduler.
    ///
    /// Scheduler without systems in this world makes the step a no-op,
    /// hooks are not notified then.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by systems or hooks;
    /// the rest of the step is not executed then.
    ///
    pub fn step(&mut self, scheduler: &Scheduler) -> Result<()> {
        let associated = self
            .systems
            .iter()
            .any(|association| association.scheduler.id() == scheduler.id());
        if !associated {
            log::trace!("scheduler `{}` has no systems", scheduler.id());
            return Ok(());
        }

        log::trace!("step of scheduler `{}`", scheduler.id());
        let Self {
            table,
            systems,
            hooks,
            ..
        } = self;

        notify(hooks, &HookEvent::PreTick { scheduler })?;
        for association in systems
            .iter_mut()
            .filter(|association| association.scheduler.id() == scheduler.id())
        {
            association.system.run(scheduler, table, hooks)?;
        }
        notify(hooks, &HookEvent::PostTick { scheduler })
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.table.len())
            .field("systems", &self.systems.len())
            .field("hooks", &self.hooks)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
