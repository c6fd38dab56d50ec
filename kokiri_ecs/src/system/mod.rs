//! Utilities for *systems* in ECS.

use std::any;
use std::borrow::Cow;

use crate::{BoxError, Entity, Error, Hook, HookEvent, Result, Scheduler, Selected, Table};

pub use query::{Capability, Fetch, Match, Query};

mod query;

/// Objects of this trait represent *system* of ECS.
///
/// Each step of its scheduler, system selects the entities to work with
/// and then updates them one by one. The table is passed into every call,
/// so system keeps only its own private state.
///
pub trait System: 'static {
    /// Component types which will be handled by this system.
    type Query: Query;

    /// Name of the system, used for diagnostics.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name(any::type_name::<Self>()))
    }

    /// Selects entities which will be updated during the current step.
    ///
    /// Selection is done once per step, before any update,
    /// so the returned list is not affected by the updates.
    ///
    fn select(&mut self, table: &Table) -> Vec<Match<Self::Query>> {
        table.find::<Self::Query>()
    }

    /// Updates the entity using its matched components.
    ///
    /// Components may be changed in place through their handles;
    /// entities may be added to or removed from the table.
    ///
    fn update(
        &mut self,
        table: &mut Table,
        entity: Entity,
        components: <Self::Query as Query>::Item,
    ) -> std::result::Result<(), BoxError>;
}

/// Object safe counterpart of [`System`] stored by the world.
pub(crate) trait AnySystem {
    fn name(&self) -> Cow<'static, str>;

    fn run(&mut self, scheduler: &Scheduler, table: &mut Table, hooks: &mut [Hook]) -> Result<()>;
}

impl<S> AnySystem for S
where
    S: System,
{
    fn name(&self) -> Cow<'static, str> {
        System::name(self)
    }

    fn run(&mut self, scheduler: &Scheduler, table: &mut Table, hooks: &mut [Hook]) -> Result<()> {
        let name = System::name(self);
        let matches = self.select(table);
        if matches.is_empty() {
            log::trace!("system `{}` matched no entities", name);
            return Ok(());
        }

        let type_ids = S::Query::type_ids();
        let selected: Vec<_> = matches
            .iter()
            .map(|&Match { entity, .. }| Selected {
                entity,
                components: type_ids
                    .iter()
                    .filter_map(|&type_id| table.get_any(entity, type_id))
                    .collect(),
            })
            .collect();
        log::trace!("system `{}` updates {} entities", name, selected.len());
        notify(
            hooks,
            &HookEvent::PreSystemUpdate {
                scheduler,
                system: &name,
                selected: &selected,
            },
        )?;
        for Match { entity, components } in matches {
            self.update(table, entity, components)
                .map_err(|source| Error::SystemUpdate {
                    system: name.to_string(),
                    entity,
                    source,
                })?;
        }
        notify(
            hooks,
            &HookEvent::PostSystemUpdate {
                scheduler,
                system: &name,
                selected: &selected,
            },
        )
    }
}

/// Delivers the event to every hook in order, stopping at the first failure.
pub(crate) fn notify(hooks: &mut [Hook], event: &HookEvent<'_>) -> Result<()> {
    for hook in hooks {
        hook.notify(event).map_err(|source| Error::Hook {
            hook: hook.name().to_string(),
            kind: event.kind(),
            source,
        })?;
    }
    Ok(())
}

/// Strips the module path from a type name, keeping generic arguments intact
/// (e.g. `game::systems::Movement` becomes `Movement`).
fn short_type_name(full: &str) -> &str {
    let path = full.split('<').next().unwrap_or(full);
    match path.rfind("::") {
        Some(index) => &full[index + 2..],
        None => full,
    }
}
