//! Small simulation showing how to build and drive a world.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use kokiri_ecs::{
    BoxError, Capabilities, Capability, Component, Entity, Handle, Hook, HookEvent, Scheduler,
    System, Table, World,
};
use kokiri_key::Key;
use kokiri_registry::{Registry, RegistryError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Component for Position {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Component for Velocity {}

/// Number of aging steps left before the entity disappears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime(pub u32);

impl Component for Lifetime {}

/// Anything which can describe itself in the report.
pub trait Describe {
    fn describe(&self) -> String;
}

#[derive(Debug)]
pub struct Label(pub &'static str);

impl Describe for Label {
    fn describe(&self) -> String {
        self.0.to_owned()
    }
}

impl Component for Label {
    fn capabilities(capabilities: &mut Capabilities<Self>) {
        capabilities.provide::<dyn Describe>(|label| label);
    }
}

#[derive(Debug)]
pub struct Beacon {
    pub frequency: u32,
}

impl Describe for Beacon {
    fn describe(&self) -> String {
        format!("beacon at {} Hz", self.frequency)
    }
}

impl Component for Beacon {
    fn capabilities(capabilities: &mut Capabilities<Self>) {
        capabilities.provide::<dyn Describe>(|beacon| beacon);
    }
}

/// Moves every entity by its velocity.
pub struct Movement;

impl System for Movement {
    type Query = (Position, Velocity);

    fn update(
        &mut self,
        _table: &mut Table,
        _entity: Entity,
        (position, velocity): (Handle<Position>, Handle<Velocity>),
    ) -> Result<(), BoxError> {
        let velocity = *velocity.borrow();
        let mut position = position.borrow_mut();
        position.x += velocity.dx;
        position.y += velocity.dy;
        Ok(())
    }
}

/// Removes entities whose lifetime has run out.
pub struct Aging;

impl System for Aging {
    type Query = (Lifetime,);

    fn update(
        &mut self,
        table: &mut Table,
        entity: Entity,
        (lifetime,): (Handle<Lifetime>,),
    ) -> Result<(), BoxError> {
        let left = {
            let mut lifetime = lifetime.borrow_mut();
            lifetime.0 = lifetime.0.saturating_sub(1);
            lifetime.0
        };
        if left == 0 {
            table.remove(entity);
            log::info!("entity {} expired", entity);
        }
        Ok(())
    }
}

/// Logs every describable entity with a position.
#[derive(Default)]
pub struct Report {
    lines: usize,
}

impl System for Report {
    type Query = (Capability<dyn Describe>, Position);

    fn update(
        &mut self,
        _table: &mut Table,
        entity: Entity,
        (describe, position): (Handle<dyn Describe>, Handle<Position>),
    ) -> Result<(), BoxError> {
        let description = describe.borrow().describe();
        let position = *position.borrow();
        self.lines += 1;
        log::info!(
            "#{} entity {}: {} at ({:.1}, {:.1})",
            self.lines,
            entity,
            description,
            position.x,
            position.y,
        );
        Ok(())
    }
}

/// Creates hook which traces duration of every scheduler step.
pub fn timing_hook() -> Hook {
    let started = Rc::new(Cell::new(None));
    let start = Rc::clone(&started);
    Hook::new("timing")
        .on_pre_tick(move |_| {
            start.set(Some(Instant::now()));
            Ok(())
        })
        .on_post_tick(move |event| {
            if let Some(started) = started.take() {
                log::trace!(
                    "scheduler `{}` took {:?}",
                    event.scheduler().id(),
                    started.elapsed(),
                );
            }
            Ok(())
        })
        .on_post_system_update(|event| {
            if let HookEvent::PostSystemUpdate {
                system, selected, ..
            } = event
            {
                log::debug!("system `{}` updated {} entities", system, selected.len());
            }
            Ok(())
        })
}

/// Registers orders of all schedulers used by the simulation.
pub fn scheduler_orders() -> Result<Registry<Key, i32>, BoxError> {
    let mut orders: Registry<Key, i32> = Registry::new();
    orders.register("kokiri:update".parse::<Key>()?, 1)?;
    orders.register("kokiri:cleanup".parse::<Key>()?, 2)?;
    orders.register("kokiri:report".parse::<Key>()?, 3)?;
    Ok(orders)
}

fn scheduler(orders: &Registry<Key, i32>, value: &str) -> Result<Scheduler, BoxError> {
    let key = Key::new("kokiri", value)?;
    let holder = orders
        .get(&key)
        .ok_or_else(|| RegistryError::Unbound(key.to_string()))?;
    let order = *holder.value_or_err()?;
    Ok(Scheduler::always(key.to_string(), order))
}

/// Builds the world of the simulation.
///
/// Report runs only on even rounds, as counted by `round`.
///
pub fn world(round: Rc<Cell<u32>>) -> Result<World, BoxError> {
    let orders = scheduler_orders()?;
    let update = scheduler(&orders, "update")?;
    let cleanup = scheduler(&orders, "cleanup")?;
    let report = scheduler(&orders, "report")?;
    let report = Scheduler::new(report.id().clone(), report.order(), move || {
        round.get() % 2 == 0
    });

    let mut world = World::new();
    world
        .add_entity(
            None,
            (
                Label("scout"),
                Position { x: 0.0, y: 0.0 },
                Velocity { dx: 1.0, dy: 0.5 },
            ),
        )?
        .add_entity(
            None,
            (
                Beacon { frequency: 440 },
                Position { x: 5.0, y: 5.0 },
                Lifetime(3),
            ),
        )?
        .add_entity(
            None,
            (Position { x: -2.0, y: 1.0 }, Velocity { dx: 0.0, dy: -1.0 }),
        )?
        .add_system(update, Movement)?
        .add_system(cleanup, Aging)?
        .add_system_with(report, |table| {
            log::debug!("report starts with {} entities", table.len());
            Report::default()
        })?
        .add_hook(timing_hook());
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_orders() {
        let orders = scheduler_orders().unwrap();
        let keys: Vec<_> = orders.keys().map(Key::to_string).collect();
        assert_eq!(keys, ["kokiri:update", "kokiri:cleanup", "kokiri:report"]);

        let report = scheduler(&orders, "report").unwrap();
        assert_eq!(report.id().as_str(), "kokiri:report");
        assert_eq!(report.order(), 3);

        let error = scheduler(&orders, "render").unwrap_err();
        assert_eq!(error.to_string(), "no value bound to kokiri:render");
        assert_eq!(orders.len(), 3);
    }

    #[test]
    fn test_simulation() {
        let round = Rc::new(Cell::new(1));
        let mut world = world(Rc::clone(&round)).unwrap();
        assert_eq!(world.schedulers().len(), 3);

        for _ in 0..3 {
            assert_eq!(world.run_round().unwrap(), 3);
            round.set(round.get() + 1);
        }

        let scout = world.table().get::<Position>(Entity::new(0)).unwrap();
        assert_eq!(*scout.borrow(), Position { x: 3.0, y: 1.5 });
        assert!(!world.table().exists(Entity::new(1)));
        assert_eq!(world.table().len(), 2);
        assert_eq!(world.table().count::<(Capability<dyn Describe>,)>(), 1);
    }
}
