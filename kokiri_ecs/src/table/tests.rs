#![cfg(test)]

use super::*;
use crate::{Capabilities, Capability};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position(i32, i32);

impl Component for Position {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity(i32, i32);

impl Component for Velocity {}

#[derive(Debug, PartialEq)]
struct Health(u32);

impl Component for Health {}

trait Describe {
    fn describe(&self) -> String;
}

struct Door;

impl Describe for Door {
    fn describe(&self) -> String {
        "door".to_owned()
    }
}

impl Component for Door {
    fn capabilities(capabilities: &mut Capabilities<Self>) {
        capabilities.provide::<dyn Describe>(|door| door);
    }
}

struct Lamp(bool);

impl Describe for Lamp {
    fn describe(&self) -> String {
        format!("lamp ({})", if self.0 { "on" } else { "off" })
    }
}

impl Component for Lamp {
    fn capabilities(capabilities: &mut Capabilities<Self>) {
        capabilities.provide::<dyn Describe>(|lamp| lamp);
    }
}

fn entities<Q: Query>(table: &Table) -> Vec<u64> {
    table
        .find::<Q>()
        .into_iter()
        .map(|matched| matched.entity.id())
        .collect()
}

#[test]
fn test_add_all_and_get_all() {
    let mut table = Table::new();
    let entity = Entity::new(3);
    table.add_all(entity, (Position(0, 0), Velocity(1, 2), Health(10)));

    let components = table.get_all(entity).unwrap();
    let names: Vec<_> = components.iter().map(AnyHandle::name).collect();
    assert_eq!(names.len(), 3);
    assert!(names[0].ends_with("Position"));
    assert!(names[1].ends_with("Velocity"));
    assert!(names[2].ends_with("Health"));
    assert_eq!(*components[1].downcast::<Velocity>().unwrap().borrow(), Velocity(1, 2));

    assert!(table.get_all(Entity::new(4)).is_none());
}

#[test]
fn test_empty_entity() {
    let mut table = Table::new();
    let entity = Entity::new(0);
    table.add_all(entity, ());

    assert!(table.exists(entity));
    assert_eq!(table.get_all(entity).unwrap().len(), 0);
    assert!(table.has_all::<()>(entity));
    assert!(table.find::<()>().is_empty());
    assert_eq!(table.len(), 1);
}

#[test]
fn test_remove() {
    let mut table = Table::new();
    let entity = Entity::new(1);
    table.add_all(entity, (Position(1, 1), Door));
    table.add(Entity::new(2), Position(2, 2));

    assert!(table.remove(entity));
    assert!(!table.exists(entity));
    assert!(table.get_all(entity).is_none());
    assert!(!table.has::<Position>(entity));
    assert_eq!(entities::<(Position,)>(&table), [2]);
    assert!(table.find::<(Capability<dyn Describe>,)>().is_empty());
    assert!(!table.remove(entity));
}

#[test]
fn test_find_matches_has_all() {
    let mut table = Table::new();
    table.add_all(Entity::new(5), (Position(0, 0), Velocity(1, 0)));
    table.add_all(Entity::new(1), (Velocity(0, 1), Position(3, 3), Health(1)));
    table.add_all(Entity::new(3), (Position(2, 2),));
    table.add_all(Entity::new(4), (Health(7), Velocity(9, 9)));

    let found = entities::<(Position, Velocity)>(&table);
    assert_eq!(found, [1, 5]);
    for entity in table.entities() {
        assert_eq!(
            table.has_all::<(Position, Velocity)>(entity),
            found.contains(&entity.id()),
        );
    }
    assert_eq!(found, entities::<(Position, Velocity)>(&table));
    assert_eq!(table.count::<(Position, Velocity)>(), 2);
    assert_eq!(table.count::<(Health,)>(), 2);
    assert_eq!(table.count::<()>(), 0);
}

#[test]
fn test_find_keeps_query_order() {
    let mut table = Table::new();
    table.add_all(Entity::new(1), (Velocity(4, 5), Position(6, 7)));

    let matches = table.find::<(Position, Velocity)>();
    let (position, velocity) = matches[0].components.clone();
    assert_eq!(*position.borrow(), Position(6, 7));
    assert_eq!(*velocity.borrow(), Velocity(4, 5));
}

#[test]
fn test_find_unknown_type() {
    let mut table = Table::new();
    table.add(Entity::new(1), Position(0, 0));
    assert!(table.find::<(Position, Health)>().is_empty());
    assert!(table.find::<(Health,)>().is_empty());
}

#[test]
fn test_overwrite_replaces_in_place() {
    let mut table = Table::new();
    let entity = Entity::new(8);
    table.add_all(entity, (Position(0, 0), Health(3)));
    let old = table.get::<Position>(entity).unwrap();

    let replaced = table.add(entity, Position(9, 9)).unwrap();
    assert!(replaced.ptr_eq(&old));
    assert_eq!(*old.borrow(), Position(0, 0));

    let components = table.get_all(entity).unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(*components[0].downcast::<Position>().unwrap().borrow(), Position(9, 9));
    assert!(table.add(entity, Velocity(1, 1)).is_none());
}

#[test]
fn test_handles_are_live() {
    let mut table = Table::new();
    let entity = Entity::new(2);
    table.add(entity, Health(10));

    let first = table.get::<Health>(entity).unwrap();
    first.borrow_mut().0 -= 4;

    let (second,) = table.find::<(Health,)>().remove(0).components;
    assert_eq!(*second.borrow(), Health(6));
    assert!(first.ptr_eq(&second));
}

#[test]
fn test_capability() {
    let mut table = Table::new();
    table.add_all(Entity::new(1), (Door, Position(0, 0)));
    table.add_all(Entity::new(2), (Lamp(true),));
    table.add_all(Entity::new(3), (Position(1, 1),));

    assert!(table.has::<Capability<dyn Describe>>(Entity::new(2)));
    assert!(!table.has::<Capability<dyn Describe>>(Entity::new(3)));
    assert!(!table.has::<Door>(Entity::new(2)));

    let descriptions: Vec<_> = table
        .find::<(Capability<dyn Describe>,)>()
        .into_iter()
        .map(|matched| {
            let (component,) = matched.components;
            let description = component.borrow().describe();
            description
        })
        .collect();
    assert_eq!(descriptions, ["door", "lamp (on)"]);
    assert_eq!(
        entities::<(Capability<dyn Describe>, Position)>(&table),
        [1]
    );
}
