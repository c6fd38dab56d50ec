#![cfg(test)]

use super::*;
use crate::{Capability, Entity, Table};

trait Shape {
    fn area(&self) -> f32;
}

trait Scalable {
    fn scale(&mut self, factor: f32);
}

#[derive(Debug, PartialEq)]
struct Square(f32);

impl Shape for Square {
    fn area(&self) -> f32 {
        self.0 * self.0
    }
}

impl Scalable for Square {
    fn scale(&mut self, factor: f32) {
        self.0 *= factor;
    }
}

impl Component for Square {
    fn capabilities(capabilities: &mut Capabilities<Self>) {
        capabilities
            .provide::<dyn Shape>(|square| square)
            .provide::<dyn Scalable>(|square| square)
            .provide::<dyn Shape>(|square| square);
    }
}

#[derive(Debug, PartialEq)]
struct Label(String);

impl Component for Label {}

#[test]
fn test_views() {
    let component = ComponentBox::new(Square(2.0)).into_stored();
    let views: Vec<_> = component.view_ids().collect();
    assert_eq!(
        views,
        [
            TypeId::of::<Square>(),
            TypeId::of::<dyn Shape>(),
            TypeId::of::<dyn Scalable>(),
        ]
    );
    assert_eq!(component.type_id(), TypeId::of::<Square>());
    assert!(component.view::<dyn Shape>().is_some());
    assert!(component.view::<Label>().is_none());
}

#[test]
fn test_views_share_instance() {
    let component = ComponentBox::new(Square(2.0)).into_stored();
    let scalable = component.view::<dyn Scalable>().unwrap();
    let shape = component.view::<dyn Shape>().unwrap();
    let square = component.handle().downcast::<Square>().unwrap();

    scalable.borrow_mut().scale(3.0);
    assert_eq!(shape.borrow().area(), 36.0);
    assert_eq!(*square.borrow(), Square(6.0));
    assert!(square.ptr_eq(&shape));
}

#[test]
#[should_panic]
fn test_conflicting_borrows() {
    let component = ComponentBox::new(Square(1.0)).into_stored();
    let shape = component.view::<dyn Shape>().unwrap();
    let square = component.handle().downcast::<Square>().unwrap();

    let _area = shape.borrow();
    square.borrow_mut().0 = 2.0;
}

#[test]
fn test_try_borrow() {
    let component = ComponentBox::new(Square(1.0)).into_stored();
    let shape = component.view::<dyn Shape>().unwrap();
    let scalable = component.view::<dyn Scalable>().unwrap();

    let area = shape.try_borrow().unwrap();
    assert!(scalable.try_borrow_mut().is_err());
    drop(area);
    assert!(scalable.try_borrow_mut().is_ok());
}

#[test]
fn test_component_box() {
    let component = ComponentBox::new(Label("player".to_owned()));
    assert_eq!(component.type_id(), TypeId::of::<Label>());
    assert!(component.name().ends_with("Label"));

    let handle = component.into_stored().handle().clone();
    assert!(handle.is::<Label>());
    assert!(handle.downcast::<Square>().is_none());
    assert_eq!(*handle.downcast::<Label>().unwrap().borrow(), Label("player".to_owned()));
}

#[test]
fn test_bundle() {
    let components = (Label("a".to_owned()), Square(1.0)).into_components();
    let types: Vec<_> = components.iter().map(ComponentBox::type_id).collect();
    assert_eq!(types, [TypeId::of::<Label>(), TypeId::of::<Square>()]);
    assert!(().into_components().is_empty());

    let runtime = vec![ComponentBox::new(Square(1.0))];
    assert_eq!(runtime.into_components().len(), 1);
}

#[test]
fn test_capability_query() {
    let mut table = Table::new();
    table.add(Entity::new(1), Square(1.0));
    table.add(Entity::new(2), Label("no shape".to_owned()));
    table.add(Entity::new(3), Square(2.0));

    let areas: Vec<_> = table
        .find::<(Capability<dyn Shape>,)>()
        .into_iter()
        .map(|matched| {
            let (shape,) = matched.components;
            let area = shape.borrow().area();
            (matched.entity.id(), area)
        })
        .collect();
    assert_eq!(areas, [(1, 1.0), (3, 4.0)]);
}
