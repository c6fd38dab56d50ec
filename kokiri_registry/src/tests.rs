#![cfg(test)]

use std::rc::Rc;

use kokiri_key::Key;

use super::*;

const EMPTY: &str = "empty";
const DEFAULT: i32 = 42;

#[test]
fn test_get_before_get_or_create() {
    let mut registry: Registry<&str, i32> = Registry::new();
    assert!(registry.get(&EMPTY).is_none());

    let holder = registry.get_or_create(EMPTY);
    assert_eq!(*holder.key(), EMPTY);
    // the unbound holder is now registered
    assert!(Rc::ptr_eq(&holder, &registry.get(&EMPTY).unwrap()));
    assert!(Rc::ptr_eq(&holder, &registry.get_or_create(EMPTY)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_immediate() {
    let mut registry = Registry::new();
    let holder = registry.register(EMPTY, DEFAULT).unwrap();

    assert_eq!(*holder.key(), EMPTY);
    assert_eq!(registry.keys().collect::<Vec<_>>(), [&EMPTY]);
    assert_eq!(holder.kind(), HolderKind::Immediate);
    assert!(holder.is_bound());
    assert_eq!(holder.value(), Some(&DEFAULT));
    assert_eq!(holder.value_or_err(), Ok(&DEFAULT));
    assert!(Rc::ptr_eq(&holder, &registry.get(&EMPTY).unwrap()));

    let error = registry.register(EMPTY, 69).unwrap_err();
    assert_eq!(error.to_string(), "empty is already bound to 42, cannot bind to 69");
    assert_eq!(holder.value(), Some(&DEFAULT));
}

#[test]
fn test_lazy() {
    let mut registry = Registry::new();
    let before = registry.get_or_create(EMPTY);

    assert_eq!(registry.keys().collect::<Vec<_>>(), [&EMPTY]);
    assert_eq!(before.kind(), HolderKind::Lazy);
    assert!(!before.is_bound());
    assert_eq!(before.value(), None);
    assert_eq!(
        before.value_or_err(),
        Err(RegistryError::Unbound("empty".to_owned())),
    );

    let after = registry.register(EMPTY, DEFAULT).unwrap();
    assert_eq!(after.kind(), HolderKind::Lazy);
    assert!(Rc::ptr_eq(&before, &after));
    assert!(before.is_bound());
    assert_eq!(before.value_or_err(), Ok(&DEFAULT));

    assert!(matches!(
        registry.register(EMPTY, 69),
        Err(RegistryError::AlreadyBound { .. })
    ));
}

#[test]
fn test_register_equal_value_again() {
    let mut registry = Registry::new();
    let first = registry.register(EMPTY, DEFAULT).unwrap();
    let second = registry.register(EMPTY, DEFAULT).unwrap();
    assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn test_same_value_with_different_keys() {
    let mut registry = Registry::new();
    let a = registry.register("a", DEFAULT).unwrap();
    let b = registry.register("b", DEFAULT).unwrap();

    assert!(!Rc::ptr_eq(&a, &b));
    assert_eq!(a.value_or_err(), b.value_or_err());
}

#[test]
fn test_keys() {
    let mut registry = Registry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.keys().count(), 0);

    registry.register("c", 3).unwrap();
    registry.get_or_create("a");
    registry.register("b", 2).unwrap();
    registry.register("a", 1).unwrap();

    assert_eq!(registry.keys().copied().collect::<Vec<_>>(), ["c", "a", "b"]);
    assert!(registry.contains_key(&"b"));
    assert!(!registry.contains_key(&"d"));
}

#[test]
fn test_namespaced_keys() {
    let mut registry: Registry<Key, &str> = Registry::default();
    let key: Key = "kokiri:schedulers/update".parse().unwrap();
    registry.register(key.clone(), "update").unwrap();

    let same: Key = Key::new("kokiri", "schedulers/update").unwrap();
    assert_eq!(registry.get(&same).unwrap().value(), Some(&"update"));

    let error = registry.register(same, "render").unwrap_err();
    assert_eq!(
        error.to_string(),
        "kokiri:schedulers/update is already bound to update, cannot bind to render"
    );
}
