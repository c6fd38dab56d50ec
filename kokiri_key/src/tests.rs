#![cfg(test)]

use super::*;

#[test]
fn test_parse_equals_new() {
    let parsed: Key = "namespace:value".parse().unwrap();
    let created = Key::new("namespace", "value").unwrap();
    assert_eq!(parsed, created);
    assert_eq!(parsed.to_string(), "namespace:value");
    assert_eq!(Key::try_from("namespace:value").unwrap(), created);
}

#[test]
fn test_split_on_first_separator() {
    let error = "kokiri:a:b".parse::<Key>().unwrap_err();
    assert_eq!(error, KeyError::InvalidValue("a:b".to_owned()));

    let key: Key = "kokiri.core:textures/grass-1_0".parse().unwrap();
    assert_eq!(key.namespace(), "kokiri.core");
    assert_eq!(key.value(), "textures/grass-1_0");
}

#[test]
fn test_missing_separator() {
    for source in ["kokiri", ":value", "kokiri:", ""] {
        assert_eq!(
            source.parse::<Key>(),
            Err(KeyError::MissingSeparator(source.to_owned())),
        );
    }
}

#[test]
fn test_invalid_parts() {
    assert_eq!(
        Key::new("Kokiri", "value"),
        Err(KeyError::InvalidNamespace("Kokiri".to_owned())),
    );
    assert_eq!(
        Key::new("name/space", "value"),
        Err(KeyError::InvalidNamespace("name/space".to_owned())),
    );
    assert_eq!(
        Key::new("kokiri", "with space"),
        Err(KeyError::InvalidValue("with space".to_owned())),
    );
    assert_eq!(
        Key::new("kokiri", ""),
        Err(KeyError::InvalidValue(String::new())),
    );
}

#[test]
fn test_keyed() {
    fn describe(keyed: impl Keyed) -> String {
        format!("<{}>", keyed.key())
    }

    let key = Key::new("kokiri", "world").unwrap();
    assert_eq!(describe(&key), "<kokiri:world>");
    assert_eq!(Namespaced::namespace(&key), "kokiri");
    assert!(Key::new("a", "b").unwrap() < Key::new("a", "c").unwrap());
}
