use std::rc::Rc;

use toylang::{
    ast::Position,
    interpreter::value::{
        core::{HostObject, Value},
        function::Arity,
        map_value::{MapKey, MapValue},
    },
};

const POS: Position = Position::new(1, 1);

fn list(values: Vec<Value>) -> Value {
    Value::from(values)
}

fn map(entries: &[(&str, Value)]) -> Value {
    let mut map = MapValue::new();
    for (key, value) in entries {
        map.insert(MapKey::Str((*key).into()), value.clone());
    }
    Value::from(map)
}

#[test]
fn display_matches_script_output() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::Float(2.0).to_string(), "2.0");
    assert_eq!(Value::Float(0.5).to_string(), "0.5");
    assert_eq!(Value::Float(-0.0).to_string(), "-0.0");
    assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
    assert_eq!(Value::from("plain").to_string(), "plain");
    assert_eq!(Value::Type("int".into()).to_string(), "<type int>");
}

#[test]
fn containers_quote_nested_strings() {
    let nested = list(vec![Value::from("a\"b"), list(vec![Value::Int(1), Value::Float(1.0)]), Value::Null]);
    assert_eq!(nested.to_string(), r#"["a\"b", [1, 1.0], null]"#);

    let m = map(&[("k", Value::from("v")), ("n", list(Vec::new()))]);
    assert_eq!(m.to_string(), r#"{"k": "v", "n": []}"#);
    assert_eq!(Value::from("s").repr(), "\"s\"");
}

#[test]
fn truthiness() {
    let truthy = [Value::Bool(true), Value::Int(-1), Value::Float(0.1), Value::from(" "),
                  list(vec![Value::Null]), map(&[("a", Value::Null)])];
    let falsy = [Value::Null, Value::Bool(false), Value::Int(0), Value::Float(0.0), Value::from(""),
                 list(Vec::new()), Value::from(MapValue::new())];

    for value in &truthy {
        assert!(value.to_bool(POS).unwrap(), "{value} should be true");
    }
    for value in &falsy {
        assert!(!value.to_bool(POS).unwrap(), "{value} should be false");
    }
    assert!(Value::Type("int".into()).to_bool(POS).is_err());
}

#[test]
fn equality_and_identity() {
    let a = list(vec![Value::Int(1)]);
    let b = list(vec![Value::Float(1.0)]);

    assert!(a.equals(&b));
    assert!(!a.is_same(&b));
    assert!(a.is_same(&a.clone()));

    assert!(Value::Int(3).is_same(&Value::Float(3.0)));
    assert!(!Value::Int(i64::MAX).equals(&Value::Float(2f64.powi(63))));
    assert!(!Value::Float(f64::NAN).equals(&Value::Float(f64::NAN)));
    assert!(!Value::Null.equals(&Value::Bool(false)));

    let object = Rc::new(HostObject::new("Handle", 7_u8));
    let same = Value::Object(Rc::clone(&object));
    assert!(Value::Object(object).is_same(&same));
    assert!(!same.is_same(&Value::Object(Rc::new(HostObject::new("Handle", 7_u8)))));
}

#[test]
fn maps_compare_by_content() {
    let left = map(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
    let right = map(&[("b", Value::Float(2.0)), ("a", Value::Int(1))]);
    let other = map(&[("a", Value::Int(1))]);

    assert!(left.equals(&right));
    assert!(!left.equals(&other));
}

#[test]
fn map_keeps_insertion_order() {
    let mut map = MapValue::new();
    map.insert(MapKey::Str("z".into()), Value::Int(1));
    map.insert(MapKey::Int(0), Value::Int(2));
    map.insert(MapKey::Null, Value::Int(3));
    map.insert(MapKey::Str("z".into()), Value::Int(4));

    assert_eq!(map.len(), 3);
    assert_eq!(map.keys().as_ref(), &[MapKey::Str("z".into()), MapKey::Int(0), MapKey::Null]);
    assert_eq!(map.get(&MapKey::Str("z".into())), Some(&Value::Int(4)));
    assert_eq!(map.to_string(), r#"{"z": 4, 0: 2, null: 3}"#);
}

#[test]
fn map_key_snapshot_survives_inserts() {
    let mut map = MapValue::new();
    map.insert(MapKey::Int(1), Value::Null);

    let before = map.keys();
    assert!(Rc::ptr_eq(&before, &map.keys()));

    map.insert(MapKey::Int(2), Value::Null);
    let after = map.keys();

    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);

    map.insert(MapKey::Int(1), Value::Bool(true));
    assert!(Rc::ptr_eq(&after, &map.keys()));
}

#[test]
fn reaches_follows_nested_containers() {
    let inner = list(vec![Value::Int(1)]);
    let middle = map(&[("k", inner.clone())]);
    let outer = list(vec![middle.clone()]);

    assert!(outer.reaches(&outer));
    assert!(outer.reaches(&middle));
    assert!(outer.reaches(&inner));
    assert!(!inner.reaches(&middle));
    assert!(!outer.reaches(&list(vec![Value::Int(1)])));
    assert!(!Value::Int(1).reaches(&Value::Int(1)));
}

#[test]
fn map_keys_normalize_numbers() {
    assert_eq!(MapKey::from_value(&Value::Float(-4.0), POS).unwrap(), MapKey::Int(-4));
    assert!(matches!(MapKey::from_value(&Value::Float(0.5), POS).unwrap(), MapKey::Float(_)));
    assert_eq!(MapKey::from_value(&Value::Float(0.5), POS).unwrap().to_value(), Value::Float(0.5));
    assert!(MapKey::from_value(&map(&[]), POS).is_err());
    assert!(MapKey::from_value(&Value::Bool(true), POS).is_err());
}

#[test]
fn numeric_conversions() {
    assert_eq!(Value::Int(3).as_float(POS).unwrap(), 3.0);
    assert_eq!(Value::Float(1.5).as_float(POS).unwrap(), 1.5);
    assert_eq!(Value::Int(i64::MAX).as_float(POS).unwrap(), 2f64.powi(63));
    assert!(Value::from("1").as_float(POS).is_err());
    assert_eq!(Value::Int(9).as_int(POS).unwrap(), 9);
    assert!(Value::Float(9.0).as_int(POS).is_err());
}

#[test]
fn host_objects_downcast_to_their_payload() {
    let object = HostObject::new("Pair", (1_i32, "x"));

    assert_eq!(object.downcast::<(i32, &str)>(), Some(&(1, "x")));
    assert!(object.downcast::<String>().is_none());
    assert_eq!(Value::Object(Rc::new(object)).to_string(), "<object Pair>");
}

#[test]
fn arity_checks_and_display() {
    assert!(Arity::Exact(2).check(2));
    assert!(!Arity::Exact(2).check(1));
    assert!(Arity::OneOf(&[0, 2]).check(0));
    assert!(!Arity::OneOf(&[0, 2]).check(1));
    assert!(Arity::Any.check(99));

    assert_eq!(Arity::Exact(1).to_string(), "1");
    assert_eq!(Arity::OneOf(&[1, 2]).to_string(), "1 or 2");
}
