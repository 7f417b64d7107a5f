mod common;

use common::{call1, call_err, class_with};
use iasy_runtime::{Runtime, TypeTag, Value};

#[test]
fn primitives_report_their_kind() {
    let mut rt = Runtime::new();
    let f = rt.global("type");
    let u = rt.create_userdata(5u8);
    let cases = [
        (Value::Nil, "nil"),
        (Value::from(true), "boolean"),
        (Value::from(3), "number"),
        (Value::from(2.5), "number"),
        (Value::from("s"), "string"),
        (f, "function"),
        (u, "userdata"),
    ];
    for (v, expected) in cases {
        assert_eq!(rt.type_of(&v), expected);
        assert_eq!(call1(&mut rt, "type", &[v]).as_str(), Some(expected));
    }
}

#[test]
fn tables_without_descriptor_are_tables() {
    let mut rt = Runtime::new();
    let t = rt.create_table();
    assert_eq!(rt.type_of(&Value::Table(t)), "table");
}

#[test]
fn descriptor_without_tag_is_an_object() {
    let mut rt = Runtime::new();
    let t = rt.create_table();
    let d = rt.create_table();
    rt.set_descriptor(t, Some(d)).unwrap();
    assert_eq!(rt.type_of(&Value::Table(t)), "object");

    rt.raw_set(d, "tag", 42).unwrap();
    assert_eq!(rt.type_of(&Value::Table(t)), "object");
}

#[test]
fn tag_names_the_type() {
    let mut rt = Runtime::new();
    let class = class_with(&mut rt, vec![], Some(vec![("tag", Value::from("Vec2"))]));
    let obj = call1(&mut rt, "new", &[Value::Table(class)]);
    assert_eq!(call1(&mut rt, "type", &[obj]).as_str(), Some("Vec2"));
}

#[test]
fn tag_on_a_delegate_is_not_seen() {
    let mut rt = Runtime::new();
    let outer = rt.create_record([("tag", Value::from("Hidden"))]);
    let inner = rt.create_table();
    rt.set_descriptor(inner, Some(outer)).unwrap();
    let d = rt.create_record([("delegate", Value::Table(inner))]);
    let t = rt.create_table();
    rt.set_descriptor(t, Some(d)).unwrap();

    assert_eq!(rt.type_of(&Value::Table(t)), "object");
    assert_eq!(rt.type_of(&Value::Table(inner)), "Hidden");
}

#[test]
fn tags_compare_by_name() {
    assert_eq!(TypeTag::Named("number".into()), TypeTag::Builtin("number"));
    assert_ne!(TypeTag::Named("Point".into()), TypeTag::Builtin("table"));
    assert_eq!(TypeTag::Builtin("nil").to_string(), "nil");
}

#[test]
fn type_needs_an_argument() {
    let mut rt = Runtime::new();
    assert_eq!(
        call_err(&mut rt, "type", &[]),
        "bad argument #1 to 'type' (value expected)"
    );
}
