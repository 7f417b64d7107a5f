mod common;

use common::{call_err, call_global, class_with};
use iasy_runtime::{Reduction, Rets, Runtime, Value};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn seq(rt: &mut Runtime, items: Vec<Value>) -> Value {
    Value::Table(rt.create_sequence(items))
}

fn rets_of(rt: &mut Runtime, name: &str, arg: Value) -> Vec<String> {
    call_global(rt, name, &[arg])
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn same_examples() {
    let mut rt = Runtime::new();
    let s = seq(&mut rt, vec![1.into(), 2.into(), 3.into()]);
    assert!(rt.same(&s).unwrap());
    let s = seq(&mut rt, vec![1.into(), "x".into()]);
    assert!(!rt.same(&s).unwrap());
    let s = seq(&mut rt, vec![true.into()]);
    assert!(rt.same(&s).unwrap());
    let (a, b) = (rt.create_table(), rt.create_table());
    let s = seq(&mut rt, vec![Value::Table(a), Value::Table(b)]);
    assert!(rt.same(&s).unwrap());
}

#[test]
fn same_on_empty_sequence_is_false() {
    let mut rt = Runtime::new();
    let s = seq(&mut rt, vec![]);
    assert!(!rt.same(&s).unwrap());
}

#[test]
fn same_compares_nominal_types() {
    let mut rt = Runtime::new();
    let point = class_with(&mut rt, vec![], Some(vec![("tag", Value::from("Point"))]));
    let other = class_with(&mut rt, vec![], Some(vec![("tag", Value::from("Other"))]));
    let p1 = rt.new_instance(&Value::Table(point)).unwrap();
    let p2 = rt.new_instance(&Value::Table(point)).unwrap();
    let o = rt.new_instance(&Value::Table(other)).unwrap();

    let s = seq(&mut rt, vec![Value::Table(p1), Value::Table(p2)]);
    assert!(rt.same(&s).unwrap());
    let s = seq(&mut rt, vec![Value::Table(p1), Value::Table(o)]);
    assert!(!rt.same(&s).unwrap());
    let plain = rt.create_table();
    let s = seq(&mut rt, vec![Value::Table(p1), Value::Table(plain)]);
    assert!(!rt.same(&s).unwrap());
}

#[test]
fn all_examples() {
    let mut rt = Runtime::new();
    let s = seq(&mut rt, vec![true.into(), 1.into(), "x".into()]);
    assert_eq!(rt.all(&s).unwrap(), Reduction { result: true, index: None });
    let s = seq(&mut rt, vec![true.into(), true.into(), false.into()]);
    assert_eq!(rets_of(&mut rt, "all", s), vec!["false", "3"]);
    let s = seq(&mut rt, vec![]);
    assert_eq!(rets_of(&mut rt, "all", s), vec!["true"]);
}

#[test]
fn any_examples() {
    let mut rt = Runtime::new();
    let s = seq(&mut rt, vec![false.into(), Value::Nil, 0.into()]);
    assert_eq!(rt.length(&s).unwrap(), 3);
    assert_eq!(rt.any(&s).unwrap(), Reduction { result: true, index: Some(3) });
    let s = seq(&mut rt, vec![false.into(), false.into()]);
    assert_eq!(rets_of(&mut rt, "any", s), vec!["false"]);
    let s = seq(&mut rt, vec![]);
    assert_eq!(rets_of(&mut rt, "any", s), vec!["false"]);
}

#[test]
fn holes_inside_a_sequence_are_visited() {
    let mut rt = Runtime::new();
    let s = seq(&mut rt, vec![true.into(), Value::Nil, true.into()]);
    assert_eq!(rt.all(&s).unwrap(), Reduction { result: false, index: Some(2) });
    assert!(!rt.same(&s).unwrap());
}

#[test]
fn length_hook_sets_the_range() {
    let mut rt = Runtime::new();
    let len = rt.create_function("len", |_rt, _args| {
        let mut rets = Rets::new();
        rets.push(Value::from(4));
        Ok(rets)
    });
    let d = rt.create_record([("len", len)]);
    let t = rt.create_sequence([Value::from(true), Value::from(true)]);
    rt.set_descriptor(t, Some(d)).unwrap();

    // Positions 3 and 4 are nil.
    assert_eq!(
        rt.all(&Value::Table(t)).unwrap(),
        Reduction { result: false, index: Some(3) }
    );
    assert!(!rt.same(&Value::Table(t)).unwrap());
}

#[test]
fn elements_are_read_raw() {
    let mut rt = Runtime::new();
    let fallback = rt.create_sequence([Value::from(true), Value::from(true)]);
    let d = rt.create_record([("delegate", Value::Table(fallback))]);
    let t = rt.create_sequence([Value::from(false), Value::from(false)]);
    rt.set_descriptor(t, Some(d)).unwrap();
    assert!(!rt.any(&Value::Table(t)).unwrap().result);
}

#[test]
fn non_integer_length_is_an_error() {
    let mut rt = Runtime::new();
    let len = rt.create_function("len", |_rt, _args| {
        let mut rets = Rets::new();
        rets.push(Value::from("many"));
        Ok(rets)
    });
    let d = rt.create_record([("len", len)]);
    let t = rt.create_table();
    rt.set_descriptor(t, Some(d)).unwrap();
    assert_eq!(
        rt.any(&Value::Table(t)).unwrap_err().to_string(),
        "object length is not an integer"
    );
}

#[test]
fn non_table_arguments_are_rejected() {
    let mut rt = Runtime::new();
    for name in ["same", "all", "any"] {
        assert_eq!(
            call_err(&mut rt, name, &[Value::from("abc")]),
            format!("bad argument #1 to '{name}' (table expected, got string)")
        );
        assert_eq!(
            call_err(&mut rt, name, &[]),
            format!("bad argument #1 to '{name}' (table expected, got no value)")
        );
        assert_eq!(
            call_err(&mut rt, name, &[Value::Nil]),
            format!("bad argument #1 to '{name}' (table expected, got nil)")
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, max_shrink_iters: 200, .. ProptestConfig::default()
    })]
    #[test]
    fn all_and_any_agree_with_iterators(items in proptest::collection::vec(any::<bool>(), 0..24)) {
        let mut rt = Runtime::new();
        let s = seq(&mut rt, items.iter().map(|b| Value::from(*b)).collect());
        // Trailing falses are still elements: booleans are never nil.
        let all = rt.all(&s).unwrap();
        let any = rt.any(&s).unwrap();

        prop_assert_eq!(all.result, items.iter().all(|b| *b));
        prop_assert_eq!(any.result, items.iter().any(|b| *b));
        prop_assert_eq!(all.index, items.iter().position(|b| !*b).map(|i| i as i64 + 1));
        prop_assert_eq!(any.index, items.iter().position(|b| *b).map(|i| i as i64 + 1));
    }
}
