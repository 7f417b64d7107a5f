mod common;

use common::{call1, call_err, call_global};
use iasy_runtime::{Rets, Runtime, Value};

fn strings(rets: &Rets) -> Vec<String> {
    rets.iter().map(ToString::to_string).collect()
}

#[test]
fn raw_access_skips_the_delegate() {
    let mut rt = Runtime::new();
    let fallback = rt.create_record([("k", Value::from("fallback"))]);
    let d = rt.create_record([("delegate", Value::Table(fallback))]);
    let t = rt.create_table();
    rt.set_descriptor(t, Some(d)).unwrap();

    assert!(call1(&mut rt, "rawget", &[Value::Table(t), Value::from("k")]).is_nil());
    call1(
        &mut rt,
        "rawset",
        &[Value::Table(t), Value::from("k"), Value::from("own")],
    );
    assert_eq!(rt.raw_get(t, "k").as_str(), Some("own"));
    assert_eq!(
        call_err(&mut rt, "rawset", &[Value::Table(t), Value::Nil, Value::from(1)]),
        "table index is nil"
    );
}

#[test]
fn rawequal_compares_identity() {
    let mut rt = Runtime::new();
    let a = rt.create_table();
    let b = rt.create_table();
    let eq = |rt: &mut Runtime, x: Value, y: Value| call1(rt, "rawequal", &[x, y]).is_truthy();
    assert!(eq(&mut rt, Value::Table(a), Value::Table(a)));
    assert!(!eq(&mut rt, Value::Table(a), Value::Table(b)));
    assert!(eq(&mut rt, Value::from(1), Value::from(1.0)));
    assert!(eq(&mut rt, Value::from("s"), Value::from("s")));
}

#[test]
fn rawlen_ignores_the_length_hook() {
    let mut rt = Runtime::new();
    let len = rt.create_function("len", |_rt, _args| {
        let mut rets = Rets::new();
        rets.push(Value::from(99));
        Ok(rets)
    });
    let d = rt.create_record([("len", len)]);
    let t = rt.create_sequence([1, 2]);
    rt.set_descriptor(t, Some(d)).unwrap();

    assert_eq!(call1(&mut rt, "rawlen", &[Value::Table(t)]).as_integer(), Some(2));
    assert_eq!(rt.length(&Value::Table(t)).unwrap(), 99);
    assert_eq!(call1(&mut rt, "rawlen", &[Value::from("abc")]).as_integer(), Some(3));
    assert_eq!(
        call_err(&mut rt, "rawlen", &[Value::from(1)]),
        "bad argument #1 to 'rawlen' (table or string expected, got number)"
    );
}

#[test]
fn pairs_walks_every_entry() {
    let mut rt = Runtime::new();
    let t = rt.create_sequence(["a", "b"]);
    rt.raw_set(t, "name", "x").unwrap();

    let rets = call_global(&mut rt, "pairs", &[Value::Table(t)]).unwrap();
    let (next, subject) = (rets[0].clone(), rets[1].clone());
    let mut key = rets[2].clone();
    let mut seen = Vec::new();
    loop {
        let step = rt.call(&next, &[subject.clone(), key.clone()]).unwrap();
        if step[0].is_nil() {
            break;
        }
        seen.push(format!("{}={}", step[0], step[1]));
        key = step[0].clone();
    }
    assert_eq!(seen, vec!["1=a", "2=b", "name=x"]);

    // The iterator is the global `next`.
    assert!(next.raw_equal(&rt.global("next")));
    let again = call_global(&mut rt, "pairs", &[Value::Table(t)]).unwrap();
    assert!(again[0].raw_equal(&next));
}

#[test]
fn pairs_keeps_its_next_after_the_global_is_replaced() {
    let mut rt = Runtime::new();
    let next = rt.global("next");
    rt.set_global("next", Value::Nil);
    rt.collect_garbage(&[]);

    let t = rt.create_sequence(["only"]);
    let rets = call_global(&mut rt, "pairs", &[Value::Table(t)]).unwrap();
    assert!(rets[0].raw_equal(&next));
    let step = rt.call(&rets[0], &[Value::Table(t), Value::Nil]).unwrap();
    assert_eq!(strings(&step), vec!["1", "only"]);
}

#[test]
fn ipairs_follows_the_delegate_and_stops_at_nil() {
    let mut rt = Runtime::new();
    let fallback = rt.create_sequence(["a", "b", "c"]);
    let d = rt.create_record([("delegate", Value::Table(fallback))]);
    let t = rt.create_sequence(["own"]);
    rt.set_descriptor(t, Some(d)).unwrap();

    let rets = call_global(&mut rt, "ipairs", &[Value::Table(t)]).unwrap();
    let (step, subject) = (rets[0].clone(), rets[1].clone());
    let mut i = rets[2].clone();
    let mut seen = Vec::new();
    loop {
        let r = rt.call(&step, &[subject.clone(), i.clone()]).unwrap();
        if r[0].is_nil() {
            break;
        }
        seen.push(r[1].to_string());
        i = r[0].clone();
    }
    assert_eq!(seen, vec!["own", "b", "c"]);
}

#[test]
fn next_rejects_unknown_keys() {
    let mut rt = Runtime::new();
    let t = rt.create_table();
    assert!(call1(&mut rt, "next", &[Value::Table(t)]).is_nil());
    assert_eq!(
        call_err(&mut rt, "next", &[Value::Table(t), Value::from("gone")]),
        "invalid key to 'next'"
    );
}

#[test]
fn select_counts_and_slices() {
    let mut rt = Runtime::new();
    let args = [Value::from("#"), "a".into(), "b".into(), "c".into()];
    assert_eq!(call1(&mut rt, "select", &args).as_integer(), Some(3));

    let mut args = args;
    args[0] = Value::from(2);
    let rets = call_global(&mut rt, "select", &args).unwrap();
    assert_eq!(strings(&rets), vec!["b", "c"]);

    args[0] = Value::from(-1);
    let rets = call_global(&mut rt, "select", &args).unwrap();
    assert_eq!(strings(&rets), vec!["c"]);

    args[0] = Value::from(10);
    assert!(call_global(&mut rt, "select", &args).unwrap().is_empty());

    args[0] = Value::from(-4);
    assert_eq!(
        call_err(&mut rt, "select", &args),
        "bad argument #1 to 'select' (index out of range)"
    );
}

#[test]
fn assert_passes_values_or_raises() {
    let mut rt = Runtime::new();
    let rets = call_global(&mut rt, "assert", &[Value::from(1), Value::from("m")]).unwrap();
    assert_eq!(strings(&rets), vec!["1", "m"]);
    assert_eq!(call_err(&mut rt, "assert", &[Value::from(false)]), "assertion failed!");
    assert_eq!(
        call_err(&mut rt, "assert", &[Value::Nil, Value::from("custom")]),
        "custom"
    );
    assert_eq!(
        call_err(&mut rt, "assert", &[]),
        "bad argument #1 to 'assert' (value expected)"
    );
}

#[test]
fn pcall_catches_errors_and_keeps_the_value() {
    let mut rt = Runtime::new();
    let error = rt.global("error");
    let payload = rt.create_table();

    let rets = call_global(&mut rt, "pcall", &[error.clone(), Value::Table(payload)]).unwrap();
    assert!(!rets[0].is_truthy());
    assert!(rets[1].raw_equal(&Value::Table(payload)));

    let ty = rt.global("type");
    let rets = call_global(&mut rt, "pcall", &[ty, Value::from(1)]).unwrap();
    assert_eq!(strings(&rets), vec!["true", "number"]);

    let new = rt.global("new");
    let rets = call_global(&mut rt, "pcall", &[new, Value::from(1)]).unwrap();
    assert_eq!(
        strings(&rets),
        vec!["false", "bad argument #1 to 'new' (table expected, got number)"]
    );
}

#[test]
fn xpcall_passes_the_error_through_the_handler() {
    let mut rt = Runtime::new();
    let handler = rt.create_function("handler", |_rt, args| {
        let mut rets = Rets::new();
        rets.push(Value::from(format!("handled: {}", args[0])));
        Ok(rets)
    });
    let error = rt.global("error");
    let rets =
        call_global(&mut rt, "xpcall", &[error, handler.clone(), Value::from("boom")]).unwrap();
    assert_eq!(strings(&rets), vec!["false", "handled: boom"]);

    let ty = rt.global("type");
    assert_eq!(
        call_err(&mut rt, "xpcall", &[ty, Value::from(1)]),
        "bad argument #2 to 'xpcall' (function expected, got number)"
    );
}

#[test]
fn calling_a_non_function_fails() {
    let mut rt = Runtime::new();
    let err = rt.call(&Value::from(3), &[]).unwrap_err();
    assert_eq!(err.to_string(), "attempt to call a number value");
    let t = rt.create_table();
    let err = rt.call(&Value::Table(t), &[]).unwrap_err();
    assert_eq!(err.to_string(), "attempt to call a table value");
}

#[test]
fn userdata_payload_is_typed() {
    let mut rt = Runtime::new();
    let u = rt.create_userdata(String::from("handle"));
    assert_eq!(rt.userdata::<String>(&u).map(String::as_str), Some("handle"));
    assert!(rt.userdata::<u32>(&u).is_none());
    assert!(rt.userdata::<String>(&Value::from("handle")).is_none());
}

#[test]
fn uncaught_non_string_error_describes_itself() {
    let mut rt = Runtime::new();
    let t = rt.create_table();
    assert_eq!(
        call_err(&mut rt, "error", &[Value::Table(t)]),
        "(error object is a table value)"
    );
}
