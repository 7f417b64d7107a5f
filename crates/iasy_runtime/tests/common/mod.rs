#![allow(dead_code)]

use iasy_runtime::{ObjectId, Rets, Runtime, RuntimeError, Value};

/// Call the global function `name`.
pub fn call_global(rt: &mut Runtime, name: &str, args: &[Value]) -> Result<Rets, RuntimeError> {
    let f = rt.global(name);
    rt.call(&f, args)
}

/// First result of a call that must succeed.
pub fn call1(rt: &mut Runtime, name: &str, args: &[Value]) -> Value {
    let rets = call_global(rt, name, args)
        .unwrap_or_else(|e| panic!("{name} failed: {e}"));
    rets.into_iter().next().unwrap_or_default()
}

/// Message of a call that must fail.
pub fn call_err(rt: &mut Runtime, name: &str, args: &[Value]) -> String {
    match call_global(rt, name, args) {
        Ok(rets) => panic!("{name} should fail, returned {} values", rets.len()),
        Err(e) => e.to_string(),
    }
}

/// A class table with `fields` and, when given, a `behaviorTemplate`.
pub fn class_with(
    rt: &mut Runtime,
    fields: Vec<(&str, Value)>,
    template: Option<Vec<(&str, Value)>>,
) -> ObjectId {
    let class = rt.create_record(fields);
    if let Some(template) = template {
        let t = rt.create_record(template);
        rt.raw_set(class, "behaviorTemplate", Value::Table(t)).unwrap();
    }
    class
}

pub fn field(rt: &mut Runtime, table: ObjectId, name: &str) -> Value {
    rt.get_field(&Value::Table(table), name).unwrap()
}
