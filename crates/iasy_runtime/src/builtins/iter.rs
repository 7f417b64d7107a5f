use iasy_core::Value;
use smallvec::smallvec;

use super::common::{arg, check_any, check_integer, check_table, one};
use crate::Runtime;
use crate::core::Rets;
use crate::errors::RuntimeError;

pub fn builtin_next(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let table = check_table(args, 1, "next")?;
    match rt.heap.table(table).next(arg(args, 2))? {
        Some((k, v)) => Ok(smallvec![k, v]),
        None => Ok(one(Value::Nil)),
    }
}

/// `pairs(t)` → `next, t, nil`, where `next` is the installed global
/// builtin even if the global has since been reassigned.
pub fn builtin_pairs(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let table = check_table(args, 1, "pairs")?;
    let next = rt.interned_builtin("next", builtin_next);
    Ok(smallvec![next, Value::Table(table), Value::Nil])
}

/// `ipairs(t)` → iterator, `t`, `0`. Elements are read through `index`, so
/// delegated entries are visited too.
pub fn builtin_ipairs(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let subject = check_any(args, 1, "ipairs")?.clone();
    let step = rt.interned_builtin("ipairs_step", ipairs_step);
    Ok(smallvec![step, subject, Value::Int(0)])
}

fn ipairs_step(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let i = check_integer(args, 2, "ipairs_step")?.wrapping_add(1);
    match rt.index(arg(args, 1), &Value::Int(i))? {
        Value::Nil => Ok(one(Value::Nil)),
        v => Ok(smallvec![Value::Int(i), v]),
    }
}
