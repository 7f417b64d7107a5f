use iasy_core::Value;

use super::common::{check_any, check_table, one};
use crate::Runtime;
use crate::core::Rets;
use crate::errors::{RuntimeError, bad_type, messages};

pub fn builtin_rawget(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let table = check_table(args, 1, "rawget")?;
    let key = check_any(args, 2, "rawget")?;
    Ok(one(rt.raw_get(table, key.clone())))
}

pub fn builtin_rawset(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let table = check_table(args, 1, "rawset")?;
    let key = check_any(args, 2, "rawset")?;
    let value = check_any(args, 3, "rawset")?;
    rt.raw_set(table, key.clone(), value.clone())?;
    Ok(one(Value::Table(table)))
}

pub fn builtin_rawequal(_rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let a = check_any(args, 1, "rawequal")?;
    let b = check_any(args, 2, "rawequal")?;
    Ok(one(Value::Bool(a.raw_equal(b))))
}

pub fn builtin_rawlen(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let v = args.first();
    match v.and_then(|v| rt.raw_len(v)) {
        Some(n) => Ok(one(Value::from(n))),
        None => Err(bad_type(1, "rawlen", messages::TABLE_OR_STRING_EXPECTED, v)),
    }
}
