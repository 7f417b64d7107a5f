use iasy_core::Value;

use super::common::{arg, check_any, check_table, one, table_operand};
use crate::Runtime;
use crate::core::Rets;
use crate::errors::{RuntimeError, bad_type, messages};

pub fn builtin_new(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let class = table_operand(args, "new")?;
    let instance = rt.new_instance(class)?;
    Ok(one(Value::Table(instance)))
}

/// `extends(base)` returns the builder that completes the derivation.
pub fn builtin_extends(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let extends = rt.extends(table_operand(args, "extends")?)?;
    let builder = rt.create_bound("extends", extends_builder, &[Value::Table(extends.base())]);
    Ok(one(builder))
}

fn extends_builder(
    rt: &mut Runtime,
    captured: &[Value],
    args: &[Value],
) -> Result<Rets, RuntimeError> {
    let extends = rt.extends(arg(captured, 1))?;
    let derived = extends.apply(rt, arg(args, 1))?;
    Ok(one(derived))
}

pub fn builtin_type(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let v = check_any(args, 1, "type")?;
    Ok(one(rt.type_of(v).into_value()))
}

pub fn builtin_getdescriptor(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let v = check_any(args, 1, "getdescriptor")?;
    Ok(one(rt.get_descriptor(v)))
}

pub fn builtin_setdescriptor(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let table = check_table(args, 1, "setdescriptor")?;
    let descriptor = match args.get(1) {
        Some(Value::Nil) => None,
        Some(Value::Table(d)) => Some(*d),
        other => {
            return Err(bad_type(
                2,
                "setdescriptor",
                messages::NIL_OR_TABLE_EXPECTED,
                other,
            ));
        }
    };
    rt.set_descriptor(table, descriptor)?;
    Ok(one(Value::Table(table)))
}
