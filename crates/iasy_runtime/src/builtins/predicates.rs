use iasy_core::Value;

use super::common::{one, table_operand};
use crate::Runtime;
use crate::core::Rets;
use crate::errors::RuntimeError;

pub fn builtin_same(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    Ok(one(Value::Bool(rt.same(table_operand(args, "same")?)?)))
}

/// `all(seq)` → `true`, or `false, index` of the first falsy element.
pub fn builtin_all(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    Ok(rt.all(table_operand(args, "all")?)?.into_rets())
}

/// `any(seq)` → `false`, or `true, index` of the first truthy element.
pub fn builtin_any(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    Ok(rt.any(table_operand(args, "any")?)?.into_rets())
}
