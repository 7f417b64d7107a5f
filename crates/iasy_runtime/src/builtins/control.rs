use iasy_core::Value;
use smallvec::smallvec;

use super::common::{check_any, one};
use crate::Runtime;
use crate::core::Rets;
use crate::errors::{RuntimeError, bad_argument, bad_type, messages};

/// `select('#', ...)` counts the extra arguments; `select(n, ...)` returns
/// them from position `n` on, with negative `n` counting from the end.
pub fn builtin_select(_rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let selector = check_any(args, 1, "select")?;
    let rest = &args[1..];
    if selector.as_str() == Some("#") {
        return Ok(one(Value::from(rest.len())));
    }
    let Some(n) = selector.as_integer() else {
        return Err(bad_type(1, "select", messages::NUMBER_EXPECTED, Some(selector)));
    };
    let count = rest.len() as i64;
    let start = if n < 0 {
        count + 1 + n
    } else {
        n.min(count + 1)
    };
    if start < 1 {
        return Err(bad_argument(1, "select", messages::INDEX_OUT_OF_RANGE));
    }
    Ok(rest[(start - 1) as usize..].iter().cloned().collect())
}

pub fn builtin_assert(_rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let cond = check_any(args, 1, "assert")?;
    if cond.is_truthy() {
        return Ok(args.iter().cloned().collect());
    }
    let message = match args.get(1) {
        Some(m) => m.clone(),
        None => Value::from(messages::ASSERTION_FAILED),
    };
    Err(RuntimeError::Raised(message))
}

pub fn builtin_error(_rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    Err(RuntimeError::Raised(args.first().cloned().unwrap_or_default()))
}

/// `pcall(f, ...)` → `true, results...` or `false, error`.
pub fn builtin_pcall(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let f = check_any(args, 1, "pcall")?;
    match rt.call(f, &args[1..]) {
        Ok(rets) => {
            let mut out: Rets = smallvec![Value::Bool(true)];
            out.extend(rets);
            Ok(out)
        }
        Err(e) => Ok(smallvec![Value::Bool(false), e.into_value()]),
    }
}

/// `xpcall(f, handler, ...)`: like `pcall`, but the error goes through
/// `handler` first.
pub fn builtin_xpcall(rt: &mut Runtime, args: &[Value]) -> Result<Rets, RuntimeError> {
    let handler = match args.get(1) {
        Some(h @ Value::Function(_)) => h.clone(),
        other => return Err(bad_type(2, "xpcall", messages::FUNCTION_EXPECTED, other)),
    };
    let f = check_any(args, 1, "xpcall")?;
    match rt.call(f, &args[2..]) {
        Ok(rets) => {
            let mut out: Rets = smallvec![Value::Bool(true)];
            out.extend(rets);
            Ok(out)
        }
        Err(e) => {
            let handled = match rt.call(&handler, &[e.into_value()]) {
                Ok(rets) => rets.into_iter().next().unwrap_or_default(),
                Err(e) => e.into_value(),
            };
            Ok(smallvec![Value::Bool(false), handled])
        }
    }
}
