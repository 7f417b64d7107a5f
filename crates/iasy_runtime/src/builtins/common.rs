use iasy_core::{ObjectId, Value};
use smallvec::smallvec;

use crate::core::Rets;
use crate::errors::{RuntimeError, bad_argument, bad_type, messages};

/// Argument at 1-based `pos`, nil when absent.
pub fn arg(args: &[Value], pos: usize) -> &Value {
    args.get(pos - 1).unwrap_or(&Value::NIL)
}

/// Argument at `pos`, which must be present (nil counts as present).
pub fn check_any<'a>(
    args: &'a [Value],
    pos: usize,
    function: &'static str,
) -> Result<&'a Value, RuntimeError> {
    args.get(pos - 1)
        .ok_or_else(|| bad_argument(pos, function, messages::VALUE_EXPECTED))
}

/// First argument, which the runtime operation checks to be a table. A
/// missing argument reports "no value" here.
pub fn table_operand<'a>(
    args: &'a [Value],
    function: &'static str,
) -> Result<&'a Value, RuntimeError> {
    args.first()
        .ok_or_else(|| bad_type(1, function, messages::TABLE_EXPECTED, None))
}

pub fn check_table(
    args: &[Value],
    pos: usize,
    function: &'static str,
) -> Result<ObjectId, RuntimeError> {
    let v = args.get(pos - 1);
    v.and_then(Value::as_table)
        .ok_or_else(|| bad_type(pos, function, messages::TABLE_EXPECTED, v))
}

pub fn check_integer(
    args: &[Value],
    pos: usize,
    function: &'static str,
) -> Result<i64, RuntimeError> {
    let v = args.get(pos - 1);
    v.and_then(Value::as_integer)
        .ok_or_else(|| bad_type(pos, function, messages::NUMBER_EXPECTED, v))
}

#[inline]
pub fn one(v: Value) -> Rets {
    smallvec![v]
}
