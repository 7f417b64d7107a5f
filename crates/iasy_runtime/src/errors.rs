//! Runtime errors raised by builtins and the access protocol.

use iasy_core::{TableError, Value};

/// Common error message fragments used throughout the runtime.
pub mod messages {
    pub const TABLE_EXPECTED: &str = "table expected";
    pub const NIL_OR_TABLE_EXPECTED: &str = "nil or table expected";
    pub const TABLE_OR_STRING_EXPECTED: &str = "table or string expected";
    pub const FUNCTION_EXPECTED: &str = "function expected";
    pub const VALUE_EXPECTED: &str = "value expected";
    pub const NUMBER_EXPECTED: &str = "number expected";
    pub const INDEX_OUT_OF_RANGE: &str = "index out of range";
    pub const ASSERTION_FAILED: &str = "assertion failed!";
    pub const NO_VALUE: &str = "no value";
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("bad argument #{position} to '{function}' ({message})")]
    BadArgument {
        position: usize,
        function: &'static str,
        message: String,
    },
    #[error("attempt to index a {0} value")]
    IndexNonTable(&'static str),
    #[error("attempt to call a {0} value")]
    NotCallable(&'static str),
    #[error("attempt to get length of a {0} value")]
    NoLength(&'static str),
    #[error("object length is not an integer")]
    LengthNotInteger,
    #[error("cannot attach a descriptor to a {0} value")]
    NoDescriptorSlot(&'static str),
    #[error("cannot change a protected descriptor")]
    ProtectedDescriptor,
    #[error("'delegate' chain too long; possible loop")]
    DelegateLoop,
    #[error("class is already under construction")]
    ReentrantConstruction,
    #[error("'behaviorTemplate' must be a table (got {0})")]
    BadTemplate(&'static str),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("{}", raised_message(.0))]
    Raised(Value),
}

impl RuntimeError {
    /// The value seen by a protected call that catches this error.
    pub fn into_value(self) -> Value {
        match self {
            RuntimeError::Raised(v) => v,
            other => Value::from(other.to_string()),
        }
    }
}

fn raised_message(v: &Value) -> String {
    match v {
        Value::Str(_) | Value::Int(_) | Value::Float(_) => v.to_string(),
        other => format!("(error object is a {} value)", other.kind_name()),
    }
}

/// `bad argument` error for a value of the wrong kind. A missing argument
/// reports "no value".
pub fn bad_type(
    position: usize,
    function: &'static str,
    expected: &str,
    got: Option<&Value>,
) -> RuntimeError {
    let got = got.map_or(messages::NO_VALUE, Value::kind_name);
    RuntimeError::BadArgument {
        position,
        function,
        message: format!("{expected}, got {got}"),
    }
}

pub fn bad_argument(position: usize, function: &'static str, message: &str) -> RuntimeError {
    RuntimeError::BadArgument {
        position,
        function,
        message: message.to_string(),
    }
}
