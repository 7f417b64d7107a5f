//! Callable heap objects.

use std::fmt;
use std::rc::Rc;

use iasy_core::Value;
use smallvec::SmallVec;

use crate::Runtime;
use crate::errors::RuntimeError;

/// Values returned by a call. Most builtins return one or two.
pub type Rets = SmallVec<[Value; 2]>;

pub type BuiltinFn = fn(&mut Runtime, &[Value]) -> Result<Rets, RuntimeError>;

/// Builtin that receives the values captured when it was created ahead of its
/// call arguments.
pub type BoundFn = fn(&mut Runtime, &[Value], &[Value]) -> Result<Rets, RuntimeError>;

pub type HostFn = dyn Fn(&mut Runtime, &[Value]) -> Result<Rets, RuntimeError>;

pub struct BoundBuiltin {
    pub name: &'static str,
    pub fun: BoundFn,
    pub captured: SmallVec<[Value; 1]>,
}

pub enum Function {
    Builtin { name: &'static str, fun: BuiltinFn },
    Bound(Box<BoundBuiltin>),
    /// Closure registered by the embedder. Heap values it captures are not
    /// traced by the collector and must be kept reachable by other means.
    Host { name: Rc<str>, fun: Rc<HostFn> },
}

impl Function {
    pub fn name(&self) -> &str {
        match self {
            Function::Builtin { name, .. } => *name,
            Function::Bound(b) => b.name,
            Function::Host { name, .. } => &**name,
        }
    }

    pub(crate) fn captured(&self) -> &[Value] {
        match self {
            Function::Bound(b) => &b.captured,
            _ => &[],
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Builtin { name, .. } => write!(f, "Builtin({name})"),
            Function::Bound(b) => write!(f, "Bound({}, {} captured)", b.name, b.captured.len()),
            Function::Host { name, .. } => write!(f, "Host({name})"),
        }
    }
}
