//! Calling function values.

use iasy_core::Value;

use super::Runtime;
use crate::core::{Function, Rets};
use crate::errors::RuntimeError;

enum Callee {
    Plain(crate::core::BuiltinFn),
    Bound(crate::core::BoundFn, Vec<Value>),
    Host(std::rc::Rc<crate::core::HostFn>),
}

impl Runtime {
    pub fn call(&mut self, function: &Value, args: &[Value]) -> Result<Rets, RuntimeError> {
        let Some(id) = function.as_function() else {
            return Err(RuntimeError::NotCallable(function.kind_name()));
        };
        // Copy the callee out so the heap is free to change during the call.
        let callee = match self.heap.function(id) {
            Function::Builtin { fun, .. } => Callee::Plain(*fun),
            Function::Bound(b) => Callee::Bound(b.fun, b.captured.to_vec()),
            Function::Host { fun, .. } => Callee::Host(fun.clone()),
        };
        match callee {
            Callee::Plain(fun) => fun(self, args),
            Callee::Bound(fun, captured) => fun(self, &captured, args),
            Callee::Host(fun) => fun(self, args),
        }
    }
}
