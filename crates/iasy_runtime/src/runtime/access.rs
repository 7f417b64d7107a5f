//! Dispatching reads and the length operator.

use iasy_core::Value;

use super::{Runtime, fields};
use crate::errors::RuntimeError;

impl Runtime {
    /// Read `value[key]`, falling back through `delegate` on a miss.
    ///
    /// A table delegate is searched the same way, up to
    /// `max_delegate_depth` hops; a function delegate is called as
    /// `delegate(value, key)` and its first result is the answer.
    pub fn index(&mut self, value: &Value, key: &Value) -> Result<Value, RuntimeError> {
        let mut current = value.clone();
        let mut hops = 0;
        loop {
            let Some(table) = current.as_table() else {
                return Err(RuntimeError::IndexNonTable(current.kind_name()));
            };
            let found = self.heap.table(table).get(key);
            if !found.is_nil() {
                return Ok(found.clone());
            }
            match self.descriptor_field(table, fields::DELEGATE) {
                Value::Nil => return Ok(Value::Nil),
                handler @ Value::Function(_) => {
                    let rets = self.call(&handler, &[current, key.clone()])?;
                    return Ok(rets.into_iter().next().unwrap_or_default());
                }
                next @ Value::Table(_) => {
                    if hops == self.config.max_delegate_depth {
                        return Err(RuntimeError::DelegateLoop);
                    }
                    hops += 1;
                    current = next;
                }
                // Non-table, non-function delegates end the lookup.
                _ => return Ok(Value::Nil),
            }
        }
    }

    /// `index` with a string key.
    pub fn get_field(&mut self, value: &Value, name: &str) -> Result<Value, RuntimeError> {
        self.index(value, &Value::from(name))
    }

    /// The length operator: byte length for strings, the `len` hook or the
    /// raw border for tables.
    pub fn length(&mut self, value: &Value) -> Result<i64, RuntimeError> {
        match value {
            Value::Str(s) => Ok(s.len() as i64),
            Value::Table(table) => {
                let hook = self.descriptor_field(*table, fields::LEN);
                if hook.is_nil() {
                    return Ok(self.heap.table(*table).border() as i64);
                }
                let rets = self.call(&hook, std::slice::from_ref(value))?;
                rets.first()
                    .and_then(Value::as_integer)
                    .ok_or(RuntimeError::LengthNotInteger)
            }
            other => Err(RuntimeError::NoLength(other.kind_name())),
        }
    }
}
