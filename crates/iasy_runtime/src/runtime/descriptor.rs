//! Descriptor protocol: attaching, reading and guarding descriptors.

use iasy_core::{ObjectId, Value};

use super::{Runtime, fields};
use crate::errors::RuntimeError;

/// Whether a descriptor change honors the current descriptor's `guard`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protection {
    /// Refuse to replace a guarded descriptor. Used by `setdescriptor`.
    Enforce,
    /// Replace unconditionally. Only `new` and `extends` use this.
    Bypass,
}

impl Runtime {
    /// The descriptor attached to `value`, ignoring any guard.
    pub fn descriptor_of(&self, value: &Value) -> Option<ObjectId> {
        value.as_table().and_then(|t| self.heap.table(t).descriptor())
    }

    /// Raw read of a field of `table`'s descriptor. Nil without a descriptor.
    pub(crate) fn descriptor_field(&self, table: ObjectId, name: &str) -> Value {
        match self.heap.table(table).descriptor() {
            Some(d) => self.heap.table(d).get_str(name).clone(),
            None => Value::Nil,
        }
    }

    /// Single mutation entry point for descriptors.
    pub fn attach_descriptor(
        &mut self,
        target: &Value,
        descriptor: Option<ObjectId>,
        protection: Protection,
    ) -> Result<(), RuntimeError> {
        let Some(table) = target.as_table() else {
            return Err(RuntimeError::NoDescriptorSlot(target.kind_name()));
        };
        if protection == Protection::Enforce && !self.descriptor_field(table, fields::GUARD).is_nil()
        {
            return Err(RuntimeError::ProtectedDescriptor);
        }
        self.heap.table_mut(table).set_descriptor(descriptor);
        Ok(())
    }

    /// Public view of a value's descriptor: its `guard` when one is set,
    /// otherwise the descriptor itself, or nil.
    pub fn get_descriptor(&self, value: &Value) -> Value {
        let Some(d) = self.descriptor_of(value) else {
            return Value::Nil;
        };
        match self.heap.table(d).get_str(fields::GUARD) {
            Value::Nil => Value::Table(d),
            guard => guard.clone(),
        }
    }

    /// Public descriptor mutator. Fails on a guarded descriptor.
    pub fn set_descriptor(
        &mut self,
        table: ObjectId,
        descriptor: Option<ObjectId>,
    ) -> Result<(), RuntimeError> {
        self.attach_descriptor(&Value::Table(table), descriptor, Protection::Enforce)
    }
}
