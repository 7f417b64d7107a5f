//! The runtime: heap, globals and the object model entry points.

mod access;
mod cache;
mod call;
mod config;
mod descriptor;
mod gc;
mod inherit;
mod instance;
mod predicates;
mod type_tag;

use std::any::Any;
use std::rc::Rc;

use iasy_core::value::{FastHashMap, fast_map_new};
use iasy_core::{ObjectId, Table, Value};

use crate::builtins_registry::{BuiltinProvider, BuiltinRegistry, StdBuiltinProvider};
use crate::core::{BoundBuiltin, BoundFn, BuiltinFn, Function, Heap, ManagedObject, Rets};
use crate::errors::RuntimeError;

pub use cache::CacheState;
pub use config::{ReentrancyPolicy, RuntimeConfig};
pub use descriptor::Protection;
pub use inherit::{Extends, merge_templates};
pub use predicates::Reduction;
pub use type_tag::TypeTag;

/// Descriptor and template field names recognized by the object model.
pub mod fields {
    pub const DELEGATE: &str = "delegate";
    pub const GUARD: &str = "guard";
    pub const TAG: &str = "tag";
    pub const LEN: &str = "len";
    pub const BEHAVIOR_TEMPLATE: &str = "behaviorTemplate";
}

pub struct Runtime {
    pub heap: Heap,
    globals: ObjectId,
    descriptors: cache::DescriptorCache,
    /// Installed builtins and helpers handed out by other builtins (`next`
    /// from `pairs`), kept alive across collections.
    interned: FastHashMap<&'static str, ObjectId>,
    config: RuntimeConfig,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let mut heap = Heap::new();
        let globals = heap.alloc_table(Table::new());
        let mut rt = Self {
            heap,
            globals,
            descriptors: cache::DescriptorCache::new(),
            interned: fast_map_new(),
            config,
        };
        let mut registry = BuiltinRegistry::new();
        StdBuiltinProvider.install(&mut registry);
        registry.install_into(&mut rt);
        rt
    }

    /// Install an additional set of builtins into the globals table.
    pub fn install(&mut self, provider: &dyn BuiltinProvider) {
        let mut registry = BuiltinRegistry::new();
        provider.install(&mut registry);
        registry.install_into(self);
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn globals(&self) -> ObjectId {
        self.globals
    }

    pub fn global(&self, name: &str) -> Value {
        self.heap.table(self.globals).get_str(name).clone()
    }

    pub fn set_global(&mut self, name: &str, value: Value) {
        self.heap.table_mut(self.globals).set_str(name, value);
    }

    pub fn create_table(&mut self) -> ObjectId {
        self.heap.alloc_table(Table::new())
    }

    /// New table holding `items` at keys `1..`.
    pub fn create_sequence<I>(&mut self, items: I) -> ObjectId
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.heap
            .alloc_table(Table::from_sequence(items.into_iter().map(Into::into)))
    }

    /// New table holding string-keyed `fields`.
    pub fn create_record<'a, I, V>(&mut self, fields: I) -> ObjectId
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Into<Value>,
    {
        let mut t = Table::new();
        for (k, v) in fields {
            t.set_str(k, v.into());
        }
        self.heap.alloc_table(t)
    }

    pub fn create_builtin(&mut self, name: &'static str, fun: BuiltinFn) -> Value {
        Value::Function(
            self.heap
                .alloc(ManagedObject::Function(Function::Builtin { name, fun })),
        )
    }

    /// Builtin carrying `captured` values, passed ahead of its call arguments.
    pub fn create_bound(
        &mut self,
        name: &'static str,
        fun: BoundFn,
        captured: &[Value],
    ) -> Value {
        Value::Function(
            self.heap
                .alloc(ManagedObject::Function(Function::Bound(Box::new(BoundBuiltin {
                    name,
                    fun,
                    captured: captured.iter().cloned().collect(),
                })))),
        )
    }

    /// Register a host closure as a function value.
    pub fn create_function<F>(&mut self, name: &str, fun: F) -> Value
    where
        F: Fn(&mut Runtime, &[Value]) -> Result<Rets, RuntimeError> + 'static,
    {
        Value::Function(self.heap.alloc(ManagedObject::Function(Function::Host {
            name: Rc::from(name),
            fun: Rc::new(fun),
        })))
    }

    pub fn create_userdata<T: Any>(&mut self, data: T) -> Value {
        Value::Userdata(self.heap.alloc(ManagedObject::Userdata(Box::new(data))))
    }

    /// Payload of a userdata value, if it holds a `T`.
    pub fn userdata<T: Any>(&self, value: &Value) -> Option<&T> {
        match value {
            Value::Userdata(id) => self.heap.userdata(*id).downcast_ref(),
            _ => None,
        }
    }

    /// Install `fun` as the global `name`. Builtins that hand out other
    /// builtins (`pairs`) find this same object through the interned table.
    pub(crate) fn define_builtin(&mut self, name: &'static str, fun: BuiltinFn) {
        let f = self.create_builtin(name, fun);
        if let Some(id) = f.as_function() {
            self.interned.insert(name, id);
        }
        self.set_global(name, f);
    }

    /// Shared instance of a builtin, allocated once per runtime.
    pub(crate) fn interned_builtin(&mut self, name: &'static str, fun: BuiltinFn) -> Value {
        if let Some(id) = self.interned.get(name) {
            return Value::Function(*id);
        }
        let v = self.create_builtin(name, fun);
        if let Some(id) = v.as_function() {
            self.interned.insert(name, id);
        }
        v
    }

    pub fn raw_get(&self, table: ObjectId, key: impl Into<Value>) -> Value {
        self.heap.table(table).get(&key.into()).clone()
    }

    pub fn raw_set(
        &mut self,
        table: ObjectId,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<(), RuntimeError> {
        self.heap.table_mut(table).set(&key.into(), value.into())?;
        Ok(())
    }

    /// Raw length of a table or string.
    pub fn raw_len(&self, value: &Value) -> Option<usize> {
        match value {
            Value::Table(id) => Some(self.heap.table(*id).border()),
            Value::Str(s) => Some(s.len()),
            _ => None,
        }
    }
}
