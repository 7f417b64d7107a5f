//! Iasy runtime: a prototype object model over a dynamic table value system.
//!
//! Classes are ordinary tables carrying a `behaviorTemplate`. `new` mints
//! instances that share one cached descriptor per class, `extends` wires a
//! derived class to its base through `delegate`, and `type` reports the
//! nominal `tag` found on a value's own descriptor.

pub mod core;
pub mod errors;
pub mod runtime;

mod builtins;
pub mod builtins_registry;

pub use iasy_core::{ObjectId, Table, TableError, TableKey, Value};

pub use builtins_registry::{BuiltinProvider, BuiltinRegistry, StdBuiltinProvider};
pub use crate::core::Rets;
pub use errors::RuntimeError;
pub use runtime::{
    CacheState, Extends, Protection, ReentrancyPolicy, Reduction, Runtime, RuntimeConfig,
    TypeTag, fields, merge_templates,
};
