//! Heap storage and function objects.

pub mod function;
pub mod heap;

pub use function::{BoundBuiltin, BoundFn, BuiltinFn, Function, HostFn, Rets};
pub use heap::{Heap, ManagedObject};
