//! Core types for the Iasy value system.
//!
//! This crate contains the fundamental types that are independent of the runtime:
//! - `ObjectId` - Handle to heap-allocated objects
//! - `Value` - Dynamic runtime value representation
//! - `TableKey` - Normalized key for table lookups
//! - `Table` - Raw associative container with an optional attached descriptor

pub mod gc;
pub mod table;
pub mod value;

pub use gc::ObjectId;
pub use table::{Table, TableError};
pub use value::{TableKey, Value};
