//! Nominal type resolution (`type`).

use std::fmt;
use std::rc::Rc;

use iasy_core::Value;
use iasy_core::value::KIND_TABLE;

use super::{Runtime, fields};

/// Reported for a table that has a descriptor without a string `tag`.
pub const KIND_OBJECT: &str = "object";

/// Result of `type`: a primitive kind or a declared tag.
#[derive(Clone, Debug)]
pub enum TypeTag {
    Builtin(&'static str),
    Named(Rc<str>),
}

impl TypeTag {
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Builtin(s) => *s,
            TypeTag::Named(s) => &**s,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            TypeTag::Builtin(s) => Value::from(s),
            TypeTag::Named(s) => Value::Str(s),
        }
    }
}

// Tags compare by name: a table tagged "string" is the same type as a string.
impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TypeTag {}

impl PartialEq<str> for TypeTag {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TypeTag {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Runtime {
    /// Classify `value`.
    ///
    /// Only the value's own descriptor is inspected; delegates are never
    /// followed, so a tag declared on an ancestor does not show through.
    pub fn type_of(&self, value: &Value) -> TypeTag {
        let Value::Table(table) = value else {
            return TypeTag::Builtin(value.kind_name());
        };
        match self.heap.table(*table).descriptor() {
            Some(d) => match self.heap.table(d).get_str(fields::TAG) {
                Value::Str(tag) => TypeTag::Named(tag.clone()),
                _ => TypeTag::Builtin(KIND_OBJECT),
            },
            None => TypeTag::Builtin(KIND_TABLE),
        }
    }
}
