//! Runtime value representation.
//!
//! Heap values (tables, functions, userdata) are handles into the runtime heap;
//! everything else is stored inline.

use crate::gc::ObjectId;
use ahash::RandomState;
use hashbrown::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

pub fn fast_hasher() -> RandomState {
    RandomState::with_seeds(0, 0, 0, 0)
}

pub fn fast_map_new<K: Eq + Hash, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(fast_hasher())
}

// Kind names reported for values that carry no descriptor.
pub const KIND_NIL: &str = "nil";
pub const KIND_BOOLEAN: &str = "boolean";
pub const KIND_NUMBER: &str = "number";
pub const KIND_STRING: &str = "string";
pub const KIND_TABLE: &str = "table";
pub const KIND_FUNCTION: &str = "function";
pub const KIND_USERDATA: &str = "userdata";

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Table(ObjectId),
    Function(ObjectId),
    Userdata(ObjectId),
}

impl Value {
    pub const NIL: Value = Value::Nil;

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Only `nil` and `false` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[inline]
    pub fn as_table(&self) -> Option<ObjectId> {
        match self {
            Value::Table(id) => Some(*id),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<ObjectId> {
        match self {
            Value::Function(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of a number; floats qualify only when integral.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => float_to_int(*f),
            _ => None,
        }
    }

    /// Heap handle referenced by this value, if any.
    #[inline]
    pub fn obj_id(&self) -> Option<ObjectId> {
        match self {
            Value::Table(id) | Value::Function(id) | Value::Userdata(id) => Some(*id),
            _ => None,
        }
    }

    /// Primitive classification, ignoring any attached descriptor.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => KIND_NIL,
            Value::Bool(_) => KIND_BOOLEAN,
            Value::Int(_) | Value::Float(_) => KIND_NUMBER,
            Value::Str(_) => KIND_STRING,
            Value::Table(_) => KIND_TABLE,
            Value::Function(_) => KIND_FUNCTION,
            Value::Userdata(_) => KIND_USERDATA,
        }
    }

    /// Primitive equality: no descriptor hooks are consulted.
    pub fn raw_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                float_to_int(*f) == Some(*i)
            }
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Userdata(a), Value::Userdata(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Table(id) => write!(f, "table: {id}"),
            Value::Function(id) => write!(f, "function: {id}"),
            Value::Userdata(id) => write!(f, "userdata: {id}"),
        }
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Normalized table key.
///
/// Integral floats collapse onto `Int` so that `t[2]` and `t[2.0]` address the
/// same slot. Other floats are stored by bit pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableKey {
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(Rc<str>),
    Table(ObjectId),
    Function(ObjectId),
    Userdata(ObjectId),
}

/// Why a value cannot be used as a table key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidKey {
    Nil,
    NaN,
}

impl TableKey {
    pub fn from_value(v: &Value) -> Result<TableKey, InvalidKey> {
        Ok(match v {
            Value::Nil => return Err(InvalidKey::Nil),
            Value::Bool(b) => TableKey::Bool(*b),
            Value::Int(i) => TableKey::Int(*i),
            Value::Float(f) => {
                if f.is_nan() {
                    return Err(InvalidKey::NaN);
                }
                match float_to_int(*f) {
                    Some(i) => TableKey::Int(i),
                    None => TableKey::Float(f.to_bits()),
                }
            }
            Value::Str(s) => TableKey::Str(s.clone()),
            Value::Table(id) => TableKey::Table(*id),
            Value::Function(id) => TableKey::Function(*id),
            Value::Userdata(id) => TableKey::Userdata(*id),
        })
    }

    pub fn to_value(&self) -> Value {
        match self {
            TableKey::Bool(b) => Value::Bool(*b),
            TableKey::Int(i) => Value::Int(*i),
            TableKey::Float(bits) => Value::Float(f64::from_bits(*bits)),
            TableKey::Str(s) => Value::Str(s.clone()),
            TableKey::Table(id) => Value::Table(*id),
            TableKey::Function(id) => Value::Function(*id),
            TableKey::Userdata(id) => Value::Userdata(*id),
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TableKey::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_str(&self, s: &str) -> bool {
        matches!(self, TableKey::Str(k) if &**k == s)
    }
}

impl From<&str> for TableKey {
    fn from(s: &str) -> Self {
        TableKey::Str(Rc::from(s))
    }
}

impl From<i64> for TableKey {
    fn from(i: i64) -> Self {
        TableKey::Int(i)
    }
}
