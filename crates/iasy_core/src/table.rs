//! Raw associative container.
//!
//! A `Table` maps unique keys to values and doubles as a 1-based sequence.
//! Keys `1..=n` live in a dense array part; all other keys live in an
//! insertion-ordered hash part. Every operation here is raw: descriptors are
//! stored but never consulted.

use crate::gc::ObjectId;
use crate::value::{InvalidKey, TableKey, Value, fast_hasher};
use ahash::RandomState;
use indexmap::IndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("table index is nil")]
    NilKey,
    #[error("table index is NaN")]
    NaNKey,
    #[error("invalid key to 'next'")]
    InvalidNextKey,
}

impl From<InvalidKey> for TableError {
    fn from(k: InvalidKey) -> Self {
        match k {
            InvalidKey::Nil => TableError::NilKey,
            InvalidKey::NaN => TableError::NaNKey,
        }
    }
}

pub struct Table {
    /// Values for keys `1..=array.len()`. The last element is never nil;
    /// interior nils are holes.
    array: Vec<Value>,
    /// Remaining keys. Cleared entries stay behind as nil tombstones so that a
    /// traversal can keep going after a field is assigned nil.
    hash: IndexMap<TableKey, Value, RandomState>,
    tombstones: usize,
    descriptor: Option<ObjectId>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(narray: usize, nhash: usize) -> Self {
        Self {
            array: Vec::with_capacity(narray),
            hash: IndexMap::with_capacity_and_hasher(nhash, fast_hasher()),
            tombstones: 0,
            descriptor: None,
        }
    }

    /// Build a sequence holding `items` at keys `1..`.
    ///
    /// Like a table constructor, every position is placed in the array part,
    /// so interior nils stay as holes and the border is the last non-nil
    /// position.
    pub fn from_sequence<I: IntoIterator<Item = Value>>(items: I) -> Self {
        let mut t = Self::new();
        t.array.extend(items);
        t.trim_array();
        t
    }

    #[inline]
    pub fn descriptor(&self) -> Option<ObjectId> {
        self.descriptor
    }

    #[inline]
    pub fn set_descriptor(&mut self, descriptor: Option<ObjectId>) {
        self.descriptor = descriptor;
    }

    pub fn get(&self, key: &Value) -> &Value {
        match TableKey::from_value(key) {
            Ok(k) => self.get_key(&k),
            Err(_) => &Value::NIL,
        }
    }

    pub fn get_key(&self, key: &TableKey) -> &Value {
        if let Some(i) = key.as_int() {
            return self.get_int(i);
        }
        self.hash.get(key).unwrap_or(&Value::NIL)
    }

    pub fn get_int(&self, i: i64) -> &Value {
        if i >= 1 && (i as u64) <= self.array.len() as u64 {
            return &self.array[(i - 1) as usize];
        }
        self.hash.get(&TableKey::Int(i)).unwrap_or(&Value::NIL)
    }

    pub fn get_str(&self, name: &str) -> &Value {
        self.hash.get(&TableKey::from(name)).unwrap_or(&Value::NIL)
    }

    pub fn set(&mut self, key: &Value, value: Value) -> Result<(), TableError> {
        let key = TableKey::from_value(key)?;
        self.set_key(key, value);
        Ok(())
    }

    pub fn set_key(&mut self, key: TableKey, value: Value) {
        match key {
            TableKey::Int(i) => self.set_int(i, value),
            k => self.set_hash(k, value),
        }
    }

    pub fn set_str(&mut self, name: &str, value: Value) {
        self.set_hash(TableKey::from(name), value);
    }

    pub fn set_int(&mut self, i: i64, value: Value) {
        let len = self.array.len() as i64;
        if i >= 1 && i <= len {
            self.array[(i - 1) as usize] = value;
            if i == len {
                self.trim_array();
            }
        } else if i == len + 1 && !value.is_nil() {
            if self.hash.shift_remove(&TableKey::Int(i)).is_some_and(|v| v.is_nil()) {
                self.tombstones -= 1;
            }
            self.array.push(value);
            self.migrate_from_hash();
        } else {
            self.set_hash(TableKey::Int(i), value);
        }
    }

    fn set_hash(&mut self, key: TableKey, value: Value) {
        if let Some(slot) = self.hash.get_mut(&key) {
            match (slot.is_nil(), value.is_nil()) {
                (false, true) => self.tombstones += 1,
                (true, false) => self.tombstones -= 1,
                _ => {}
            }
            *slot = value;
            return;
        }
        if value.is_nil() {
            return;
        }
        if self.tombstones > 0 && self.tombstones * 2 >= self.hash.len() {
            self.compact();
        }
        self.hash.insert(key, value);
    }

    fn trim_array(&mut self) {
        while self.array.last().is_some_and(|v| v.is_nil()) {
            self.array.pop();
        }
    }

    /// Pull keys that now extend the array part out of the hash part.
    fn migrate_from_hash(&mut self) {
        loop {
            let next = TableKey::Int(self.array.len() as i64 + 1);
            match self.hash.shift_remove(&next) {
                Some(v) if !v.is_nil() => self.array.push(v),
                Some(_) => {
                    self.tombstones -= 1;
                    break;
                }
                None => break,
            }
        }
    }

    fn compact(&mut self) {
        self.hash.retain(|_, v| !v.is_nil());
        self.tombstones = 0;
    }

    /// A border of the sequence part: `t[n] ~= nil and t[n+1] == nil`.
    #[inline]
    pub fn border(&self) -> usize {
        self.array.len()
    }

    /// Number of non-nil entries.
    pub fn count(&self) -> usize {
        self.array.iter().filter(|v| !v.is_nil()).count() + self.hash.len() - self.tombstones
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The entry following `key` in traversal order, or `None` at the end.
    ///
    /// Array keys come first in ascending order, then hash keys in insertion
    /// order. Passing nil starts a traversal.
    pub fn next(&self, key: &Value) -> Result<Option<(Value, Value)>, TableError> {
        let start_hash = match key {
            Value::Nil => return Ok(self.next_from_array(0).or_else(|| self.next_from_hash(0))),
            k => {
                let k = TableKey::from_value(k)?;
                match k.as_int() {
                    Some(i) if i >= 1 && (i as u64) <= self.array.len() as u64 => {
                        if let Some(e) = self.next_from_array(i as usize) {
                            return Ok(Some(e));
                        }
                        0
                    }
                    _ => match self.hash.get_index_of(&k) {
                        Some(idx) => idx + 1,
                        // A trailing array slot cleared during traversal.
                        None if k.as_int().is_some_and(|i| i > self.array.len() as i64) => 0,
                        None => return Err(TableError::InvalidNextKey),
                    },
                }
            }
        };
        Ok(self.next_from_hash(start_hash))
    }

    fn next_from_array(&self, from: usize) -> Option<(Value, Value)> {
        self.array[from..]
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_nil())
            .map(|(off, v)| (Value::Int((from + off + 1) as i64), v.clone()))
    }

    fn next_from_hash(&self, from: usize) -> Option<(Value, Value)> {
        (from..self.hash.len())
            .filter_map(|i| self.hash.get_index(i))
            .find(|(_, v)| !v.is_nil())
            .map(|(k, v)| (k.to_value(), v.clone()))
    }

    /// All live entries in traversal order.
    pub fn entries(&self) -> impl Iterator<Item = (TableKey, &Value)> + '_ {
        let array = self
            .array
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nil())
            .map(|(i, v)| (TableKey::Int(i as i64 + 1), v));
        let hash = self
            .hash
            .iter()
            .filter(|(_, v)| !v.is_nil())
            .map(|(k, v)| (k.clone(), v));
        array.chain(hash)
    }

    /// Every value and key that may reference a heap object, for marking.
    pub fn references(&self) -> impl Iterator<Item = Value> + '_ {
        let keys = self.hash.keys().map(TableKey::to_value);
        let values = self.array.iter().chain(self.hash.values()).cloned();
        keys.chain(values).filter(|v| v.obj_id().is_some())
    }

    pub fn approx_size(&self) -> usize {
        std::mem::size_of::<Table>()
            + self.array.capacity() * std::mem::size_of::<Value>()
            + self.hash.capacity()
                * (std::mem::size_of::<TableKey>() + std::mem::size_of::<Value>() + 16)
    }
}
