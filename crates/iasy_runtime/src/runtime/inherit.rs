//! Single-level inheritance (`extends`).

use iasy_core::{ObjectId, Table, Value};

use super::descriptor::Protection;
use super::{Runtime, fields};
use crate::core::Heap;
use crate::errors::{RuntimeError, bad_type, messages};

/// Fields a derived template never takes from its parent.
const NOT_INHERITED: &[&str] = &[fields::TAG];

/// A base class waiting for the class that derives from it.
///
/// `extends(Base)(Derived)` in script form; `rt.extends(&base)?.apply(rt,
/// &derived)` from Rust.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extends {
    base: ObjectId,
}

impl Extends {
    pub fn base(&self) -> ObjectId {
        self.base
    }

    pub fn apply(&self, rt: &mut Runtime, derived: &Value) -> Result<Value, RuntimeError> {
        rt.inherit(self.base, derived)
    }
}

/// Merge two templates into a fresh table.
///
/// `own` entries are copied first, then every `parent` entry whose key is not
/// in `excluded`, so parent entries win on conflicts.
pub fn merge_templates(
    heap: &mut Heap,
    parent: Option<ObjectId>,
    own: Option<ObjectId>,
    excluded: &[&str],
) -> ObjectId {
    let mut merged = Table::new();
    if let Some(own) = own {
        for (k, v) in heap.table(own).entries() {
            merged.set_key(k, v.clone());
        }
    }
    if let Some(parent) = parent {
        for (k, v) in heap.table(parent).entries() {
            if excluded.iter().any(|name| k.is_str(name)) {
                continue;
            }
            merged.set_key(k, v.clone());
        }
    }
    heap.alloc_table(merged)
}

impl Runtime {
    pub fn extends(&self, base: &Value) -> Result<Extends, RuntimeError> {
        match base.as_table() {
            Some(base) => Ok(Extends { base }),
            None => Err(bad_type(1, "extends", messages::TABLE_EXPECTED, Some(base))),
        }
    }

    /// Make `derived` inherit from `base` and return `derived`.
    ///
    /// The merged template becomes both `derived`'s descriptor and its
    /// `behaviorTemplate`, with `delegate` set to `base`. The descriptor is
    /// attached without honoring a guard on `derived`.
    pub fn inherit(&mut self, base: ObjectId, derived: &Value) -> Result<Value, RuntimeError> {
        let own = self.template_of(derived)?;
        let parent = self.template_of(&Value::Table(base))?;

        let merged = merge_templates(&mut self.heap, parent, own, NOT_INHERITED);
        self.heap
            .table_mut(merged)
            .set_str(fields::DELEGATE, Value::Table(base));

        self.attach_descriptor(derived, Some(merged), Protection::Bypass)?;
        if let Some(derived_id) = derived.as_table() {
            self.heap
                .table_mut(derived_id)
                .set_str(fields::BEHAVIOR_TEMPLATE, Value::Table(merged));
            tracing::debug!(base = %base, derived = %derived_id, template = %merged, "extends: merged class template");
        }
        Ok(derived.clone())
    }
}
