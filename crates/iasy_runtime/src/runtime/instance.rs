//! Instance construction (`new`).

use iasy_core::{ObjectId, Table, Value};

use super::cache::CacheState;
use super::config::ReentrancyPolicy;
use super::{Runtime, fields};
use crate::errors::{RuntimeError, bad_type, messages};

impl Runtime {
    /// Create an instance of `class`.
    ///
    /// The first call synthesizes a descriptor from the class's
    /// `behaviorTemplate` (every entry copied, `delegate` pointing at the
    /// class) and caches it. Every later instance of the class shares that
    /// same descriptor object.
    pub fn new_instance(&mut self, class: &Value) -> Result<ObjectId, RuntimeError> {
        let Some(class_id) = class.as_table() else {
            return Err(bad_type(1, "new", messages::TABLE_EXPECTED, Some(class)));
        };

        let descriptor = match self.descriptors.get(class_id) {
            Some(CacheState::Ready(d)) => {
                tracing::trace!(class = %class_id, descriptor = %d, "new: cached descriptor");
                d
            }
            Some(CacheState::Building) => match self.config.reentrant_construction {
                ReentrancyPolicy::Reject => return Err(RuntimeError::ReentrantConstruction),
                ReentrancyPolicy::Uncached => self.synthesize_descriptor(class_id)?,
            },
            None => {
                self.descriptors.begin(class_id);
                match self.synthesize_descriptor(class_id) {
                    Ok(d) => {
                        self.descriptors.finish(class_id, d);
                        tracing::debug!(class = %class_id, descriptor = %d, "new: synthesized class descriptor");
                        d
                    }
                    Err(e) => {
                        self.descriptors.abandon(class_id);
                        return Err(e);
                    }
                }
            }
        };

        let mut instance = Table::new();
        instance.set_descriptor(Some(descriptor));
        Ok(self.heap.alloc_table(instance))
    }

    fn synthesize_descriptor(&mut self, class: ObjectId) -> Result<ObjectId, RuntimeError> {
        let template = self.template_of(&Value::Table(class))?;
        let mut descriptor = Table::new();
        if let Some(template) = template {
            for (k, v) in self.heap.table(template).entries() {
                descriptor.set_key(k, v.clone());
            }
        }
        descriptor.set_str(fields::DELEGATE, Value::Table(class));
        Ok(self.heap.alloc_table(descriptor))
    }

    /// `value.behaviorTemplate` through an ordinary (delegating) read.
    pub(crate) fn template_of(&mut self, value: &Value) -> Result<Option<ObjectId>, RuntimeError> {
        match self.get_field(value, fields::BEHAVIOR_TEMPLATE)? {
            Value::Nil => Ok(None),
            Value::Table(t) => Ok(Some(t)),
            other => Err(RuntimeError::BadTemplate(other.kind_name())),
        }
    }

    /// Cache state of `class`'s instance descriptor.
    pub fn cached_descriptor(&self, class: ObjectId) -> Option<CacheState> {
        self.descriptors.get(class)
    }
}
