//! Per-class descriptor cache used by `new`.
//!
//! Entries are keyed by class identity and hold no strong reference: the
//! collector keeps a cached descriptor alive only while its class is alive,
//! and drops entries whose class was freed.

use iasy_core::ObjectId;
use iasy_core::value::{FastHashMap, fast_map_new};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    /// The descriptor is being synthesized; the class template may be running
    /// user hooks right now.
    Building,
    Ready(ObjectId),
}

pub(crate) struct DescriptorCache {
    entries: FastHashMap<ObjectId, CacheState>,
}

impl DescriptorCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: fast_map_new(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, class: ObjectId) -> Option<CacheState> {
        self.entries.get(&class).copied()
    }

    pub(crate) fn begin(&mut self, class: ObjectId) {
        self.entries.insert(class, CacheState::Building);
    }

    pub(crate) fn finish(&mut self, class: ObjectId, descriptor: ObjectId) {
        self.entries.insert(class, CacheState::Ready(descriptor));
    }

    pub(crate) fn abandon(&mut self, class: ObjectId) {
        self.entries.remove(&class);
    }

    /// `(class, descriptor)` pairs with a finished descriptor.
    pub(crate) fn ready(&self) -> impl Iterator<Item = (ObjectId, ObjectId)> + '_ {
        self.entries.iter().filter_map(|(class, state)| match state {
            CacheState::Ready(d) => Some((*class, *d)),
            CacheState::Building => None,
        })
    }

    /// Drop entries whose class no longer exists. Returns how many were dropped.
    pub(crate) fn purge(&mut self, mut alive: impl FnMut(ObjectId) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|class, _| alive(*class));
        before - self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
