//! Explicit collection cycles.

use iasy_core::Value;

use super::Runtime;

impl Runtime {
    /// Run a full mark-and-sweep and return the number of objects freed.
    ///
    /// Roots are the globals table, interned builtins and `extra_roots`.
    /// A class's cached instance descriptor survives exactly as long as the
    /// class itself; cache entries of freed classes are dropped.
    pub fn collect_garbage(&mut self, extra_roots: &[Value]) -> usize {
        self.heap.clear_marks();

        let mut roots = Vec::with_capacity(1 + self.interned.len() + extra_roots.len());
        roots.push(Value::Table(self.globals));
        roots.extend(self.interned.values().map(|id| Value::Function(*id)));
        roots.extend_from_slice(extra_roots);
        self.heap.mark_from(roots);

        // Cached descriptors are ephemerons keyed by their class.
        loop {
            let pending: Vec<Value> = self
                .descriptors
                .ready()
                .filter(|(class, d)| self.heap.is_marked(*class) && !self.heap.is_marked(*d))
                .map(|(_, d)| Value::Table(d))
                .collect();
            if pending.is_empty() {
                break;
            }
            self.heap.mark_from(pending);
        }

        let allocated = self.heap.alloc_count();
        let freed = self.heap.sweep();
        let heap = &self.heap;
        let purged = self.descriptors.purge(|class| heap.contains(class));
        tracing::trace!(
            allocated = allocated,
            freed = freed,
            purged = purged,
            cached = self.descriptors.len(),
            live = self.heap.live_count(),
            bytes = self.heap.allocated_bytes(),
            "gc: collection finished"
        );
        freed
    }

    /// Number of classes with a cache entry.
    pub fn cached_class_count(&self) -> usize {
        self.descriptors.len()
    }
}
