//! Garbage collection and heap management.

use std::any::Any;

use iasy_core::{ObjectId, Table, Value};

use super::function::Function;

pub enum ManagedObject {
    Table(Box<Table>),
    Function(Function),
    Userdata(Box<dyn Any>),
}

impl ManagedObject {
    pub fn size(&self) -> usize {
        let base = std::mem::size_of::<ManagedObject>();
        let deep = match self {
            ManagedObject::Table(t) => t.approx_size(),
            ManagedObject::Function(f) => {
                f.captured().len() * std::mem::size_of::<Value>() + 64
            }
            ManagedObject::Userdata(_) => 64,
        };
        base + deep
    }
}

pub struct Heap {
    objects: Vec<Option<ManagedObject>>,
    free_list: Vec<usize>,
    marks: Vec<u64>,
    alloc_count: usize,
    alloc_bytes: usize,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(256),
            free_list: Vec::new(),
            marks: Vec::new(),
            alloc_count: 0,
            alloc_bytes: 0,
        }
    }

    /// Allocate a managed object on the heap.
    pub fn alloc(&mut self, obj: ManagedObject) -> ObjectId {
        self.alloc_count += 1;
        self.alloc_bytes += obj.size();

        if let Some(id) = self.free_list.pop() {
            self.objects[id] = Some(obj);
            ObjectId(id)
        } else {
            let id = self.objects.len();
            self.objects.push(Some(obj));
            ObjectId(id)
        }
    }

    pub fn alloc_table(&mut self, table: Table) -> ObjectId {
        self.alloc(ManagedObject::Table(Box::new(table)))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.get(id.0).is_some_and(Option::is_some)
    }

    pub fn get(&self, id: ObjectId) -> &ManagedObject {
        self.objects[id.0]
            .as_ref()
            .expect("Object was garbage collected")
    }

    pub fn get_mut(&mut self, id: ObjectId) -> &mut ManagedObject {
        self.objects[id.0]
            .as_mut()
            .expect("Object was garbage collected")
    }

    /// Table behind a `Value::Table` handle.
    pub fn table(&self, id: ObjectId) -> &Table {
        match self.get(id) {
            ManagedObject::Table(t) => t,
            _ => unreachable!("object {id} is not a table"),
        }
    }

    pub fn table_mut(&mut self, id: ObjectId) -> &mut Table {
        match self.get_mut(id) {
            ManagedObject::Table(t) => t,
            _ => unreachable!("object {id} is not a table"),
        }
    }

    pub fn function(&self, id: ObjectId) -> &Function {
        match self.get(id) {
            ManagedObject::Function(f) => f,
            _ => unreachable!("object {id} is not a function"),
        }
    }

    pub fn userdata(&self, id: ObjectId) -> &dyn Any {
        match self.get(id) {
            ManagedObject::Userdata(u) => u.as_ref(),
            _ => unreachable!("object {id} is not userdata"),
        }
    }

    /// Allocations since the last sweep.
    pub fn alloc_count(&self) -> usize {
        self.alloc_count
    }

    /// Estimated bytes held by live objects.
    pub fn allocated_bytes(&self) -> usize {
        self.alloc_bytes
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.objects.len() - self.free_list.len()
    }

    pub fn is_marked(&self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        self.marks
            .get(word)
            .is_some_and(|w| (w & (1 << bit)) != 0)
    }

    fn set_mark(&mut self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        if word >= self.marks.len() {
            self.marks.resize(word + 1, 0);
        }
        let w = &mut self.marks[word];
        let mask = 1 << bit;
        if (*w & mask) != 0 {
            return false;
        }
        *w |= mask;
        true
    }

    pub(crate) fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Mark everything reachable from `roots`. Marks from earlier calls are
    /// kept, so this can be called repeatedly within one collection cycle.
    pub(crate) fn mark_from(&mut self, roots: Vec<Value>) {
        let mut pending = roots;
        while let Some(val) = pending.pop() {
            let Some(id) = val.obj_id() else { continue };
            if !self.contains(id) || !self.set_mark(id) {
                continue;
            }
            match self.get(id) {
                ManagedObject::Table(t) => {
                    pending.extend(t.references());
                    if let Some(d) = t.descriptor() {
                        pending.push(Value::Table(d));
                    }
                }
                ManagedObject::Function(f) => {
                    pending.extend(f.captured().iter().cloned());
                }
                ManagedObject::Userdata(_) => {}
            }
        }
    }

    /// Free every unmarked object and return how many were freed.
    pub(crate) fn sweep(&mut self) -> usize {
        let mut freed = 0;
        let mut live_bytes = 0;
        self.free_list.clear();

        for i in 0..self.objects.len() {
            let marked = self.is_marked(ObjectId(i));
            match self.objects[i].as_ref().map(ManagedObject::size) {
                Some(size) if marked => live_bytes += size,
                Some(_) => {
                    self.objects[i] = None;
                    self.free_list.push(i);
                    freed += 1;
                }
                None => self.free_list.push(i),
            }
        }

        // Truncate trailing empty slots to reduce memory usage
        while self.objects.last().is_some_and(|o| o.is_none()) {
            self.objects.pop();
        }
        let new_len = self.objects.len();
        self.free_list.retain(|&i| i < new_len);

        self.marks.clear();
        self.alloc_count = 0;
        self.alloc_bytes = live_bytes;
        freed
    }
}
