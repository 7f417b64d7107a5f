//! Sequence predicates: `same`, `all` and `any`.

use iasy_core::{ObjectId, Value};
use smallvec::smallvec;

use super::Runtime;
use crate::core::Rets;
use crate::errors::{RuntimeError, bad_type, messages};

/// Outcome of `all` / `any`: the verdict and, when a single element decided
/// it early, that element's 1-based position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reduction {
    pub result: bool,
    pub index: Option<i64>,
}

impl Reduction {
    fn decided_at(result: bool, index: i64) -> Self {
        Self {
            result,
            index: Some(index),
        }
    }

    fn exhausted(result: bool) -> Self {
        Self {
            result,
            index: None,
        }
    }

    pub fn into_rets(self) -> Rets {
        match self.index {
            Some(i) => smallvec![Value::Bool(self.result), Value::Int(i)],
            None => smallvec![Value::Bool(self.result)],
        }
    }
}

impl Runtime {
    /// Check the argument and fetch its length through the length operator.
    fn sequence(&mut self, seq: &Value, function: &'static str) -> Result<(ObjectId, i64), RuntimeError> {
        let Some(table) = seq.as_table() else {
            return Err(bad_type(1, function, messages::TABLE_EXPECTED, Some(seq)));
        };
        let n = self.length(seq)?;
        Ok((table, n))
    }

    /// True when every element of `seq` has the same `type`.
    ///
    /// An empty sequence answers false.
    pub fn same(&mut self, seq: &Value) -> Result<bool, RuntimeError> {
        let (table, n) = self.sequence(seq, "same")?;
        if n <= 0 {
            return Ok(false);
        }
        let first = self.type_of(self.heap.table(table).get_int(1));
        for i in 2..=n {
            if self.type_of(self.heap.table(table).get_int(i)) != first {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Stops at the first falsy element.
    pub fn all(&mut self, seq: &Value) -> Result<Reduction, RuntimeError> {
        let (table, n) = self.sequence(seq, "all")?;
        for i in 1..=n {
            if !self.heap.table(table).get_int(i).is_truthy() {
                return Ok(Reduction::decided_at(false, i));
            }
        }
        Ok(Reduction::exhausted(true))
    }

    /// Stops at the first truthy element.
    pub fn any(&mut self, seq: &Value) -> Result<Reduction, RuntimeError> {
        let (table, n) = self.sequence(seq, "any")?;
        for i in 1..=n {
            if self.heap.table(table).get_int(i).is_truthy() {
                return Ok(Reduction::decided_at(true, i));
            }
        }
        Ok(Reduction::exhausted(false))
    }
}
