//! Record of the iterates visited by a minimization, for plotting and
//! debugging.

use crate::lin::Lin;

/// One line minimization: where it ended and the step that got there.
#[derive(Debug, Clone)]
pub struct Record<V: Lin> {
    pub value: V::F,
    pub point: V,
    pub step: V,
}

/// Trace of a minimization run.
#[derive(Debug, Clone)]
pub struct History<V: Lin> {
    /// Function value at the initial point
    pub initial_value: V::F,
    /// Initial point
    pub initial_point: V,
    /// One record per line minimization, in order
    pub records: Vec<Record<V>>,
}

impl<V: Lin + Clone> History<V> {
    pub fn new(value: V::F, point: &V, capacity: usize) -> Self {
        History {
            initial_value: value,
            initial_point: point.clone(),
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, value: V::F, point: &V, step: &V) {
        self.records.push(Record {
            value,
            point: point.clone(),
            step: step.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Function values, starting with the initial one.
    pub fn values(&self) -> Vec<V::F> {
        Some(self.initial_value)
            .into_iter()
            .chain(self.records.iter().map(|r| r.value))
            .collect()
    }

    /// Lengths of the steps taken.
    pub fn step_norms(&self) -> Vec<V::F> {
        self.records.iter().map(|r| r.step.norm()).collect()
    }
}
