use super::{vals, Value};
use crate::Gen;
use std::collections::VecDeque;

/// Drawn elements and the FIFO built by enqueueing them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSample<T> {
    pub source: Vec<T>,
    pub fifo: VecDeque<T>,
}

impl<T: Clone> QueueSample<T> {
    pub fn from_source(source: Vec<T>) -> Self {
        let mut fifo = VecDeque::with_capacity(source.len());
        for item in &source {
            fifo.push_back(item.clone());
        }
        QueueSample { source, fifo }
    }

    /// Dequeue everything, front first.
    pub fn drain(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.fifo.len());
        while let Some(item) = self.fifo.pop_front() {
            out.push(item);
        }
        out
    }
}

pub fn queue_of<T: Clone + 'static>(element: Gen<T>) -> Gen<QueueSample<T>> {
    Gen::vec_of(element).map(QueueSample::from_source)
}

pub fn queue() -> Gen<QueueSample<(Value, Value)>> {
    queue_of(vals().zip(vals()))
}
