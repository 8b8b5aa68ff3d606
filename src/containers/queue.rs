use std::collections::VecDeque;
use std::fmt;

use derivative::Derivative;

use crate::error::EmptyContainer;

/// A first-in, first-out sequence.
#[derive(Derivative)]
#[derivative(
    Debug(bound = "T: fmt::Debug"),
    Clone(bound = "T: Clone"),
    Default(bound = "")
)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes and returns the earliest enqueued item.
    pub fn pop(&mut self) -> Result<T, EmptyContainer> {
        self.items
            .pop_front()
            .ok_or(EmptyContainer { container: "queue" })
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
