use std::fmt;

use derivative::Derivative;

use crate::error::EmptyContainer;

/// A last-in, first-out sequence.
#[derive(Derivative)]
#[derivative(
    Debug(bound = "T: fmt::Debug"),
    Clone(bound = "T: Clone"),
    Default(bound = "")
)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the most recently pushed item.
    pub fn pop(&mut self) -> Result<T, EmptyContainer> {
        self.items.pop().ok_or(EmptyContainer { container: "stack" })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

// Bottom of the stack first.
impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Stack size={} data=", self.items.len())?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str(" />")
    }
}
