//! Small containers over vertex identifiers used by the graph traversals.
//!
//! - [`Set`]: membership tracking for visited vertices.
//! - [`Stack`]: LIFO ordering for depth-first search.
//! - [`Queue`]: FIFO ordering for breadth-first search and topological sort.

mod queue;
mod set;
mod stack;

pub use queue::Queue;
pub use set::Set;
pub use stack::Stack;
