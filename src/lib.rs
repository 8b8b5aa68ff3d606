//! A directed acyclic graph over opaque vertex identifiers.
//!
//! [`Graph`] keeps its vertices in insertion order and rejects every edge
//! that would close a cycle, so traversals, dependency queries and
//! topological sorts always see an acyclic graph.  A graph can be shared
//! between threads behind an `Arc`; see the [`graph`] module for the locking
//! rules.

pub mod containers;
pub mod error;
pub mod graph;
pub mod tracing_support;

#[cfg(test)]
mod graph_test_support;

pub use error::{DagError, EmptyContainer, ErrorKind, Operation};
pub use graph::{Edges, Graph, VertexId};
