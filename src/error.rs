//! Error types returned by [`Graph`](crate::Graph) operations and the helper
//! containers.
//!
//! Every fallible public operation on a graph returns a [`DagError`], which
//! pairs the [`Operation`] that failed with the underlying [`ErrorKind`].  The
//! kind is preserved when one operation fails because another one it is built
//! on failed; only the operation is re-tagged to the outermost call.

use std::fmt;

/// Error returned when popping from an empty [`Stack`](crate::containers::Stack)
/// or [`Queue`](crate::containers::Queue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("could not pop item, {container} is empty")]
pub struct EmptyContainer {
    pub container: &'static str,
}

/// The reason a graph operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind<V> {
    /// A referenced vertex is not in the graph.
    #[error("vertex {0:?} is not found in graph")]
    VertexNotFound(V),
    /// The vertex is already in the graph.
    #[error("vertex {0:?} already added, vertices must be unique")]
    DuplicateVertex(V),
    /// A predecessor passed to `append` is not in the graph.
    #[error("prev vertex {0:?} is not found in graph")]
    PredecessorNotFound(V),
    #[error("edge {from:?} -> {to:?} already exists")]
    EdgeAlreadyExists { from: V, to: V },
    /// Adding the edge would make `from` reachable from itself.
    #[error("cyclic edges are not allowed from {from:?} to {to:?}")]
    CycleDetected { from: V, to: V },
    #[error("edge {from:?} -> {to:?} does not exist")]
    EdgeNotFound { from: V, to: V },
    #[error("no vertices given")]
    EmptyInput,
    /// A traversal container ran dry unexpectedly.  Seeing this means an
    /// internal invariant is broken.
    #[error(transparent)]
    EmptyContainer(#[from] EmptyContainer),
}

/// A public graph operation, used to say which call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Next,
    Prev,
    Add,
    Append,
    Connect,
    DisconnectEdge,
    Disconnect,
    Remove,
    Dfs,
    Bfs,
    Deps,
    ReverseDeps,
    TopSort,
    DeepCopy,
    SubGraph,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Operation::Next => "find next vertices",
            Operation::Prev => "find prev vertices",
            Operation::Add => "add vertices",
            Operation::Append => "append vertex",
            Operation::Connect => "connect vertices",
            Operation::DisconnectEdge => "disconnect edge",
            Operation::Disconnect => "disconnect vertex",
            Operation::Remove => "remove vertex",
            Operation::Dfs => "perform dfs",
            Operation::Bfs => "perform bfs",
            Operation::Deps => "calculate deps",
            Operation::ReverseDeps => "calculate reverse deps",
            Operation::TopSort => "sort vertices",
            Operation::DeepCopy => "create deep copy",
            Operation::SubGraph => "create sub graph",
        };
        f.write_str(description)
    }
}

/// An [`ErrorKind`] tagged with the [`Operation`] that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not {operation}: {kind}")]
pub struct DagError<V> {
    operation: Operation,
    #[source]
    kind: ErrorKind<V>,
}

impl<V> DagError<V> {
    pub fn new(operation: Operation, kind: ErrorKind<V>) -> Self {
        Self { operation, kind }
    }

    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn kind(&self) -> &ErrorKind<V> {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind<V> {
        self.kind
    }

    /// Re-tags the error with an enclosing operation, keeping the kind.
    pub(crate) fn within(self, operation: Operation) -> Self {
        Self { operation, ..self }
    }
}

pub type Result<T, V> = std::result::Result<T, DagError<V>>;
