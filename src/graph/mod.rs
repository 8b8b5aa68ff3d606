//! The [`Graph`] type: a directed acyclic graph over opaque vertex
//! identifiers, safe to share between threads.
//!
//! The vertex list and the successor lists live behind a single
//! reader/writer lock.  Every mutating operation (`add`, `append`, `connect`,
//! `disconnect_edge`, `disconnect`, `remove`) validates and applies its change
//! while holding the write lock, so a failed mutation leaves the graph as it
//! was, and racing `connect` calls can never jointly introduce a cycle.
//! Plain reads and single traversals (`dfs`, `bfs`, `top_sort`, ...) hold the
//! read lock for their duration.
//!
//! # Consistency of compound operations
//!
//! `deps`, `reverse_deps`, `roots`, `deep_copy` and `sub_graph` are built from
//! several individually locked steps.  They are not atomic with respect to
//! concurrent mutation: a vertex removed by another thread between two steps
//! can make them fail with [`ErrorKind::VertexNotFound`] or return a result
//! that mixes two states of the graph.  Callers that need a consistent view
//! must serialize those calls against writers themselves.

mod adjacency;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use derivative::Derivative;
use parking_lot::RwLock;

use crate::containers::Set;
use crate::error::{DagError, ErrorKind, Operation, Result};
use crate::tracing_support::{debug, info_span, trace};

use adjacency::Adjacency;

/// A trait for types that can identify a vertex.  It is implemented for every
/// type with the required bounds, so `&str`, `String`, integers and the like
/// can be used directly.
pub trait VertexId: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> VertexId for T {}

/// Successor lists keyed by vertex.
pub type Edges<V> = HashMap<V, Vec<V>>;

/// A directed acyclic graph.
///
/// ```
/// use dagraph::Graph;
///
/// let graph = Graph::new();
/// graph.add(["A", "B", "C", "D", "E", "F"]).unwrap();
/// for (from, to) in [("A", "B"), ("B", "C"), ("A", "D"), ("D", "E"), ("B", "E"), ("E", "F")] {
///     graph.connect(&from, &to).unwrap();
/// }
///
/// assert_eq!(graph.top_sort().unwrap(), ["A", "B", "D", "C", "E", "F"]);
/// assert_eq!(graph.deps(&"E").unwrap(), ["A", "B", "D"]);
/// assert!(graph.connect(&"F", &"A").is_err());
/// ```
#[derive(Derivative)]
#[derivative(Debug(bound = "V: Debug"), Default(bound = ""))]
pub struct Graph<V> {
    inner: RwLock<Adjacency<V>>,
}

fn fail<V>(operation: Operation) -> impl FnOnce(ErrorKind<V>) -> DagError<V> {
    move |kind| DagError::new(operation, kind)
}

impl<V: VertexId> Graph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_adjacency(adjacency: Adjacency<V>) -> Self {
        Self {
            inner: RwLock::new(adjacency),
        }
    }

    /// Returns true if `vertex` is in the graph.
    pub fn exists(&self, vertex: &V) -> bool {
        self.inner.read().contains(vertex)
    }

    /// Gets the number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets a copy of the vertex list, in insertion order.
    pub fn vertices(&self) -> Vec<V> {
        self.inner.read().vertices().to_vec()
    }

    /// Gets a copy of the successor lists of every vertex.
    pub fn edges(&self) -> Edges<V> {
        self.inner.read().edges().clone()
    }

    /// Gets the direct successors of `vertex`, in the order they were
    /// connected.
    pub fn next(&self, vertex: &V) -> Result<Vec<V>, V> {
        self.inner
            .read()
            .next(vertex)
            .map(<[V]>::to_vec)
            .map_err(fail(Operation::Next))
    }

    /// Gets the direct predecessors of `vertex`, in vertex-list order.
    pub fn prev(&self, vertex: &V) -> Result<Vec<V>, V> {
        self.inner
            .read()
            .prev(vertex)
            .map_err(fail(Operation::Prev))
    }

    /// Adds unconnected vertices to the graph.
    ///
    /// Either every vertex is added or, on error, none is.  Fails with
    /// [`ErrorKind::EmptyInput`] when no vertices are given and with
    /// [`ErrorKind::DuplicateVertex`] when a vertex is already present or
    /// repeated in `vertices`.
    pub fn add(&self, vertices: impl IntoIterator<Item = V>) -> Result<(), V> {
        let vertices: Vec<V> = vertices.into_iter().collect();
        let _span = info_span!("add", count = vertices.len()).entered();
        self.inner.write().add(vertices).map_err(|kind| {
            debug!(%kind, "rejected vertices");
            DagError::new(Operation::Add, kind)
        })
    }

    /// Adds `vertex` with an edge from each of `prev_vertices`, in the given
    /// order.  Nothing is changed unless `vertex` is new and every predecessor
    /// exists.
    pub fn append(&self, vertex: V, prev_vertices: impl IntoIterator<Item = V>) -> Result<(), V> {
        let _span = info_span!("append", vertex = ?vertex).entered();
        let prev_vertices: Vec<V> = prev_vertices.into_iter().collect();
        self.inner
            .write()
            .append(vertex, prev_vertices)
            .map_err(fail(Operation::Append))
    }

    /// Adds the edge `from -> to`.
    ///
    /// Fails with [`ErrorKind::VertexNotFound`] if either end is missing,
    /// [`ErrorKind::EdgeAlreadyExists`] if the edge is present, and
    /// [`ErrorKind::CycleDetected`] if `from` is reachable from `to`
    /// (including `from == to`).
    pub fn connect(&self, from: &V, to: &V) -> Result<(), V> {
        let _span = info_span!("connect", ?from, ?to).entered();
        self.inner.write().connect(from, to).map_err(|kind| {
            debug!(%kind, "rejected edge");
            DagError::new(Operation::Connect, kind)
        })
    }

    /// Removes the edge `from -> to`.
    pub fn disconnect_edge(&self, from: &V, to: &V) -> Result<(), V> {
        let _span = info_span!("disconnect_edge", ?from, ?to).entered();
        self.inner
            .write()
            .disconnect_edge(from, to)
            .map_err(fail(Operation::DisconnectEdge))
    }

    /// Removes every edge into and out of `vertex`, keeping the vertex.
    pub fn disconnect(&self, vertex: &V) -> Result<(), V> {
        let _span = info_span!("disconnect", ?vertex).entered();
        self.inner
            .write()
            .disconnect(vertex)
            .map_err(fail(Operation::Disconnect))
    }

    /// Removes `vertex` and every vertex reachable from it, with all of their
    /// edges.  Returns the removed vertices in [`Self::dfs`] order, starting
    /// with `vertex`.
    pub fn remove(&self, vertex: &V) -> Result<Vec<V>, V> {
        let _span = info_span!("remove", ?vertex).entered();
        let removed = self
            .inner
            .write()
            .remove(vertex)
            .map_err(fail(Operation::Remove))?;
        debug!(count = removed.len(), "removed vertices");
        Ok(removed)
    }

    /// Depth-first traversal from `start`.
    ///
    /// The traversal uses an explicit stack onto which the successors of each
    /// visited vertex are pushed in order, so the most recently connected
    /// successor is explored first.
    pub fn dfs(&self, start: &V) -> Result<Vec<V>, V> {
        let _span = info_span!("dfs", ?start).entered();
        self.inner.read().dfs(start).map_err(fail(Operation::Dfs))
    }

    /// Breadth-first traversal from `start`.
    pub fn bfs(&self, start: &V) -> Result<Vec<V>, V> {
        let _span = info_span!("bfs", ?start).entered();
        self.inner.read().bfs(start).map_err(fail(Operation::Bfs))
    }

    /// Gets the transposed successor lists: each vertex maps to its direct
    /// predecessors, ordered by their position in the vertex list.
    pub fn reverse_edges(&self) -> Edges<V> {
        self.inner.read().reverse_edges()
    }

    /// Returns a new graph with the same vertices and every edge reversed.
    pub fn reverse(&self) -> Graph<V> {
        Self::from_adjacency(self.inner.read().reverse())
    }

    /// Gets the vertices without successors, in vertex-list order.
    pub fn leaves(&self) -> Vec<V> {
        self.inner.read().leaves()
    }

    /// Gets the vertices without predecessors, in vertex-list order.
    pub fn roots(&self) -> Vec<V> {
        self.reverse().leaves()
    }

    /// Gets every vertex from which `vertex` is reachable, in topological
    /// order.
    pub fn deps(&self, vertex: &V) -> Result<Vec<V>, V> {
        let _span = info_span!("deps", ?vertex).entered();
        let within = |err: DagError<V>| err.within(Operation::Deps);
        let ancestors = self.reverse().dfs(vertex).map_err(within)?;
        self.sorted_without(ancestors, vertex).map_err(within)
    }

    /// Gets every vertex reachable from `vertex`, in topological order.
    pub fn reverse_deps(&self, vertex: &V) -> Result<Vec<V>, V> {
        let _span = info_span!("reverse_deps", ?vertex).entered();
        let within = |err: DagError<V>| err.within(Operation::ReverseDeps);
        let descendants = self.dfs(vertex).map_err(within)?;
        self.sorted_without(descendants, vertex).map_err(within)
    }

    fn sorted_without(&self, mut vertices: Vec<V>, vertex: &V) -> Result<Vec<V>, V> {
        vertices.retain(|v| v != vertex);
        self.sub_graph(&vertices)?.top_sort()
    }

    /// Sorts all vertices so that every edge points forward, using Kahn's
    /// algorithm.  Vertices that become ready at the same time keep
    /// vertex-list order for the initial roots and successor order afterwards.
    pub fn top_sort(&self) -> Result<Vec<V>, V> {
        let _span = info_span!("top_sort").entered();
        self.inner
            .read()
            .top_sort()
            .map_err(fail(Operation::TopSort))
    }

    /// Builds an independent graph with the same vertices and edges by
    /// replaying `add` and `connect` calls against a new graph.
    pub fn deep_copy(&self) -> Result<Graph<V>, V> {
        let _span = info_span!("deep_copy").entered();
        let (vertices, edges) = {
            let inner = self.inner.read();
            (inner.vertices().to_vec(), inner.edges().clone())
        };

        let within = |err: DagError<V>| err.within(Operation::DeepCopy);
        let copy = Graph::new();
        for vertex in &vertices {
            copy.add([vertex.clone()]).map_err(within)?;
        }
        for from in &vertices {
            for to in edges.get(from).into_iter().flatten() {
                copy.connect(from, to).map_err(within)?;
            }
        }
        trace!(vertices = vertices.len(), "copied graph");
        Ok(copy)
    }

    /// Builds a deep copy that keeps only `vertices`.  Every other vertex is
    /// disconnected and then removed from the copy.
    pub fn sub_graph(&self, vertices: &[V]) -> Result<Graph<V>, V> {
        let _span = info_span!("sub_graph", count = vertices.len()).entered();
        let within = |err: DagError<V>| err.within(Operation::SubGraph);
        let keep: Set<&V> = vertices.iter().collect();
        let copy = self.deep_copy().map_err(within)?;
        for excluded in copy.vertices().iter().filter(|v| !keep.has(v)) {
            copy.disconnect(excluded).map_err(within)?;
            copy.remove(excluded).map_err(within)?;
        }
        Ok(copy)
    }
}
