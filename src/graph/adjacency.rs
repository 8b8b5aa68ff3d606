use std::collections::HashMap;
use std::fmt::Debug;

use derivative::Derivative;

use crate::containers::{Queue, Set, Stack};
use crate::error::ErrorKind;
use crate::graph::{Edges, VertexId};

type KindResult<T, V> = Result<T, ErrorKind<V>>;

/// The unlocked state of a [`Graph`](super::Graph): the vertex list and the
/// successor lists, kept in lockstep.
///
/// Every vertex in `vertices` has exactly one entry in `edges` and vice versa.
/// Methods that fail leave the state unchanged.
#[derive(Derivative)]
#[derivative(
    Debug(bound = "V: Debug"),
    Clone(bound = "V: Clone"),
    Default(bound = "")
)]
pub(crate) struct Adjacency<V> {
    vertices: Vec<V>,
    edges: Edges<V>,
}

impl<V: VertexId> Adjacency<V> {
    pub fn from_parts(vertices: Vec<V>, edges: Edges<V>) -> Self {
        debug_assert_eq!(vertices.len(), edges.len());
        Self { vertices, edges }
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.edges.contains_key(vertex)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn edges(&self) -> &Edges<V> {
        &self.edges
    }

    fn check_vertex(&self, vertex: &V) -> KindResult<(), V> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(ErrorKind::VertexNotFound(vertex.clone()))
        }
    }

    // Successors of a vertex known to exist.
    fn successors(&self, vertex: &V) -> &[V] {
        self.edges.get(vertex).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn next(&self, vertex: &V) -> KindResult<&[V], V> {
        self.edges
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or_else(|| ErrorKind::VertexNotFound(vertex.clone()))
    }

    pub fn prev(&self, vertex: &V) -> KindResult<Vec<V>, V> {
        self.check_vertex(vertex)?;
        Ok(self
            .vertices
            .iter()
            .filter(|candidate| self.successors(candidate).contains(vertex))
            .cloned()
            .collect())
    }

    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.successors(from).contains(to)
    }

    /// Adds all of `vertices`, or none of them.
    pub fn add(&mut self, vertices: Vec<V>) -> KindResult<(), V> {
        if vertices.is_empty() {
            return Err(ErrorKind::EmptyInput);
        }
        let mut seen = Set::new();
        for vertex in &vertices {
            if self.contains(vertex) || !seen.add(vertex) {
                return Err(ErrorKind::DuplicateVertex(vertex.clone()));
            }
        }
        for vertex in vertices {
            self.insert_vertex(vertex);
        }
        Ok(())
    }

    fn insert_vertex(&mut self, vertex: V) {
        self.edges.insert(vertex.clone(), Vec::new());
        self.vertices.push(vertex);
    }

    pub fn append(&mut self, vertex: V, prev_vertices: Vec<V>) -> KindResult<(), V> {
        if self.contains(&vertex) {
            return Err(ErrorKind::DuplicateVertex(vertex));
        }
        if let Some(missing) = prev_vertices.iter().find(|prev| !self.contains(prev)) {
            return Err(ErrorKind::PredecessorNotFound(missing.clone()));
        }

        self.insert_vertex(vertex.clone());
        let mut wired = Set::new();
        for prev in prev_vertices {
            if !wired.add(prev.clone()) {
                continue;
            }
            if let Some(successors) = self.edges.get_mut(&prev) {
                successors.push(vertex.clone());
            }
        }
        Ok(())
    }

    pub fn connect(&mut self, from: &V, to: &V) -> KindResult<(), V> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if self.has_edge(from, to) {
            return Err(ErrorKind::EdgeAlreadyExists {
                from: from.clone(),
                to: to.clone(),
            });
        }
        // `from` reachable from `to` means the new edge would close a cycle.
        // A self-loop is the case `from == to`.
        if self.dfs(to)?.contains(from) {
            return Err(ErrorKind::CycleDetected {
                from: from.clone(),
                to: to.clone(),
            });
        }
        if let Some(successors) = self.edges.get_mut(from) {
            successors.push(to.clone());
        }
        Ok(())
    }

    pub fn disconnect_edge(&mut self, from: &V, to: &V) -> KindResult<(), V> {
        let position = self
            .edges
            .get_mut(from)
            .and_then(|successors| Some((successors.iter().position(|v| v == to)?, successors)));
        let Some((index, successors)) = position else {
            return Err(ErrorKind::EdgeNotFound {
                from: from.clone(),
                to: to.clone(),
            });
        };
        successors.remove(index);
        Ok(())
    }

    pub fn disconnect(&mut self, vertex: &V) -> KindResult<(), V> {
        for prev in self.prev(vertex)? {
            self.disconnect_edge(&prev, vertex)?;
        }
        if let Some(successors) = self.edges.get_mut(vertex) {
            successors.clear();
        }
        Ok(())
    }

    /// Removes `vertex` and everything reachable from it.  Returns the removed
    /// vertices in depth-first order.
    pub fn remove(&mut self, vertex: &V) -> KindResult<Vec<V>, V> {
        let removed = self.dfs(vertex)?;
        for target in &removed {
            self.disconnect(target)?;
        }

        let removed_set: Set<&V> = removed.iter().collect();
        self.vertices.retain(|v| !removed_set.has(&v));
        for target in &removed {
            self.edges.remove(target);
        }
        Ok(removed)
    }

    /// Iterative depth-first search.  Successors are pushed in order, so the
    /// last successor of a vertex is visited first.
    pub fn dfs(&self, start: &V) -> KindResult<Vec<V>, V> {
        self.check_vertex(start)?;

        let mut result = Vec::new();
        let mut visited = Set::new();
        let mut stack = Stack::new();
        stack.push(start.clone());

        while !stack.is_empty() {
            let current = stack.pop()?;
            if visited.add(current.clone()) {
                stack.extend(self.next(&current)?.iter().cloned());
                result.push(current);
            }
        }
        Ok(result)
    }

    pub fn bfs(&self, start: &V) -> KindResult<Vec<V>, V> {
        self.check_vertex(start)?;

        let mut result = Vec::new();
        let mut visited = Set::new();
        let mut queue = Queue::new();
        queue.enqueue(start.clone());

        while queue.size() > 0 {
            let current = queue.pop()?;
            if visited.add(current.clone()) {
                queue.extend(self.next(&current)?.iter().cloned());
                result.push(current);
            }
        }
        Ok(result)
    }

    /// Transposed successor lists.  Each list is ordered by the position of
    /// its source in the vertex list.
    pub fn reverse_edges(&self) -> Edges<V> {
        let mut reversed: Edges<V> = self
            .vertices
            .iter()
            .map(|v| (v.clone(), Vec::new()))
            .collect();
        for source in &self.vertices {
            for target in self.successors(source) {
                if let Some(sources) = reversed.get_mut(target) {
                    sources.push(source.clone());
                }
            }
        }
        reversed
    }

    pub fn reverse(&self) -> Self {
        Self::from_parts(self.vertices.clone(), self.reverse_edges())
    }

    pub fn leaves(&self) -> Vec<V> {
        self.vertices
            .iter()
            .filter(|v| self.successors(v).is_empty())
            .cloned()
            .collect()
    }

    /// Kahn's algorithm.  Ties are broken by vertex-list order for the initial
    /// roots and by successor order afterwards.
    pub fn top_sort(&self) -> KindResult<Vec<V>, V> {
        let mut in_degree: HashMap<&V, usize> = self.vertices.iter().map(|v| (v, 0)).collect();
        for source in &self.vertices {
            for target in self.successors(source) {
                *in_degree.entry(target).or_default() += 1;
            }
        }

        let mut queue = Queue::new();
        queue.extend(self.vertices.iter().filter(|v| in_degree.get(v) == Some(&0)));

        let mut result = Vec::with_capacity(self.vertices.len());
        while queue.size() > 0 {
            let vertex = queue.pop()?;
            for target in self.successors(vertex) {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.enqueue(target);
                    }
                }
            }
            result.push(vertex.clone());
        }
        Ok(result)
    }
}
