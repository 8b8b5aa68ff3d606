use std::collections::{HashMap, HashSet};

use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

use crate::error::ErrorKind;
use crate::graph::Graph;

/// A random DAG built only through the public API: a handful of vertices and
/// a batch of `connect` attempts, of which the ones closing a cycle or
/// repeating an edge are rejected by the graph.
#[derive(Debug)]
pub struct ArbDag {
    pub graph: Graph<usize>,
}

impl Clone for ArbDag {
    fn clone(&self) -> Self {
        ArbDag {
            graph: self.graph.deep_copy().expect("copying a valid graph"),
        }
    }
}

impl Arbitrary for ArbDag {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_vertices = usize::arbitrary(g) % 16; // Limit size for testing
        let num_edges = usize::arbitrary(g) % 48;

        let graph = Graph::new();
        if num_vertices == 0 {
            return ArbDag { graph };
        }
        graph.add(0..num_vertices).expect("fresh vertices");
        for _ in 0..num_edges {
            let from = usize::arbitrary(g) % num_vertices;
            let to = usize::arbitrary(g) % num_vertices;
            let _ = graph.connect(&from, &to);
        }
        ArbDag { graph }
    }
}

/// Chooses a vertex by index, wrapping around; `None` for an empty graph.
fn pick(graph: &Graph<usize>, index: usize) -> Option<usize> {
    let vertices = graph.vertices();
    (!vertices.is_empty()).then(|| vertices[index % vertices.len()])
}

fn edge_list(graph: &Graph<usize>) -> Vec<(usize, usize)> {
    let edges = graph.edges();
    graph
        .vertices()
        .into_iter()
        .flat_map(|from| {
            edges[&from]
                .iter()
                .map(move |&to| (from, to))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn check_lockstep(graph: &Graph<usize>) -> bool {
    let vertices = graph.vertices();
    let edges = graph.edges();
    let vertex_set: HashSet<_> = vertices.iter().copied().collect();
    let key_set: HashSet<_> = edges.keys().copied().collect();
    vertex_set.len() == vertices.len()
        && vertex_set == key_set
        && edges.values().flatten().all(|to| vertex_set.contains(to))
        && edges
            .values()
            .all(|next| next.iter().collect::<HashSet<_>>().len() == next.len())
}

#[quickcheck]
fn prop_arbitrary_graph_is_consistent(ArbDag { graph }: ArbDag) -> bool {
    check_lockstep(&graph)
}

#[quickcheck]
fn prop_no_vertex_reaches_itself(ArbDag { graph }: ArbDag) -> bool {
    edge_list(&graph)
        .into_iter()
        .all(|(from, to)| !graph.dfs(&to).unwrap().contains(&from))
}

#[quickcheck]
fn prop_top_sort_orders_every_edge(ArbDag { graph }: ArbDag) -> bool {
    let sorted = graph.top_sort().unwrap();
    if sorted.len() != graph.len() {
        return false;
    }
    let position: HashMap<_, _> = sorted.iter().enumerate().map(|(i, v)| (*v, i)).collect();
    edge_list(&graph)
        .into_iter()
        .all(|(from, to)| position[&from] < position[&to])
}

#[quickcheck]
fn prop_connect_rejects_exactly_cycles(ArbDag { graph }: ArbDag, a: usize, b: usize) -> TestResult {
    let (Some(from), Some(to)) = (pick(&graph, a), pick(&graph, b)) else {
        return TestResult::discard();
    };
    let existed = graph.next(&from).unwrap().contains(&to);
    let closes_cycle = graph.dfs(&to).unwrap().contains(&from);
    let result = graph.connect(&from, &to).map_err(|err| err.into_kind());
    let expected = if existed {
        Err(ErrorKind::EdgeAlreadyExists { from, to })
    } else if closes_cycle {
        Err(ErrorKind::CycleDetected { from, to })
    } else {
        Ok(())
    };
    TestResult::from_bool(result == expected && graph.top_sort().unwrap().len() == graph.len())
}

#[quickcheck]
fn prop_disconnect_is_idempotent(dag: ArbDag, index: usize) -> TestResult {
    let Some(vertex) = pick(&dag.graph, index) else {
        return TestResult::discard();
    };
    let graph = dag.graph;
    let others: Vec<_> = edge_list(&graph)
        .into_iter()
        .filter(|&(from, to)| from != vertex && to != vertex)
        .collect();

    graph.disconnect(&vertex).unwrap();
    graph.disconnect(&vertex).unwrap();

    TestResult::from_bool(
        graph.next(&vertex).unwrap().is_empty()
            && graph.prev(&vertex).unwrap().is_empty()
            && edge_list(&graph) == others,
    )
}

#[quickcheck]
fn prop_deps_and_reverse_deps_agree(ArbDag { graph }: ArbDag) -> bool {
    let vertices = graph.vertices();
    let deps: HashMap<_, _> = vertices
        .iter()
        .map(|&v| (v, graph.deps(&v).unwrap()))
        .collect();
    let reverse_deps: HashMap<_, _> = vertices
        .iter()
        .map(|&v| (v, graph.reverse_deps(&v).unwrap()))
        .collect();
    vertices.iter().all(|u| {
        vertices
            .iter()
            .all(|v| deps[u].contains(v) == reverse_deps[v].contains(u))
    })
}

#[quickcheck]
fn prop_deps_are_sorted_ancestors(ArbDag { graph }: ArbDag, index: usize) -> TestResult {
    let Some(vertex) = pick(&graph, index) else {
        return TestResult::discard();
    };
    let deps = graph.deps(&vertex).unwrap();
    let position: HashMap<_, _> = deps.iter().enumerate().map(|(i, v)| (*v, i)).collect();
    let ordered = edge_list(&graph)
        .into_iter()
        .filter(|(from, to)| position.contains_key(from) && position.contains_key(to))
        .all(|(from, to)| position[&from] < position[&to]);
    let ancestors = deps
        .iter()
        .all(|dep| graph.dfs(dep).unwrap().contains(&vertex));
    TestResult::from_bool(ordered && ancestors && !deps.contains(&vertex))
}

#[quickcheck]
fn prop_deep_copy_is_isolated(ArbDag { graph }: ArbDag, index: usize) -> TestResult {
    let Some(vertex) = pick(&graph, index) else {
        return TestResult::discard();
    };
    let copy = graph.deep_copy().unwrap();
    let (vertices, edges) = (copy.vertices(), copy.edges());
    if vertices != graph.vertices() || edges != graph.edges() {
        return TestResult::failed();
    }

    graph.remove(&vertex).unwrap();
    graph.append(usize::MAX, graph.vertices()).unwrap();

    TestResult::from_bool(copy.vertices() == vertices && copy.edges() == edges)
}

#[quickcheck]
fn prop_remove_drops_reachable_vertices(ArbDag { graph }: ArbDag, index: usize) -> TestResult {
    let Some(vertex) = pick(&graph, index) else {
        return TestResult::discard();
    };
    let reachable = graph.dfs(&vertex).unwrap();
    let before = graph.len();
    let removed = graph.remove(&vertex).unwrap();

    TestResult::from_bool(
        removed == reachable
            && graph.len() + removed.len() == before
            && removed.iter().all(|v| !graph.exists(v))
            && check_lockstep(&graph),
    )
}

#[quickcheck]
fn prop_traversals_visit_same_vertices(ArbDag { graph }: ArbDag, index: usize) -> TestResult {
    let Some(vertex) = pick(&graph, index) else {
        return TestResult::discard();
    };
    let dfs: HashSet<_> = graph.dfs(&vertex).unwrap().into_iter().collect();
    let bfs = graph.bfs(&vertex).unwrap();
    TestResult::from_bool(bfs.len() == dfs.len() && bfs.iter().all(|v| dfs.contains(v)))
}

#[quickcheck]
fn prop_roots_and_leaves(ArbDag { graph }: ArbDag) -> bool {
    let roots = graph.roots();
    let leaves = graph.leaves();
    graph.vertices().iter().all(|v| {
        roots.contains(v) == graph.prev(v).unwrap().is_empty()
            && leaves.contains(v) == graph.next(v).unwrap().is_empty()
    })
}
