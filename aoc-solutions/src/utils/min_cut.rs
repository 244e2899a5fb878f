//! Global minimum cut of an undirected weighted graph (Stoer–Wagner).
//!
//! Nodes carry a weight counting how many original nodes they stand for, so
//! after any number of merges the two sides of a cut can still be sized.
//! Merging never mutates a graph in place: [`WeightedGraph::merged`]
//! returns the next generation.
//!
//! ```
//! use aoc_solutions::utils::min_cut::WeightedGraph;
//!
//! // Two triangles joined by a single bridge.
//! let graph = WeightedGraph::from_unit_edges([
//!     ("a", "b"), ("b", "c"), ("c", "a"),
//!     ("x", "y"), ("y", "z"), ("z", "x"),
//!     ("c", "x"),
//! ]);
//! let cut = graph.minimum_cut(None).unwrap();
//! assert_eq!(cut.weight, 1);
//! assert_eq!(cut.partition.0 * cut.partition.1, 9);
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt::Debug;

use log::{debug, trace};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("a cut needs at least two nodes, graph has {0}")]
    TooFewNodes(usize),

    #[error("unknown node {0}")]
    UnknownNode(String),
}

/// Undirected edge with `a < b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<N> {
    pub a: N,
    pub b: N,
    pub weight: u64,
}

/// Result of [`WeightedGraph::minimum_cut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCut {
    /// Total weight of the edges crossing the cut.
    pub weight: u64,
    /// Summed node weights on either side.
    pub partition: (u64, u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedGraph<N: Ord + Clone> {
    nodes: BTreeMap<N, u64>,
    edges: Vec<Edge<N>>,
}

impl<N: Ord + Clone + Debug> WeightedGraph<N> {
    /// Validated construction. Parallel edges are summed, self-loops dropped.
    pub fn new(
        nodes: BTreeMap<N, u64>,
        edges: impl IntoIterator<Item = Edge<N>>,
    ) -> Result<Self, GraphError> {
        let edges: Vec<Edge<N>> = edges.into_iter().collect();
        if let Some(missing) = edges
            .iter()
            .flat_map(|e| [&e.a, &e.b])
            .find(|n| !nodes.contains_key(*n))
        {
            return Err(GraphError::UnknownNode(format!("{missing:?}")));
        }

        Ok(Self {
            edges: coalesce(edges),
            nodes,
        })
    }

    /// Every endpoint becomes a node of weight 1, every pair an edge of weight 1.
    pub fn from_unit_edges(pairs: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut nodes = BTreeMap::new();
        let mut edges = Vec::new();
        for (a, b) in pairs {
            nodes.insert(a.clone(), 1);
            nodes.insert(b.clone(), 1);
            edges.push(Edge { a, b, weight: 1 });
        }
        Self {
            edges: coalesce(edges),
            nodes,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    pub fn node_weight(&self, node: &N) -> Option<u64> {
        self.nodes.get(node).copied()
    }

    pub fn total_node_weight(&self) -> u64 {
        self.nodes.values().sum()
    }

    /// Next generation with `remove` folded into `keep`.
    pub fn merged(&self, keep: &N, remove: &N) -> Result<Self, GraphError> {
        let removed_weight = self
            .node_weight(remove)
            .ok_or_else(|| GraphError::UnknownNode(format!("{remove:?}")))?;
        if !self.nodes.contains_key(keep) {
            return Err(GraphError::UnknownNode(format!("{keep:?}")));
        }
        if keep == remove {
            return Ok(self.clone());
        }

        let mut nodes = self.nodes.clone();
        nodes.remove(remove);
        if let Some(weight) = nodes.get_mut(keep) {
            *weight += removed_weight;
        }

        let relabel = |n: &N| if n == remove { keep.clone() } else { n.clone() };
        let edges = self
            .edges
            .iter()
            .map(|e| Edge {
                a: relabel(&e.a),
                b: relabel(&e.b),
                weight: e.weight,
            })
            .collect();

        Ok(Self {
            nodes,
            edges: coalesce(edges),
        })
    }

    /// Stoer–Wagner. Returns as soon as a phase cut weighs exactly `target`.
    pub fn minimum_cut(&self, target: Option<u64>) -> Result<MinCut, GraphError> {
        if self.node_count() < 2 {
            return Err(GraphError::TooFewNodes(self.node_count()));
        }

        let total = self.total_node_weight();
        let mut graph = self.clone();
        let mut best: Option<MinCut> = None;
        let mut phases = 0usize;

        while graph.node_count() > 1 {
            let phase = graph.phase()?;
            phases += 1;

            let t_weight = graph
                .node_weight(&phase.t)
                .ok_or_else(|| GraphError::UnknownNode(format!("{:?}", phase.t)))?;
            let cut = MinCut {
                weight: phase.cut,
                partition: (t_weight, total - t_weight),
            };
            trace!("phase {phases}: cut {} around {:?}", cut.weight, phase.t);

            if target == Some(cut.weight) {
                debug!("target cut {} found after {phases} phases", cut.weight);
                return Ok(cut);
            }
            if best.is_none_or(|b| cut.weight < b.weight) {
                best = Some(cut);
            }

            graph = graph.merged(&phase.s, &phase.t)?;
        }

        debug!("minimum cut settled after {phases} phases");
        best.ok_or(GraphError::TooFewNodes(self.node_count()))
    }

    /// One maximum-adjacency ordering starting at the smallest node.
    /// Needs at least two nodes.
    fn phase(&self) -> Result<Phase<N>, GraphError> {
        let ids: Vec<&N> = self.nodes.keys().collect();
        let index = |n: &N| {
            ids.binary_search(&n)
                .map_err(|_| GraphError::UnknownNode(format!("{n:?}")))
        };

        let mut adjacency: Vec<Vec<(usize, u64)>> = vec![Vec::new(); ids.len()];
        for edge in &self.edges {
            let (a, b) = (index(&edge.a)?, index(&edge.b)?);
            adjacency[a].push((b, edge.weight));
            adjacency[b].push((a, edge.weight));
        }

        let mut added = vec![false; ids.len()];
        let mut connectivity = vec![0u64; ids.len()];
        // max connectivity first, then smallest index
        let mut heap: BinaryHeap<(u64, Reverse<usize>)> =
            (0..ids.len()).map(|i| (0, Reverse(i))).collect();

        let mut order = Vec::with_capacity(ids.len());
        while let Some((conn, Reverse(next))) = heap.pop() {
            if added[next] || conn != connectivity[next] {
                continue;
            }
            added[next] = true;
            order.push(next);
            for &(neighbour, weight) in &adjacency[next] {
                if !added[neighbour] {
                    connectivity[neighbour] += weight;
                    heap.push((connectivity[neighbour], Reverse(neighbour)));
                }
            }
        }

        let [.., s, t] = order[..] else {
            return Err(GraphError::TooFewNodes(order.len()));
        };
        Ok(Phase {
            s: ids[s].clone(),
            t: ids[t].clone(),
            cut: connectivity[t],
        })
    }
}

struct Phase<N> {
    s: N,
    t: N,
    cut: u64,
}

/// Orient every edge `a < b`, sum parallels, drop self-loops.
fn coalesce<N: Ord + Clone>(edges: Vec<Edge<N>>) -> Vec<Edge<N>> {
    let mut summed: BTreeMap<(N, N), u64> = BTreeMap::new();
    for Edge { a, b, weight } in edges {
        if a == b {
            continue;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        *summed.entry(key).or_default() += weight;
    }
    summed
        .into_iter()
        .map(|((a, b), weight)| Edge { a, b, weight })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WIRING: &str = "\
jqt: rhn xhk nvd
rsh: frs pzl lsr
xhk: hfx
cmg: qnr nvd lhk bvb
rhn: xhk bvb hfx
bvb: xhk hfx
pzl: lsr hfx nvd
qnr: nvd
ntq: jqt hfx bvb xhk
nvd: lhk
lsr: lhk
rzs: qnr cmg lsr rsh
frs: qnr lhk lsr";

    fn wiring() -> WeightedGraph<&'static str> {
        WeightedGraph::from_unit_edges(WIRING.lines().flat_map(|line| {
            let (from, rest) = line.split_once(": ").unwrap();
            rest.split(' ').map(move |to| (from, to))
        }))
    }

    #[test]
    fn test_three_wire_cut() {
        let graph = wiring();
        assert_eq!(graph.node_count(), 15);

        let cut = graph.minimum_cut(None).unwrap();
        assert_eq!(cut.weight, 3);
        assert_eq!(cut.partition.0 * cut.partition.1, 54);

        let early = graph.minimum_cut(Some(3)).unwrap();
        assert_eq!(early.weight, 3);
        assert_eq!(early.partition.0 * early.partition.1, 54);
    }

    #[test]
    fn test_contract_to_single_node() {
        let graph = wiring();
        let total = graph.total_node_weight();
        let first = graph.nodes.keys().next().cloned().unwrap();

        let mut contracted = graph.clone();
        for node in graph.nodes.keys().skip(1) {
            contracted = contracted.merged(&first, node).unwrap();
        }

        assert_eq!(contracted.node_count(), 1);
        assert_eq!(contracted.node_weight(&first), Some(total));
        assert!(contracted.edges().is_empty());
        assert_eq!(
            contracted.minimum_cut(None),
            Err(GraphError::TooFewNodes(1))
        );
    }

    #[test]
    fn test_parallel_edges_summed() {
        let graph = WeightedGraph::from_unit_edges([(1, 2), (2, 1), (2, 2), (2, 3)]);
        assert_eq!(
            graph.edges(),
            &[
                Edge { a: 1, b: 2, weight: 2 },
                Edge { a: 2, b: 3, weight: 1 }
            ]
        );

        let merged = graph.merged(&1, &3).unwrap();
        assert_eq!(merged.edges(), &[Edge { a: 1, b: 2, weight: 3 }]);
        assert_eq!(merged.node_weight(&1), Some(2));
        // the previous generation is untouched
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_unknown_nodes_rejected() {
        let nodes = BTreeMap::from([(1, 1), (2, 1)]);
        let err = WeightedGraph::new(nodes, [Edge { a: 1, b: 7, weight: 1 }]).unwrap_err();
        assert_eq!(err, GraphError::UnknownNode("7".into()));

        let graph = WeightedGraph::from_unit_edges([(1, 2)]);
        assert!(matches!(graph.merged(&1, &9), Err(GraphError::UnknownNode(_))));
    }

    #[test]
    fn test_dangling_edge_surfaces_as_error() {
        // bypasses `new`, which would reject the edge up front
        let graph = WeightedGraph {
            nodes: BTreeMap::from([(1, 1), (2, 1)]),
            edges: vec![Edge { a: 1, b: 9, weight: 1 }],
        };
        assert_eq!(
            graph.minimum_cut(None),
            Err(GraphError::UnknownNode("9".into()))
        );
    }

    #[test]
    fn test_disconnected_graph_has_zero_cut() {
        let graph = WeightedGraph::from_unit_edges([(1, 2), (3, 4)]);
        let cut = graph.minimum_cut(None).unwrap();
        assert_eq!(cut.weight, 0);
        assert_eq!(cut.partition.0 + cut.partition.1, 4);
    }

    fn brute_force_cut(n: u8, edges: &[(u8, u8)]) -> u64 {
        (1u32..(1 << n) - 1)
            .map(|mask| {
                edges
                    .iter()
                    .filter(|(a, b)| ((mask >> a) & 1) != ((mask >> b) & 1))
                    .count() as u64
            })
            .min()
            .unwrap_or(0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_matches_brute_force(
            edges in prop::collection::vec((0u8..6, 0u8..6), 1..15)
        ) {
            let edges: Vec<(u8, u8)> = edges.into_iter().filter(|(a, b)| a != b).collect();
            let nodes: BTreeMap<u8, u64> = (0..6).map(|n| (n, 1)).collect();
            let graph = WeightedGraph::new(
                nodes,
                edges.iter().map(|&(a, b)| Edge { a, b, weight: 1 }),
            )
            .unwrap();

            let cut = graph.minimum_cut(None).unwrap();
            prop_assert_eq!(cut.weight, brute_force_cut(6, &edges));
            prop_assert_eq!(cut.partition.0 + cut.partition.1, 6);
        }
    }
}
