//! Anchor-outward level labeling of the edges of one container.
//!
//! Levels are breadth-first distances from the nearest anchor (invalid node or
//! missing endpoint). Solvers visit the edges of an island level by level so
//! that corrections propagate away from fixed bodies.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::stable_graph::StableUnGraph;
use petgraph::visit::NodeIndexable;

use super::edge::ContainerId;
use super::island::{GraphIsland, IslandId};
use super::island_graph::IslandGraph;

pub(crate) fn is_awake(islands: &StableUnGraph<GraphIsland, ()>, id: Option<IslandId>) -> bool {
    id.and_then(|id| islands.node_weight(id.index()))
        .is_some_and(|island| !island.is_sleeping)
}

impl<N, E> IslandGraph<N, E>
where
    N: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    /// Label every edge of `container` in awake islands with its level.
    ///
    /// Invalid nodes seed level 0 and an edge with a missing endpoint is level
    /// 0 with its node at level 1. Each edge takes the level of the node it is
    /// reached from, the far node gets that level plus one. Edges of islands
    /// without any anchor end up at level 0. Edges of sleeping islands are left
    /// unlabeled.
    pub fn compute_levels(&mut self, container: ContainerId) {
        for edge in self.graph.edge_weights_mut() {
            if edge.container == container {
                edge.level = None;
            }
        }

        let mut node_levels: Vec<Option<u32>> = vec![None; self.graph.node_bound()];
        let mut queue = VecDeque::new();

        let edges: Vec<_> = self
            .graph
            .edge_indices()
            .filter(|&index| {
                let edge = &self.graph[index];
                edge.container == container && is_awake(&self.islands, edge.island)
            })
            .collect();

        for island in self.islands.node_weights_mut() {
            if !island.is_sleeping {
                island.max_levels = 0;
            }
        }

        // Fixed bodies first so the queue stays sorted by level.
        for &index in &edges {
            for node in self.graph[index].nodes().into_iter().flatten() {
                if !self.graph[node].is_valid() && node_levels[node.index()].is_none() {
                    node_levels[node.index()] = Some(0);
                    queue.push_back(node);
                }
            }
        }

        for &index in &edges {
            let edge = &mut self.graph[index];
            let [first, second] = edge.nodes();
            let node = match (first, second) {
                (None, Some(node)) | (Some(node), None) => node,
                _ => continue,
            };
            edge.level = Some(0);
            if node_levels[node.index()].is_none() {
                node_levels[node.index()] = Some(1);
                queue.push_back(node);
            }
        }

        while let Some(node) = queue.pop_front() {
            let Some(level) = node_levels[node.index()] else {
                continue;
            };

            for index in self.incident_edges(node) {
                let edge = &mut self.graph[index];
                if edge.container != container
                    || edge.level.is_some()
                    || !is_awake(&self.islands, edge.island)
                {
                    continue;
                }
                edge.level = Some(level);

                let Some(other) = edge.other_node(node) else {
                    continue;
                };
                if self.graph[other].is_valid() && node_levels[other.index()].is_none() {
                    node_levels[other.index()] = Some(level + 1);
                    queue.push_back(other);
                }
            }
        }

        for index in edges {
            let edge = &mut self.graph[index];
            let level = *edge.level.get_or_insert(0);
            if let Some(island) = edge
                .island
                .and_then(|id| self.islands.node_weight_mut(id.index()))
            {
                island.max_levels = island.max_levels.max(level);
            }
        }
    }

    /// Level of the edge of `item`, if labeled.
    pub fn edge_level(&self, item: &E) -> Option<u32> {
        self.edge_index(item)
            .and_then(|index| self.edge(index))
            .and_then(|edge| edge.level)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{ContainerId, IslandGraph, NodeIndex};

    const CONTACTS: ContainerId = ContainerId(0);
    const JOINTS: ContainerId = ContainerId(1);

    fn chain() -> (IslandGraph<u32, u32>, [NodeIndex; 4]) {
        let mut graph = IslandGraph::new();
        let s = graph.add_node(0, false, None, true);
        let a = graph.add_node(1, true, None, false);
        let b = graph.add_node(2, true, None, false);
        let c = graph.add_node(3, true, None, false);
        graph.add_edge(10, CONTACTS, Some(s), Some(a)).unwrap();
        graph.add_edge(11, CONTACTS, Some(a), Some(b)).unwrap();
        graph.add_edge(12, CONTACTS, Some(b), Some(c)).unwrap();
        graph.update_graph();
        (graph, [s, a, b, c])
    }

    #[test]
    fn test_levels_grow_from_anchor() {
        let (mut graph, [_, a, ..]) = chain();
        graph.compute_levels(CONTACTS);

        assert_eq!(graph.edge_level(&10), Some(0));
        assert_eq!(graph.edge_level(&11), Some(1));
        assert_eq!(graph.edge_level(&12), Some(2));

        let island = graph.node(a).unwrap().island.unwrap();
        assert_eq!(graph.island(island).unwrap().max_levels, 2);
    }

    #[test]
    fn test_levels_after_split() {
        let (mut graph, [_, a, b, c]) = chain();
        let island = graph.node(a).unwrap().island.unwrap();
        graph.mark_island_dirty(island).unwrap();
        graph.remove_edge_item(11).unwrap();
        graph.update_graph();
        graph.compute_levels(CONTACTS);

        assert_eq!(graph.island_count(), 2);
        assert_ne!(graph.node(a).unwrap().island, graph.node(b).unwrap().island);
        assert_eq!(graph.node(b).unwrap().island, graph.node(c).unwrap().island);
        assert_eq!(graph.edge_level(&10), Some(0));
        // No anchor left for the second island.
        assert_eq!(graph.edge_level(&12), Some(0));
    }

    #[test]
    fn test_missing_endpoint_is_an_anchor() {
        let mut graph: IslandGraph<u32, u32> = IslandGraph::new();
        let a = graph.add_node(1, true, None, false);
        let b = graph.add_node(2, true, None, false);
        graph.add_edge(10, JOINTS, None, Some(a)).unwrap();
        graph.add_edge(11, JOINTS, Some(a), Some(b)).unwrap();
        graph.update_graph();
        graph.compute_levels(JOINTS);

        assert_eq!(graph.edge_level(&10), Some(0));
        assert_eq!(graph.edge_level(&11), Some(1));
    }

    #[test]
    fn test_levels_are_scoped_to_container() {
        let (mut graph, [_, _, b, c]) = chain();
        graph.add_edge(20, JOINTS, Some(b), Some(c)).unwrap();
        graph.update_graph();
        graph.compute_levels(JOINTS);

        assert_eq!(graph.edge_level(&20), Some(0));
        assert_eq!(graph.edge_level(&10), None);
        assert_eq!(graph.edge_level(&12), None);
    }

    #[test]
    fn test_sleeping_island_is_not_labeled() {
        let (mut graph, [_, a, ..]) = chain();
        let island = graph.node(a).unwrap().island.unwrap();
        graph.set_island_sleeping(island, true).unwrap();
        graph.compute_levels(CONTACTS);

        assert_eq!(graph.edge_level(&10), None);
        assert_eq!(graph.edge_level(&12), None);
    }
}
