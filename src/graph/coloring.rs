//! Greedy edge coloring for parallel constraint batches.
//!
//! Two edges of the same color in one container never share a node, so all
//! edges of one color can be solved concurrently.

use std::fmt::Debug;
use std::hash::Hash;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::NodeIndexable;

use super::edge::ContainerId;
use super::island_graph::IslandGraph;

/// Growable bit set of colors used by one node.
#[derive(Debug, Clone, Default)]
pub(crate) struct ColorSet {
    blocks: Vec<u64>,
}

impl ColorSet {
    #[inline]
    pub fn contains(&self, color: u32) -> bool {
        let block = (color / 64) as usize;
        self.blocks
            .get(block)
            .is_some_and(|bits| bits & (1u64 << (color % 64)) != 0)
    }

    #[inline]
    pub fn insert(&mut self, color: u32) {
        let block = (color / 64) as usize;
        if block >= self.blocks.len() {
            self.blocks.resize(block + 1, 0);
        }
        self.blocks[block] |= 1u64 << (color % 64);
    }
}

/// Smallest color not used by any of `nodes`.
pub(crate) fn pick_color(used: &[ColorSet], nodes: &[NodeIndex]) -> u32 {
    (0..)
        .find(|&color| {
            nodes
                .iter()
                .all(|node| !used[node.index()].contains(color))
        })
        .unwrap_or(0)
}

impl<N, E> IslandGraph<N, E>
where
    N: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    /// Color the edges of `container` in awake islands with more than
    /// `min_edges` edges.
    ///
    /// Edges are visited in index order and take the first color that none of
    /// their endpoints already uses, static anchors included. Edges of
    /// skipped islands have no color.
    pub fn compute_colors(&mut self, container: ContainerId, min_edges: u32) {
        for edge in self.graph.edge_weights_mut() {
            if edge.container == container {
                edge.color = None;
            }
        }
        for island in self.islands.node_weights_mut() {
            if !island.is_sleeping {
                island.max_colors = 0;
            }
        }

        let mut used = vec![ColorSet::default(); self.graph.node_bound()];
        let mut endpoints = Vec::with_capacity(2);

        let indices: Vec<_> = self.graph.edge_indices().collect();
        for index in indices {
            let edge = &self.graph[index];
            if edge.container != container {
                continue;
            }
            let Some(island_id) = edge.island else {
                continue;
            };
            let Some(island) = self.islands.node_weight(island_id.index()) else {
                continue;
            };
            if island.is_sleeping || island.num_edges <= min_edges {
                continue;
            }

            endpoints.clear();
            endpoints.extend(edge.nodes().into_iter().flatten());
            endpoints.dedup();

            let color = pick_color(&used, &endpoints);
            for node in &endpoints {
                used[node.index()].insert(color);
            }

            self.graph[index].color = Some(color);
            let island = &mut self.islands[island_id.index()];
            island.max_colors = island.max_colors.max(color + 1);
        }
    }

    /// Color of the edge of `item`, if colored.
    pub fn edge_color(&self, item: &E) -> Option<u32> {
        self.edge_index(item)
            .and_then(|index| self.edge(index))
            .and_then(|edge| edge.color)
    }
}
