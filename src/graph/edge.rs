//! Graph edge type and related structures.
//!
//! Edges are the constraints between bodies. Each edge has:
//! - The opaque item it was created for (the constraint identity)
//! - Up to two endpoint nodes (one side may be an anchor without a node)
//! - The container (constraint category) it belongs to
//! - Level and color labels derived by the analysis passes

use std::fmt;

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use super::island::IslandId;

/// Constraint container identifier (e.g. collisions vs joints).
///
/// Levels and colors are computed per container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ContainerId(pub u32);

impl ContainerId {
    /// Create a new ContainerId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container({})", self.0)
    }
}

impl From<u32> for ContainerId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A constraint in the island graph.
#[derive(Debug, Clone)]
pub struct GraphEdge<E> {
    /// The constraint this edge was created for.
    pub item: E,
    /// Container the constraint belongs to.
    pub container: ContainerId,
    /// First endpoint, `None` for an anchor without a node.
    pub first_node: Option<NodeIndex>,
    /// Second endpoint, `None` for an anchor without a node.
    pub second_node: Option<NodeIndex>,
    /// Island owning this edge.
    pub island: Option<IslandId>,
    /// Distance from the nearest anchor, set by `compute_levels`.
    pub level: Option<u32>,
    /// Parallel batch label, set by `compute_colors`.
    pub color: Option<u32>,
    pub(crate) counter: u32,
}

impl<E> GraphEdge<E> {
    /// Create an edge that has not been attached to an island yet.
    pub fn new(
        item: E,
        container: ContainerId,
        first_node: Option<NodeIndex>,
        second_node: Option<NodeIndex>,
    ) -> Self {
        Self {
            item,
            container,
            first_node,
            second_node,
            island: None,
            level: None,
            color: None,
            counter: 0,
        }
    }

    /// Both endpoints in declaration order.
    #[inline]
    pub fn nodes(&self) -> [Option<NodeIndex>; 2] {
        [self.first_node, self.second_node]
    }

    /// The endpoint on the other side of `node`.
    ///
    /// Returns `None` when the other side is an anchor without a node, or
    /// when both sides are `node` itself.
    #[inline]
    pub fn other_node(&self, node: NodeIndex) -> Option<NodeIndex> {
        if self.first_node == Some(node) {
            self.second_node.filter(|&other| other != node)
        } else if self.second_node == Some(node) {
            self.first_node
        } else {
            None
        }
    }
}
