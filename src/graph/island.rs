//! Island type and related structures.
//!
//! An island is a connected component of valid nodes and the edges between
//! them. Islands are retained across updates: merging is deferred through
//! links between islands, splitting is done only for dirty awake islands.

use std::fmt;

use petgraph::stable_graph::NodeIndex;

/// Stable island identifier.
///
/// Remains valid until the island is emptied by a merge or a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IslandId(pub u32);

impl IslandId {
    /// Create a new IslandId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> NodeIndex {
        NodeIndex::new(self.0 as usize)
    }

    #[inline]
    pub(crate) fn from_index(index: NodeIndex) -> Self {
        Self(index.index() as u32)
    }
}

impl fmt::Display for IslandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Island({})", self.0)
    }
}

impl From<u32> for IslandId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<IslandId> for u32 {
    #[inline]
    fn from(id: IslandId) -> Self {
        id.0
    }
}

/// A connected component in the island graph.
#[derive(Debug, Clone)]
pub struct GraphIsland {
    /// Number of valid nodes owned by the island.
    pub num_nodes: u32,
    /// Number of edges owned by the island.
    pub num_edges: u32,
    /// No structural change since the island last settled.
    pub is_persistent: bool,
    /// The island is excluded from simulation.
    pub is_sleeping: bool,
    /// Root this island resolved to in the last merge pass.
    pub parent: IslandId,
    /// Highest level found by the last `compute_levels` call.
    pub max_levels: u32,
    /// Number of colors used by the last `compute_colors` call.
    pub max_colors: u32,
    /// Dense index of the materialized solver island, if synced.
    pub island_item: Option<usize>,
    pub(crate) counter: u32,
}

impl GraphIsland {
    /// Create an empty, dirty, awake island.
    pub fn new(id: IslandId) -> Self {
        Self {
            num_nodes: 0,
            num_edges: 0,
            is_persistent: false,
            is_sleeping: false,
            parent: id,
            max_levels: 0,
            max_colors: 0,
            island_item: None,
            counter: 0,
        }
    }

    /// Check if the island owns neither nodes nor edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0 && self.num_edges == 0
    }
}
