//! Graph node type and related structures.
//!
//! Nodes are the bodies of the simulation. Each node has:
//! - The opaque item it was created for (the physics body identity)
//! - The island currently owning it (valid nodes only)
//! - Validity and stationary flags supplied by the caller
//! - A traversal stamp used to skip already-visited nodes within one pass

use super::island::IslandId;

/// Node state flags packed into a single byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags {
    flags: u8,
}

impl NodeFlags {
    const VALID: u8 = 0b0000_0001;
    const STATIONARY: u8 = 0b0000_0010;
    const LOST_EDGES: u8 = 0b0000_0100;

    /// Create a new default node state (invalid, moving).
    #[inline]
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create flags from the two caller-supplied booleans.
    #[inline]
    pub fn with(valid: bool, stationary: bool) -> Self {
        let mut flags = Self::new();
        flags.set_valid(valid);
        flags.set_stationary(stationary);
        flags
    }

    /// Check if the node takes part in island connectivity (dynamic or sleeping body).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.flags & Self::VALID != 0
    }

    /// Set the valid state.
    #[inline]
    pub fn set_valid(&mut self, valid: bool) {
        if valid {
            self.flags |= Self::VALID;
        } else {
            self.flags &= !Self::VALID;
        }
    }

    /// Check if the node is motionless (static, or kinematic with zero velocity).
    #[inline]
    pub fn is_stationary(self) -> bool {
        self.flags & Self::STATIONARY != 0
    }

    /// Set the stationary state.
    #[inline]
    pub fn set_stationary(&mut self, stationary: bool) {
        if stationary {
            self.flags |= Self::STATIONARY;
        } else {
            self.flags &= !Self::STATIONARY;
        }
    }

    /// Check if the node lost its last edge since the previous graph update.
    #[inline]
    pub fn lost_edges(self) -> bool {
        self.flags & Self::LOST_EDGES != 0
    }

    /// Set the lost-edges marker.
    #[inline]
    pub fn set_lost_edges(&mut self, lost: bool) {
        if lost {
            self.flags |= Self::LOST_EDGES;
        } else {
            self.flags &= !Self::LOST_EDGES;
        }
    }
}

/// A body in the island graph.
///
/// A valid node belongs to zero or one island. An invalid node (static or
/// kinematic body) never owns an island: it can be touched by many edges that
/// live in different islands.
#[derive(Debug, Clone)]
pub struct GraphNode<N> {
    /// The physics body this node was created for.
    pub item: N,
    /// Island owning this node, `None` for invalid or not yet assigned nodes.
    pub island: Option<IslandId>,
    /// Validity and stationary flags.
    pub flags: NodeFlags,
    /// Traversal stamp compared against the graph counter.
    pub(crate) counter: u32,
}

impl<N> GraphNode<N> {
    /// Create a node without an island.
    pub fn new(item: N, valid: bool, stationary: bool) -> Self {
        Self {
            item,
            island: None,
            flags: NodeFlags::with(valid, stationary),
            counter: 0,
        }
    }

    /// Check if the node drives island merging.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.flags.is_valid()
    }

    /// Check if the node is motionless.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.flags.is_stationary()
    }
}
