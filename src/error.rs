//! Error types for island graph and island manager operations.
//!
//! Only invariant violations are errors. Lookups through stale indices are
//! expected transient state and return `None` instead.

use thiserror::Error;

use crate::graph::IslandId;
use crate::manager::ParticleId;

/// Invariant violations reported by the graph and the manager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IslandError {
    /// An edge must touch at least one valid node to belong to an island.
    #[error("edge {0} has no valid endpoint")]
    NoValidEndpoint(String),

    /// The node item was never added to the graph.
    #[error("node {0} is not in the graph")]
    UnknownNode(String),

    /// The edge item was never added to the graph.
    #[error("edge {0} is not in the graph")]
    UnknownEdge(String),

    /// The island does not exist.
    #[error("{0} does not exist")]
    UnknownIsland(IslandId),

    /// The particle store has no entry for this particle.
    #[error("particle {0} is not in the particle store")]
    UnknownParticle(ParticleId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            IslandError::NoValidEndpoint("7".into()).to_string(),
            "edge 7 has no valid endpoint"
        );
        assert_eq!(
            IslandError::UnknownIsland(IslandId(3)).to_string(),
            "Island(3) does not exist"
        );
        assert_eq!(
            IslandError::UnknownParticle(ParticleId(4)).to_string(),
            "particle Particle(4) is not in the particle store"
        );
    }
}
