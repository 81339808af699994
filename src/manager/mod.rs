//! Physics-facing side of the island system.
//!
//! Particles and constraints are mapped onto the island graph, graph islands
//! are materialized as [`IslandSolver`](crate::solver::IslandSolver)s and
//! resting islands are put to sleep.

mod handles;
mod island_manager;
mod store;

pub use handles::{CcdType, ConstraintHandle, ConstraintId, MaterialId, ObjectState, ParticleId};
pub use island_manager::{IslandManager, IslandSummary, ParticleGraph};
pub use store::ParticleStore;
