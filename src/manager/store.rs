//! Access to the particle storage owned by the physics world.

use petgraph::stable_graph::NodeIndex;

use super::handles::{MaterialId, ObjectState, ParticleId};

/// Particle data the island manager reads, and the few fields it writes.
///
/// Sleep migration writes the object state and finishes with a single
/// `rebuild_views` call. The graph index is a cached lookup that the manager
/// keeps in sync with the graph.
pub trait ParticleStore {
    /// Motion type, `None` if the particle does not exist.
    fn object_state(&self, particle: ParticleId) -> Option<ObjectState>;

    fn set_object_state(&mut self, particle: ParticleId, state: ObjectState);

    fn linear_velocity(&self, particle: ParticleId) -> [f32; 3];

    fn angular_velocity(&self, particle: ParticleId) -> [f32; 3];

    fn material(&self, particle: ParticleId) -> Option<MaterialId>;

    /// Whether the particle diverged from its replicated state.
    fn is_desynced(&self, particle: ParticleId) -> bool;

    fn graph_index(&self, particle: ParticleId) -> Option<NodeIndex>;

    fn set_graph_index(&mut self, particle: ParticleId, index: Option<NodeIndex>);

    /// Rebuild the active/sleeping particle views after state changes.
    fn rebuild_views(&mut self);

    /// Static, or kinematic and not moving.
    fn is_stationary(&self, particle: ParticleId) -> bool {
        match self.object_state(particle) {
            Some(ObjectState::Static) => true,
            Some(ObjectState::Kinematic) => {
                length_squared(self.linear_velocity(particle)) == 0.0
                    && length_squared(self.angular_velocity(particle)) == 0.0
            }
            _ => false,
        }
    }
}

#[inline]
pub(crate) fn length_squared(v: [f32; 3]) -> f32 {
    v[0] * v[0] + v[1] * v[1] + v[2] * v[2]
}
