//! Identities of the physics objects the island manager tracks.
//!
//! Particles and constraints are owned elsewhere; the manager only holds
//! these small copyable handles.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::graph::ContainerId;

/// Stable particle (rigid body) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

impl ParticleId {
    /// Create a new ParticleId from a raw u32.
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

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Particle({})", self.0)
    }
}

impl From<u32> for ParticleId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Stable constraint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConstraintId(pub u32);

impl ConstraintId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint({})", self.0)
    }
}

/// Physics material identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Motion type of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectState {
    /// Never moves.
    Static,
    /// Moved by the user, not by the solver.
    Kinematic,
    /// Simulated.
    Dynamic,
    /// Simulated, currently at rest.
    Sleeping,
}

impl ObjectState {
    /// Dynamic and sleeping particles take part in island connectivity.
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Dynamic | Self::Sleeping)
    }
}

/// Continuous collision detection mode of a constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CcdType {
    #[default]
    Disabled,
    Enabled,
}

/// A constraint as seen by the island manager.
///
/// Equality and hashing use the constraint id only, so a handle looked up with
/// stale particle data still finds its edge.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintHandle {
    pub id: ConstraintId,
    pub container: ContainerId,
    /// Constrained particles, `None` for a world anchor.
    pub particles: [Option<ParticleId>; 2],
    pub ccd: CcdType,
}

impl ConstraintHandle {
    pub fn new(
        id: ConstraintId,
        container: ContainerId,
        first: Option<ParticleId>,
        second: Option<ParticleId>,
    ) -> Self {
        Self {
            id,
            container,
            particles: [first, second],
            ccd: CcdType::Disabled,
        }
    }

    pub fn with_ccd(mut self, ccd: CcdType) -> Self {
        self.ccd = ccd;
        self
    }

    /// Particle pair used for deterministic ordering, lowest id first.
    pub fn sort_key(&self) -> (CcdType, Option<ParticleId>, Option<ParticleId>) {
        let [first, second] = self.particles;
        (self.ccd, first.min(second), first.max(second))
    }
}

impl PartialEq for ConstraintHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConstraintHandle {}

impl Hash for ConstraintHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
