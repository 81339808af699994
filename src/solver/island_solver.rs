//! IslandSolver - the particles and constraints of one materialized island.

use crate::graph::IslandId;
use crate::manager::{ConstraintHandle, ParticleId};

/// Solver-side view of one graph island.
///
/// Rebuilt from the graph on every sync. The sleep counter survives rebuilds
/// as long as the solver keeps mirroring the same graph island.
#[derive(Debug, Clone)]
pub struct IslandSolver {
    island: IslandId,
    particles: Vec<ParticleId>,
    constraints: Vec<ConstraintHandle>,
    is_sleeping: bool,
    is_persistent: bool,
    needs_resim: bool,
    sleep_counter: u32,
    group_index: Option<u32>,
}

impl IslandSolver {
    /// Create an empty awake solver mirroring `island`.
    pub fn new(island: IslandId) -> Self {
        Self {
            island,
            particles: Vec::new(),
            constraints: Vec::new(),
            is_sleeping: false,
            is_persistent: false,
            needs_resim: false,
            sleep_counter: 0,
            group_index: None,
        }
    }

    /// Graph island this solver mirrors.
    #[inline]
    pub fn island(&self) -> IslandId {
        self.island
    }

    #[inline]
    pub fn particles(&self) -> &[ParticleId] {
        &self.particles
    }

    #[inline]
    pub fn constraints(&self) -> &[ConstraintHandle] {
        &self.constraints
    }

    pub fn add_particle(&mut self, particle: ParticleId) {
        self.particles.push(particle);
    }

    /// Remove a particle, returning whether it was present.
    pub fn remove_particle(&mut self, particle: ParticleId) -> bool {
        match self.particles.iter().position(|&p| p == particle) {
            Some(position) => {
                self.particles.swap_remove(position);
                true
            }
            None => false,
        }
    }

    pub fn add_constraint(&mut self, constraint: ConstraintHandle) {
        self.constraints.push(constraint);
    }

    /// Remove a constraint, returning whether it was present.
    pub fn remove_constraint(&mut self, constraint: &ConstraintHandle) -> bool {
        match self.constraints.iter().position(|c| c == constraint) {
            Some(position) => {
                self.constraints.swap_remove(position);
                true
            }
            None => false,
        }
    }

    pub fn reserve(&mut self, particles: usize, constraints: usize) {
        self.particles.reserve(particles);
        self.constraints.reserve(constraints);
    }

    /// Drop the particle and constraint lists, keeping flags and counters.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.constraints.clear();
    }

    /// Order constraints by CCD type, then by particle pair, then by id.
    ///
    /// The solve order then depends only on the island content, not on the
    /// order constraints were created in.
    pub fn sort_constraints(&mut self) {
        self.constraints
            .sort_by_key(|constraint| (constraint.sort_key(), constraint.id));
    }

    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.is_sleeping
    }

    pub(crate) fn set_sleeping(&mut self, sleeping: bool) {
        self.is_sleeping = sleeping;
    }

    /// No structural change since the island last settled.
    #[inline]
    pub fn is_persistent(&self) -> bool {
        self.is_persistent
    }

    pub(crate) fn set_persistent(&mut self, persistent: bool) {
        self.is_persistent = persistent;
    }

    /// At least one particle diverged from its replicated state.
    #[inline]
    pub fn needs_resim(&self) -> bool {
        self.needs_resim
    }

    pub(crate) fn set_needs_resim(&mut self, needs_resim: bool) {
        self.needs_resim = needs_resim;
    }

    /// Consecutive updates the island spent below its sleep thresholds.
    #[inline]
    pub fn sleep_counter(&self) -> u32 {
        self.sleep_counter
    }

    pub(crate) fn set_sleep_counter(&mut self, counter: u32) {
        self.sleep_counter = counter;
    }

    /// Position among the awake islands of the last sync, `None` while asleep.
    #[inline]
    pub fn group_index(&self) -> Option<u32> {
        self.group_index
    }

    pub(crate) fn set_group_index(&mut self, group_index: Option<u32>) {
        self.group_index = group_index;
    }
}
