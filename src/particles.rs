//! ParticleTable - reference particle storage in SoA layout.
//!
//! Particle data lives in parallel arrays indexed by slot, with a map from the
//! stable ParticleId to its slot. Removed slots are zeroed and recycled.

use std::collections::HashMap;

use petgraph::stable_graph::NodeIndex;

use crate::manager::{MaterialId, ObjectState, ParticleId, ParticleStore};

/// Particle storage implementing [`ParticleStore`].
///
/// Besides the per-particle arrays, the table keeps two views listing the
/// active (static, kinematic, dynamic) and the sleeping particles. The views
/// are rebuilt by `rebuild_views`.
#[derive(Debug, Clone, Default)]
pub struct ParticleTable {
    /// Map from stable ParticleId to slot
    slots: HashMap<ParticleId, usize>,

    /// Slots released by `remove`
    free_slots: Vec<usize>,

    /// Next particle id to assign
    next_id: u32,

    /// Particle id of each slot, `None` for free slots
    ids: Vec<Option<ParticleId>>,

    /// Object states (SoA layout)
    states: Vec<ObjectState>,

    /// Linear velocities (SoA layout)
    linear: Vec<[f32; 3]>,

    /// Angular velocities (SoA layout)
    angular: Vec<[f32; 3]>,

    /// Materials (SoA layout)
    materials: Vec<Option<MaterialId>>,

    /// Desync flags (SoA layout)
    desynced: Vec<bool>,

    /// Cached island graph node of each particle
    graph_indices: Vec<Option<NodeIndex>>,

    active_view: Vec<ParticleId>,
    sleeping_view: Vec<ParticleId>,
    rebuild_count: u32,
}

impl ParticleTable {
    /// Create a new empty particle table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a particle table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
            linear: Vec::with_capacity(capacity),
            angular: Vec::with_capacity(capacity),
            materials: Vec::with_capacity(capacity),
            desynced: Vec::with_capacity(capacity),
            graph_indices: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Add a particle at rest.
    pub fn add(&mut self, state: ObjectState) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.ids[slot] = Some(id);
                self.states[slot] = state;
                slot
            }
            None => {
                self.ids.push(Some(id));
                self.states.push(state);
                self.linear.push([0.0; 3]);
                self.angular.push([0.0; 3]);
                self.materials.push(None);
                self.desynced.push(false);
                self.graph_indices.push(None);
                self.ids.len() - 1
            }
        };

        self.slots.insert(id, slot);
        id
    }

    /// Remove a particle. Returns true if it existed.
    pub fn remove(&mut self, id: ParticleId) -> bool {
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };

        // Zero out the slot for reuse
        self.ids[slot] = None;
        self.states[slot] = ObjectState::Static;
        self.linear[slot] = [0.0; 3];
        self.angular[slot] = [0.0; 3];
        self.materials[slot] = None;
        self.desynced[slot] = false;
        self.graph_indices[slot] = None;
        self.free_slots.push(slot);
        true
    }

    /// Get the number of particles.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Iterate over particle ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.ids.iter().flatten().copied()
    }

    pub fn set_linear_velocity(&mut self, id: ParticleId, velocity: [f32; 3]) {
        if let Some(&slot) = self.slots.get(&id) {
            self.linear[slot] = velocity;
        }
    }

    pub fn set_angular_velocity(&mut self, id: ParticleId, velocity: [f32; 3]) {
        if let Some(&slot) = self.slots.get(&id) {
            self.angular[slot] = velocity;
        }
    }

    pub fn set_material(&mut self, id: ParticleId, material: Option<MaterialId>) {
        if let Some(&slot) = self.slots.get(&id) {
            self.materials[slot] = material;
        }
    }

    pub fn set_desynced(&mut self, id: ParticleId, desynced: bool) {
        if let Some(&slot) = self.slots.get(&id) {
            self.desynced[slot] = desynced;
        }
    }

    /// Non-sleeping particles as of the last `rebuild_views`.
    pub fn active_view(&self) -> &[ParticleId] {
        &self.active_view
    }

    /// Sleeping particles as of the last `rebuild_views`.
    pub fn sleeping_view(&self) -> &[ParticleId] {
        &self.sleeping_view
    }

    /// Number of `rebuild_views` calls so far.
    pub fn rebuild_count(&self) -> u32 {
        self.rebuild_count
    }

    /// Clear all particles, resetting the table to its initial state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl ParticleStore for ParticleTable {
    fn object_state(&self, particle: ParticleId) -> Option<ObjectState> {
        self.slots.get(&particle).map(|&slot| self.states[slot])
    }

    fn set_object_state(&mut self, particle: ParticleId, state: ObjectState) {
        if let Some(&slot) = self.slots.get(&particle) {
            self.states[slot] = state;
        }
    }

    fn linear_velocity(&self, particle: ParticleId) -> [f32; 3] {
        self.slots
            .get(&particle)
            .map_or([0.0; 3], |&slot| self.linear[slot])
    }

    fn angular_velocity(&self, particle: ParticleId) -> [f32; 3] {
        self.slots
            .get(&particle)
            .map_or([0.0; 3], |&slot| self.angular[slot])
    }

    fn material(&self, particle: ParticleId) -> Option<MaterialId> {
        self.slots
            .get(&particle)
            .and_then(|&slot| self.materials[slot])
    }

    fn is_desynced(&self, particle: ParticleId) -> bool {
        self.slots
            .get(&particle)
            .is_some_and(|&slot| self.desynced[slot])
    }

    fn graph_index(&self, particle: ParticleId) -> Option<NodeIndex> {
        self.slots
            .get(&particle)
            .and_then(|&slot| self.graph_indices[slot])
    }

    fn set_graph_index(&mut self, particle: ParticleId, index: Option<NodeIndex>) {
        if let Some(&slot) = self.slots.get(&particle) {
            self.graph_indices[slot] = index;
        }
    }

    fn rebuild_views(&mut self) {
        self.active_view.clear();
        self.sleeping_view.clear();
        for (id, state) in self.ids.iter().zip(&self.states) {
            let Some(id) = *id else {
                continue;
            };
            if *state == ObjectState::Sleeping {
                self.sleeping_view.push(id);
            } else {
                self.active_view.push(id);
            }
        }
        self.rebuild_count += 1;
    }
}
