//! Island Graph - WASM Module
//!
//! This module partitions simulated rigid bodies and their constraints into
//! islands: independent connected groups that can be solved in parallel and
//! put to sleep once at rest. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen, and can be used natively as an
//! rlib.
//!
//! # Architecture
//!
//! - `graph`: IslandGraph with incremental merge, lazy split, levels and colors
//! - `manager`: IslandManager mapping particles and constraints onto the graph
//! - `solver`: IslandSolver, the per-island particle and constraint lists
//! - `particles`: SoA particle storage used by the JS API
//! - `config`: manager configuration and physics materials

use js_sys::Int32Array;
use log::LevelFilter;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod manager;
pub mod particles;
pub mod solver;

use config::{IslandManagerConfig, PhysicsMaterial, PhysicsMaterials};
use graph::ContainerId;
use manager::{
    CcdType, ConstraintHandle, ConstraintId, IslandManager, MaterialId, ObjectState, ParticleId,
    ParticleStore,
};
use particles::ParticleTable;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(LevelFilter::Info);
}

/// Decode the JS object state code: 0 static, 1 kinematic, 2 dynamic, 3 sleeping.
fn object_state(code: u8) -> Result<ObjectState, JsValue> {
    match code {
        0 => Ok(ObjectState::Static),
        1 => Ok(ObjectState::Kinematic),
        2 => Ok(ObjectState::Dynamic),
        3 => Ok(ObjectState::Sleeping),
        _ => Err(JsValue::from_str(&format!("unknown object state {code}"))),
    }
}

fn object_state_code(state: ObjectState) -> u8 {
    match state {
        ObjectState::Static => 0,
        ObjectState::Kinematic => 1,
        ObjectState::Dynamic => 2,
        ObjectState::Sleeping => 3,
    }
}

/// Constraint lookups only need the id.
fn constraint_key(id: u32) -> ConstraintHandle {
    ConstraintHandle::new(ConstraintId(id), ContainerId::default(), None, None)
}

/// Main entry point for the island simulation.
///
/// This struct owns the particle storage, the materials and the island
/// manager, and provides the public API exposed to JavaScript.
#[wasm_bindgen]
pub struct IslandSimulationWasm {
    particles: ParticleTable,
    materials: PhysicsMaterials,
    manager: IslandManager,
}

#[wasm_bindgen]
impl IslandSimulationWasm {
    /// Create an empty simulation with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            particles: ParticleTable::new(),
            materials: PhysicsMaterials::new(),
            manager: IslandManager::new(),
        }
    }

    /// Create a simulation from a (partial) configuration object.
    ///
    /// Missing fields take their default value.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<IslandSimulationWasm, JsValue> {
        let config: IslandManagerConfig = serde_wasm_bindgen::from_value(config)?;
        Ok(Self {
            particles: ParticleTable::new(),
            materials: PhysicsMaterials::new(),
            manager: IslandManager::with_config(config),
        })
    }

    /// Insert or replace a physics material from a (partial) material object.
    #[wasm_bindgen(js_name = setMaterial)]
    pub fn set_material(&mut self, material_id: u32, material: JsValue) -> Result<(), JsValue> {
        let material: PhysicsMaterial = serde_wasm_bindgen::from_value(material)?;
        self.materials.insert(MaterialId(material_id), material);
        Ok(())
    }

    #[wasm_bindgen(js_name = removeMaterial)]
    pub fn remove_material(&mut self, material_id: u32) -> bool {
        self.materials.remove(MaterialId(material_id)).is_some()
    }

    // =========================================================================
    // Particle Operations
    // =========================================================================

    /// Add a particle at rest with the given state code.
    ///
    /// Returns the stable particle ID.
    #[wasm_bindgen(js_name = addParticle)]
    pub fn add_particle(&mut self, state: u8) -> Result<u32, JsValue> {
        let id = self.particles.add(object_state(state)?);
        self.manager.add_particle(&mut self.particles, id);
        Ok(id.raw())
    }

    /// Remove a particle and its constraints.
    ///
    /// Returns true if the particle existed and was removed.
    #[wasm_bindgen(js_name = removeParticle)]
    pub fn remove_particle(&mut self, particle_id: u32) -> bool {
        let id = ParticleId(particle_id);
        self.manager.remove_particle(&mut self.particles, id) && self.particles.remove(id)
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.particles.len() as u32
    }

    /// Get a particle's state code.
    #[wasm_bindgen(js_name = getParticleState)]
    pub fn get_particle_state(&self, particle_id: u32) -> Option<u8> {
        self.particles
            .object_state(ParticleId(particle_id))
            .map(object_state_code)
    }

    /// Change a particle's state code.
    #[wasm_bindgen(js_name = setParticleState)]
    pub fn set_particle_state(&mut self, particle_id: u32, state: u8) -> Result<bool, JsValue> {
        let id = ParticleId(particle_id);
        let state = object_state(state)?;
        if !self.particles.contains(id) {
            return Ok(false);
        }
        self.particles.set_object_state(id, state);
        Ok(self.manager.update_particle(&mut self.particles, id))
    }

    #[wasm_bindgen(js_name = setLinearVelocity)]
    pub fn set_linear_velocity(&mut self, particle_id: u32, x: f32, y: f32, z: f32) -> bool {
        let id = ParticleId(particle_id);
        self.particles.set_linear_velocity(id, [x, y, z]);
        self.manager.update_particle(&mut self.particles, id)
    }

    #[wasm_bindgen(js_name = setAngularVelocity)]
    pub fn set_angular_velocity(&mut self, particle_id: u32, x: f32, y: f32, z: f32) -> bool {
        let id = ParticleId(particle_id);
        self.particles.set_angular_velocity(id, [x, y, z]);
        self.manager.update_particle(&mut self.particles, id)
    }

    #[wasm_bindgen(js_name = setParticleMaterial)]
    pub fn set_particle_material(&mut self, particle_id: u32, material_id: Option<u32>) {
        self.particles
            .set_material(ParticleId(particle_id), material_id.map(MaterialId));
    }

    #[wasm_bindgen(js_name = setParticleDesynced)]
    pub fn set_particle_desynced(&mut self, particle_id: u32, desynced: bool) {
        self.particles.set_desynced(ParticleId(particle_id), desynced);
    }

    // =========================================================================
    // Constraint Operations
    // =========================================================================

    /// Add a constraint between two particles, or one particle and the world.
    ///
    /// Returns false if neither side is a dynamic or sleeping particle.
    #[wasm_bindgen(js_name = addConstraint)]
    pub fn add_constraint(
        &mut self,
        constraint_id: u32,
        container: u32,
        first: Option<u32>,
        second: Option<u32>,
        ccd: bool,
    ) -> bool {
        let ccd = if ccd { CcdType::Enabled } else { CcdType::Disabled };
        let handle = ConstraintHandle::new(
            ConstraintId(constraint_id),
            ContainerId(container),
            first.map(ParticleId),
            second.map(ParticleId),
        )
        .with_ccd(ccd);
        self.manager
            .add_constraint(&mut self.particles, handle)
            .is_some()
    }

    #[wasm_bindgen(js_name = removeConstraint)]
    pub fn remove_constraint(&mut self, constraint_id: u32) -> bool {
        self.manager.remove_constraint(&constraint_key(constraint_id))
    }

    #[wasm_bindgen(js_name = constraintCount)]
    pub fn constraint_count(&self) -> u32 {
        self.manager.graph().edge_count() as u32
    }

    // =========================================================================
    // Islands
    // =========================================================================

    /// Settle the island graph and rebuild the per-island lists.
    #[wasm_bindgen(js_name = updateIslands)]
    pub fn update_islands(&mut self) {
        self.manager.update_islands(&mut self.particles);
    }

    /// Put resting islands to sleep. Returns how many fell asleep.
    #[wasm_bindgen(js_name = sleepInactive)]
    pub fn sleep_inactive(&mut self) -> u32 {
        self.manager
            .sleep_inactive_islands(&mut self.particles, &self.materials) as u32
    }

    #[wasm_bindgen(js_name = islandCount)]
    pub fn island_count(&self) -> u32 {
        self.manager.island_count() as u32
    }

    /// Particle IDs of an island.
    #[wasm_bindgen(js_name = getIslandParticles)]
    pub fn get_island_particles(&self, island: usize) -> Vec<u32> {
        self.manager
            .island_particles(island)
            .iter()
            .map(|particle| particle.raw())
            .collect()
    }

    /// Constraint IDs of an island, in solve order.
    #[wasm_bindgen(js_name = getIslandConstraints)]
    pub fn get_island_constraints(&self, island: usize) -> Vec<u32> {
        self.manager
            .island_constraints(island)
            .iter()
            .map(|constraint| constraint.id.raw())
            .collect()
    }

    #[wasm_bindgen(js_name = isIslandSleeping)]
    pub fn is_island_sleeping(&self, island: usize) -> bool {
        self.manager.is_island_sleeping(island)
    }

    #[wasm_bindgen(js_name = isIslandPersistent)]
    pub fn is_island_persistent(&self, island: usize) -> bool {
        self.manager.is_island_persistent(island)
    }

    #[wasm_bindgen(js_name = islandNeedsResim)]
    pub fn island_needs_resim(&self, island: usize) -> bool {
        self.manager.island_needs_resim(island)
    }

    /// Island holding a particle as of the last update.
    #[wasm_bindgen(js_name = getParticleIsland)]
    pub fn get_particle_island(&self, particle_id: u32) -> Option<u32> {
        self.manager
            .particle_island(ParticleId(particle_id))
            .map(|island| island as u32)
    }

    #[wasm_bindgen(js_name = wakeIsland)]
    pub fn wake_island(&mut self, island: usize) -> bool {
        self.manager.wake_island(&mut self.particles, island)
    }

    #[wasm_bindgen(js_name = sleepIsland)]
    pub fn sleep_island(&mut self, island: usize) -> bool {
        self.manager.sleep_island(&mut self.particles, island)
    }

    // =========================================================================
    // Levels and Colors
    // =========================================================================

    #[wasm_bindgen(js_name = computeLevels)]
    pub fn compute_levels(&mut self, container: u32) {
        self.manager.compute_levels(ContainerId(container));
    }

    #[wasm_bindgen(js_name = computeColors)]
    pub fn compute_colors(&mut self, container: u32) {
        self.manager.compute_colors(ContainerId(container));
    }

    /// Level of each requested constraint, -1 when unlabeled.
    #[wasm_bindgen(js_name = edgeLevels)]
    pub fn edge_levels(&self, constraint_ids: &[u32]) -> Int32Array {
        let levels: Vec<i32> = constraint_ids
            .iter()
            .map(|&id| {
                self.manager
                    .constraint_level(&constraint_key(id))
                    .map_or(-1, |level| level as i32)
            })
            .collect();
        Int32Array::from(&levels[..])
    }

    /// Color of each requested constraint, -1 when uncolored.
    #[wasm_bindgen(js_name = edgeColors)]
    pub fn edge_colors(&self, constraint_ids: &[u32]) -> Int32Array {
        let colors: Vec<i32> = constraint_ids
            .iter()
            .map(|&id| {
                self.manager
                    .constraint_color(&constraint_key(id))
                    .map_or(-1, |color| color as i32)
            })
            .collect();
        Int32Array::from(&colors[..])
    }

    /// Per-island diagnostics as an array of plain objects.
    #[wasm_bindgen(js_name = islandSummaries)]
    pub fn island_summaries(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.manager.island_summaries())?)
    }

    /// Remove every particle, constraint and island. Materials are kept.
    pub fn clear(&mut self) {
        self.manager.clear();
        self.particles.clear();
    }
}

impl Default for IslandSimulationWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    const CONTACTS: ContainerId = ContainerId(0);
    const JOINTS: ContainerId = ContainerId(1);

    struct World {
        particles: ParticleTable,
        manager: IslandManager,
        materials: PhysicsMaterials,
        next_constraint: u32,
    }

    impl World {
        fn new() -> Self {
            Self::with_config(IslandManagerConfig::default())
        }

        fn with_config(config: IslandManagerConfig) -> Self {
            Self {
                particles: ParticleTable::new(),
                manager: IslandManager::with_config(config),
                materials: PhysicsMaterials::new(),
                next_constraint: 0,
            }
        }

        fn particle(&mut self, state: ObjectState) -> ParticleId {
            let id = self.particles.add(state);
            self.manager.add_particle(&mut self.particles, id).unwrap();
            id
        }

        fn connect(&mut self, container: ContainerId, a: ParticleId, b: ParticleId) -> ConstraintHandle {
            let handle = ConstraintHandle::new(
                ConstraintId(self.next_constraint),
                container,
                Some(a),
                Some(b),
            );
            self.next_constraint += 1;
            self.manager
                .add_constraint(&mut self.particles, handle)
                .unwrap();
            handle
        }

        fn update(&mut self) {
            self.manager.update_islands(&mut self.particles);
        }

        fn sleep_inactive(&mut self) -> usize {
            self.manager
                .sleep_inactive_islands(&mut self.particles, &self.materials)
        }

        fn island(&self, particle: ParticleId) -> usize {
            self.manager.particle_island(particle).unwrap()
        }

        fn state(&self, particle: ParticleId) -> ObjectState {
            self.particles.object_state(particle).unwrap()
        }
    }

    #[test]
    fn test_chain_forms_one_island() {
        let mut world = World::new();
        let bodies: Vec<ParticleId> = (0..5).map(|_| world.particle(ObjectState::Dynamic)).collect();
        for pair in bodies.windows(2) {
            world.connect(CONTACTS, pair[0], pair[1]);
        }
        world.update();

        assert_eq!(world.manager.island_count(), 1);
        let island = world.island(bodies[0]);
        let mut particles = world.manager.island_particles(island).to_vec();
        particles.sort();
        assert_eq!(particles, bodies);
        assert_eq!(world.manager.island_constraints(island).len(), 4);
        world.manager.graph().validate();
    }

    #[test]
    fn test_split_on_disconnection() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        let ab = world.connect(CONTACTS, a, b);
        world.update();
        assert_eq!(world.manager.island_count(), 1);

        assert!(world.manager.remove_constraint(&ab));
        world.update();

        assert_eq!(world.manager.island_count(), 2);
        assert_ne!(world.island(a), world.island(b));
        assert_eq!(world.manager.island_particles(world.island(a)), &[a]);
        assert_eq!(world.manager.island_particles(world.island(b)), &[b]);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut world = World::new();
        let bodies: Vec<ParticleId> = (0..6).map(|_| world.particle(ObjectState::Dynamic)).collect();
        world.connect(CONTACTS, bodies[0], bodies[1]);
        world.connect(CONTACTS, bodies[2], bodies[3]);
        world.connect(JOINTS, bodies[3], bodies[4]);
        world.update();
        let before: Vec<usize> = bodies.iter().map(|&b| world.island(b)).collect();

        world.update();
        world.update();
        let after: Vec<usize> = bodies.iter().map(|&b| world.island(b)).collect();

        assert_eq!(before, after);
        assert!((0..world.manager.island_count()).all(|i| world.manager.is_island_persistent(i)));
    }

    #[test]
    fn test_anchor_levels_and_split() {
        let mut world = World::new();
        let s = world.particle(ObjectState::Static);
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        let c = world.particle(ObjectState::Dynamic);
        let sa = world.connect(CONTACTS, s, a);
        let ab = world.connect(CONTACTS, a, b);
        let bc = world.connect(CONTACTS, b, c);
        world.update();

        assert_eq!(world.manager.island_count(), 1);
        assert_eq!(world.manager.island_particles(world.island(a)).len(), 3);
        assert_eq!(world.manager.particle_island(s), None);

        world.manager.compute_levels(CONTACTS);
        assert_eq!(world.manager.constraint_level(&sa), Some(0));
        assert_eq!(world.manager.constraint_level(&ab), Some(1));
        assert_eq!(world.manager.constraint_level(&bc), Some(2));

        world.manager.remove_constraint(&ab);
        world.update();
        world.manager.compute_levels(CONTACTS);

        assert_eq!(world.manager.island_count(), 2);
        assert_eq!(world.manager.island_particles(world.island(a)), &[a]);
        assert_eq!(world.island(b), world.island(c));
        assert_eq!(world.manager.constraint_level(&sa), Some(0));
        assert_eq!(world.manager.constraint_level(&bc), Some(0));
    }

    #[test]
    fn test_static_body_shared_by_islands() {
        let mut world = World::new();
        let ground = world.particle(ObjectState::Static);
        let boxes: Vec<ParticleId> = (0..3).map(|_| world.particle(ObjectState::Dynamic)).collect();
        for &body in &boxes {
            world.connect(CONTACTS, ground, body);
        }
        world.update();

        assert_eq!(world.manager.island_count(), 3);
    }

    #[test]
    fn test_sleep_hysteresis() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, a, b);
        world.particles.set_linear_velocity(a, [0.1, 0.0, 0.0]);
        world.update();
        let island = world.island(a);

        for _ in 0..3 {
            assert_eq!(world.sleep_inactive(), 0);
        }
        world.particles.set_linear_velocity(b, [0.0, 2.0, 0.0]);
        assert_eq!(world.sleep_inactive(), 0);
        assert_eq!(world.manager.island_solver(island).unwrap().sleep_counter(), 0);
        assert!(!world.manager.is_island_sleeping(island));

        world.particles.set_linear_velocity(b, [0.0; 3]);
        for _ in 0..3 {
            assert_eq!(world.sleep_inactive(), 0);
        }
        assert_eq!(world.sleep_inactive(), 1);
        assert!(world.manager.is_island_sleeping(island));
        assert_eq!(world.state(a), ObjectState::Sleeping);
        assert_eq!(world.state(b), ObjectState::Sleeping);
        assert_eq!(world.particles.sleeping_view().len(), 2);

        // Nothing changes while asleep.
        world.update();
        assert!(world.manager.is_island_sleeping(world.island(a)));
    }

    #[test]
    fn test_never_sleep_material() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, a, b);
        world.materials.insert(
            MaterialId(7),
            PhysicsMaterial {
                never_sleep: true,
                ..Default::default()
            },
        );
        world.particles.set_material(b, Some(MaterialId(7)));
        world.update();

        for _ in 0..20 {
            assert_eq!(world.sleep_inactive(), 0);
        }
        assert_eq!(world.state(a), ObjectState::Dynamic);
    }

    #[test]
    fn test_strictest_material_wins() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, a, b);
        let mut slow = PhysicsMaterial::default();
        slow.sleep.linear = 0.01;
        world.materials.insert(MaterialId(1), slow);
        world.particles.set_material(a, Some(MaterialId(1)));
        world.particles.set_linear_velocity(b, [0.5, 0.0, 0.0]);
        world.update();

        for _ in 0..10 {
            assert_eq!(world.sleep_inactive(), 0);
        }
    }

    #[test]
    fn test_dirty_island_does_not_sleep() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        let c = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, a, b);
        world.update();
        assert!(world.manager.is_island_persistent(world.island(a)));
        assert!(world.manager.island_summaries()[world.island(a)].is_persistent);

        // Not settled by an update yet.
        world.connect(CONTACTS, b, c);
        for _ in 0..10 {
            assert_eq!(world.sleep_inactive(), 0);
        }
        assert_eq!(world.state(a), ObjectState::Dynamic);
    }

    #[test]
    fn test_wake_and_sleep_island() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        world.update();
        let island = world.island(a);

        assert!(world.manager.sleep_island(&mut world.particles, island));
        assert_eq!(world.state(a), ObjectState::Sleeping);
        let rebuilds = world.particles.rebuild_count();

        assert!(world.manager.wake_island(&mut world.particles, island));
        assert_eq!(world.state(a), ObjectState::Dynamic);
        assert_eq!(world.particles.rebuild_count(), rebuilds + 1);

        assert!(!world.manager.wake_island(&mut world.particles, 99));
    }

    #[test]
    fn test_removing_support_wakes_island() {
        let mut world = World::new();
        let ground = world.particle(ObjectState::Static);
        let body = world.particle(ObjectState::Dynamic);
        let contact = world.connect(CONTACTS, ground, body);
        world.update();
        let island = world.island(body);
        world.manager.sleep_island(&mut world.particles, island);
        assert_eq!(world.state(body), ObjectState::Sleeping);

        world.manager.remove_constraint(&contact);
        world.update();

        assert!(!world.manager.is_island_sleeping(world.island(body)));
        assert_eq!(world.state(body), ObjectState::Dynamic);
    }

    #[test]
    fn test_moving_kinematic_wakes_island() {
        let mut world = World::new();
        let platform = world.particle(ObjectState::Kinematic);
        let body = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, platform, body);
        world.update();
        let island = world.island(body);
        world.manager.sleep_island(&mut world.particles, island);
        world.update();
        assert_eq!(world.state(body), ObjectState::Sleeping);

        world.particles.set_linear_velocity(platform, [1.0, 0.0, 0.0]);
        assert!(world.manager.update_particle(&mut world.particles, platform));
        world.update();

        assert_eq!(world.state(body), ObjectState::Dynamic);
    }

    #[test]
    fn test_joining_sleeping_island_wakes_it() {
        let mut world = World::new();
        let sleeper = world.particle(ObjectState::Dynamic);
        let mover = world.particle(ObjectState::Dynamic);
        world.update();
        let island = world.island(sleeper);
        world.manager.sleep_island(&mut world.particles, island);

        world.connect(CONTACTS, sleeper, mover);
        world.update();

        assert_eq!(world.manager.island_count(), 1);
        assert_eq!(world.state(sleeper), ObjectState::Dynamic);
    }

    #[test]
    fn test_new_body_landing_on_sleeping_island_stays_awake() {
        let mut world = World::new();
        let sleeper = world.particle(ObjectState::Dynamic);
        world.update();
        let island = world.island(sleeper);
        world.manager.sleep_island(&mut world.particles, island);
        assert_eq!(world.state(sleeper), ObjectState::Sleeping);

        let falling = world.particle(ObjectState::Dynamic);
        world.particles.set_linear_velocity(falling, [0.0, -10.0, 0.0]);
        world.connect(CONTACTS, sleeper, falling);
        world.update();

        assert_eq!(world.manager.island_count(), 1);
        assert_eq!(world.state(falling), ObjectState::Dynamic);
        assert_eq!(world.state(sleeper), ObjectState::Dynamic);
        assert!(!world.manager.is_island_sleeping(world.island(falling)));
    }

    #[test]
    fn test_needs_resim() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        world.particles.set_desynced(b, true);
        world.update();

        assert!(!world.manager.island_needs_resim(world.island(a)));
        assert!(world.manager.island_needs_resim(world.island(b)));
        assert!(!world.manager.island_needs_resim(42));
    }

    #[test]
    fn test_levels_and_colors_from_config() {
        let config = IslandManagerConfig {
            levels_and_colors: true,
            solver_containers: vec![CONTACTS],
            ..Default::default()
        };
        let mut world = World::with_config(config);
        let hub = world.particle(ObjectState::Dynamic);
        let spokes: Vec<ConstraintHandle> = (0..3)
            .map(|_| {
                let leaf = world.particle(ObjectState::Dynamic);
                world.connect(CONTACTS, hub, leaf)
            })
            .collect();
        world.update();

        let mut colors: Vec<u32> = spokes
            .iter()
            .map(|spoke| world.manager.constraint_color(spoke).unwrap())
            .collect();
        colors.sort();
        assert_eq!(colors, vec![0, 1, 2]);
        assert!(spokes.iter().all(|spoke| world.manager.constraint_level(spoke) == Some(0)));

        let summary = &world.manager.island_summaries()[0];
        assert_eq!(summary.num_particles, 4);
        assert_eq!(summary.num_constraints, 3);
        assert_eq!(summary.max_colors, 3);
    }

    #[test]
    fn test_constraint_order_is_deterministic() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        let c = world.particle(ObjectState::Dynamic);
        let bc = world.connect(CONTACTS, c, b);
        let ab = world.connect(CONTACTS, b, a);
        world.update();

        let island = world.island(a);
        let order: Vec<ConstraintId> = world
            .manager
            .island_constraints(island)
            .iter()
            .map(|constraint| constraint.id)
            .collect();
        assert_eq!(order, vec![ab.id, bc.id]);
    }

    #[test]
    fn test_invalid_operations_are_rejected() {
        let mut world = World::new();
        let s = world.particle(ObjectState::Static);
        let t = world.particle(ObjectState::Kinematic);
        let handle = ConstraintHandle::new(ConstraintId(50), CONTACTS, Some(s), Some(t));

        assert!(world.manager.add_constraint(&mut world.particles, handle).is_none());
        assert!(!world.manager.remove_constraint(&handle));
        assert!(!world.manager.remove_particle(&mut world.particles, ParticleId(1000)));
        assert!(world.manager.add_particle(&mut world.particles, ParticleId(1000)).is_none());
        assert!(world.manager.island_particles(3).is_empty());
    }

    #[test]
    fn test_remove_particle() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        let c = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, a, b);
        world.connect(CONTACTS, b, c);
        world.update();

        assert!(world.manager.remove_particle(&mut world.particles, b));
        world.particles.remove(b);
        world.update();

        assert_eq!(world.manager.island_count(), 2);
        assert_eq!(world.manager.particle_island(b), None);
        world.manager.graph().validate();
    }

    #[test]
    fn test_particle_becomes_kinematic() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        let c = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, a, b);
        world.connect(CONTACTS, b, c);
        world.update();
        assert_eq!(world.manager.island_count(), 1);

        world.particles.set_object_state(b, ObjectState::Kinematic);
        world.manager.update_particle(&mut world.particles, b);
        world.update();

        assert_eq!(world.manager.island_count(), 2);
        assert_ne!(world.island(a), world.island(c));
        world.manager.graph().validate();
    }

    #[test]
    fn test_clear() {
        let mut world = World::new();
        let a = world.particle(ObjectState::Dynamic);
        let b = world.particle(ObjectState::Dynamic);
        world.connect(CONTACTS, a, b);
        world.update();

        world.manager.clear();
        assert_eq!(world.manager.island_count(), 0);
        assert_eq!(world.manager.graph().node_count(), 0);
        assert!(world.manager.island_summaries().is_empty());
    }
}
