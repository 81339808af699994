//! IslandManager - bridges physics particles and constraints to the island graph.
//!
//! The manager derives node validity from the particle object state, keeps one
//! `IslandSolver` per graph island and runs the sleep heuristics.
//!
//! # Step order
//!
//! 1. `add_particle` / `add_constraint` / `remove_*` as the world changes
//! 2. `update_islands` settles the graph and syncs the solvers
//! 3. the solver consumes `island_particles` / `island_constraints`
//! 4. `sleep_inactive_islands` puts resting islands to sleep

use std::collections::HashMap;

use log::{debug, error, trace};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use serde::Serialize;

use super::handles::{ConstraintHandle, ObjectState, ParticleId};
use super::store::{ParticleStore, length_squared};
use crate::config::{IslandManagerConfig, PhysicsMaterials, SleepThresholds};
use crate::error::IslandError;
use crate::graph::{ContainerId, IslandGraph, IslandId};
use crate::solver::IslandSolver;

/// Island graph keyed by particle and constraint handles.
pub type ParticleGraph = IslandGraph<ParticleId, ConstraintHandle>;

/// Diagnostic report of one island.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IslandSummary {
    pub index: usize,
    pub island: u32,
    pub num_particles: usize,
    pub num_constraints: usize,
    pub is_sleeping: bool,
    pub is_persistent: bool,
    pub needs_resim: bool,
    pub sleep_counter: u32,
    pub max_levels: u32,
    pub max_colors: u32,
}

/// Owns the island graph and the solver islands derived from it.
#[derive(Debug, Clone, Default)]
pub struct IslandManager {
    graph: ParticleGraph,
    islands: Vec<IslandSolver>,
    config: IslandManagerConfig,
}

impl IslandManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IslandManagerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &IslandManagerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: IslandManagerConfig) {
        self.config = config;
    }

    /// The underlying graph, for level and color queries.
    pub fn graph(&self) -> &ParticleGraph {
        &self.graph
    }

    // =========================================================================
    // Particles
    // =========================================================================

    /// Add a particle, or refresh its flags if already present.
    pub fn add_particle<S: ParticleStore>(
        &mut self,
        store: &mut S,
        particle: ParticleId,
    ) -> Option<NodeIndex> {
        let Some(state) = store.object_state(particle) else {
            error!("add_particle: {}", IslandError::UnknownParticle(particle));
            return None;
        };

        let stationary = store.is_stationary(particle);
        let index = self
            .graph
            .add_node(particle, state.is_valid(), None, stationary);
        store.set_graph_index(particle, Some(index));
        Some(index)
    }

    /// Re-derive validity and stationarity after a state or velocity change.
    pub fn update_particle<S: ParticleStore>(&mut self, store: &mut S, particle: ParticleId) -> bool {
        let Some(index) = self.node_of(store, particle) else {
            error!("update_particle: {}", IslandError::UnknownNode(particle.to_string()));
            return false;
        };
        let Some(state) = store.object_state(particle) else {
            error!("update_particle: {}", IslandError::UnknownParticle(particle));
            return false;
        };

        let stationary = store.is_stationary(particle);
        self.graph
            .update_node(index, state.is_valid(), None, stationary);
        true
    }

    /// Remove a particle and every constraint attached to it.
    pub fn remove_particle<S: ParticleStore>(&mut self, store: &mut S, particle: ParticleId) -> bool {
        match self.graph.remove_node(particle) {
            Ok(()) => {
                if store.object_state(particle).is_some() {
                    store.set_graph_index(particle, None);
                }
                true
            }
            Err(err) => {
                error!("remove_particle: {err}");
                false
            }
        }
    }

    /// Node of a particle, through the cached graph index when it is current.
    fn node_of<S: ParticleStore>(&self, store: &S, particle: ParticleId) -> Option<NodeIndex> {
        store
            .graph_index(particle)
            .filter(|&index| {
                self.graph
                    .node(index)
                    .is_some_and(|node| node.item == particle)
            })
            .or_else(|| self.graph.node_index(&particle))
    }

    // =========================================================================
    // Constraints
    // =========================================================================

    /// Add a constraint, creating the nodes of its particles on demand.
    ///
    /// Particles unknown to the store are treated as world anchors.
    pub fn add_constraint<S: ParticleStore>(
        &mut self,
        store: &mut S,
        constraint: ConstraintHandle,
    ) -> Option<EdgeIndex> {
        let mut nodes = [None, None];
        for (slot, particle) in nodes.iter_mut().zip(constraint.particles) {
            if let Some(particle) = particle {
                *slot = match self.node_of(store, particle) {
                    Some(index) => Some(index),
                    None => self.add_particle(store, particle),
                };
            }
        }
        let [first, second] = nodes;

        self.graph
            .add_edge(constraint, constraint.container, first, second)
            .map_err(|err| error!("add_constraint: {err}"))
            .ok()
    }

    /// Remove a constraint. Its island is flagged for re-splitting.
    pub fn remove_constraint(&mut self, constraint: &ConstraintHandle) -> bool {
        let Some(index) = self.graph.edge_index(constraint) else {
            error!(
                "remove_constraint: {}",
                IslandError::UnknownEdge(constraint.id.to_string())
            );
            return false;
        };

        if let Some(island) = self.graph.edge(index).and_then(|edge| edge.island) {
            if let Err(err) = self.graph.mark_island_dirty(island) {
                error!("remove_constraint: {err}");
            }
        }
        self.graph.remove_edge(index).is_some()
    }

    // =========================================================================
    // Island Update
    // =========================================================================

    /// Settle the graph and sync the solver islands.
    pub fn update_islands<S: ParticleStore>(&mut self, store: &mut S) {
        self.graph.update_graph();
        self.sync_islands(store);

        if self.config.levels_and_colors {
            let containers = self.config.solver_containers.clone();
            for container in containers {
                self.compute_levels(container);
                self.compute_colors(container);
            }
        }
    }

    /// Reconcile one solver per graph island and refresh their contents.
    ///
    /// A solver keeps its dense index while its island survives and no island
    /// before it disappears.
    pub fn sync_islands<S: ParticleStore>(&mut self, store: &mut S) {
        let mut previous: HashMap<IslandId, IslandSolver> = self
            .islands
            .drain(..)
            .map(|solver| (solver.island(), solver))
            .collect();

        let ids: Vec<IslandId> = self.graph.islands().map(|(id, _)| id).collect();
        let mut changed = Vec::new();
        let mut group = 0;
        for (dense, id) in ids.into_iter().enumerate() {
            let Some(island) = self.graph.island_mut(id) else {
                continue;
            };
            island.island_item = Some(dense);

            let (mut solver, created) = match previous.remove(&id) {
                Some(solver) => (solver, false),
                None => (IslandSolver::new(id), true),
            };

            if created || !island.is_persistent || solver.is_sleeping() != island.is_sleeping {
                changed.push(dense);
            }
            if island.is_sleeping {
                solver.set_group_index(None);
            } else {
                solver.set_group_index(Some(group));
                group += 1;
            }
            self.islands.push(solver);
        }

        self.populate_islands();

        let mut moved = false;
        for &dense in &changed {
            moved |= self.update_sleep_state(store, dense);
            self.update_sync_state(store, dense);
        }
        if moved {
            store.rebuild_views();
        }

        self.graph.settle_islands();
        for solver in &mut self.islands {
            let persistent = self
                .graph
                .island(solver.island())
                .is_some_and(|island| island.is_persistent);
            solver.set_persistent(persistent);
        }

        trace!(
            "synced {} islands, {} changed, {} dropped",
            self.islands.len(),
            changed.len(),
            previous.len()
        );
    }

    /// Fill every solver from the graph's node and edge assignment.
    pub fn populate_islands(&mut self) {
        for solver in &mut self.islands {
            solver.clear();
        }

        let graph = &self.graph;
        let dense = |island: Option<IslandId>| {
            island
                .and_then(|id| graph.island(id))
                .and_then(|island| island.island_item)
        };

        for (_, node) in graph.nodes() {
            if !node.is_valid() {
                continue;
            }
            if let Some(solver) = dense(node.island).and_then(|d| self.islands.get_mut(d)) {
                solver.add_particle(node.item);
            }
        }
        for (_, edge) in graph.edges() {
            if let Some(solver) = dense(edge.island).and_then(|d| self.islands.get_mut(d)) {
                solver.add_constraint(edge.item);
            }
        }

        for solver in &mut self.islands {
            solver.sort_constraints();
        }
    }

    /// Move the particles of an island between the dynamic and sleeping
    /// states to match the graph. Returns whether any particle changed.
    ///
    /// The caller is responsible for `rebuild_views`.
    fn update_sleep_state<S: ParticleStore>(&mut self, store: &mut S, dense: usize) -> bool {
        let Some(solver) = self.islands.get_mut(dense) else {
            return false;
        };
        let Some(sleeping) = self
            .graph
            .island(solver.island())
            .map(|island| island.is_sleeping)
        else {
            return false;
        };
        solver.set_sleeping(sleeping);

        let (from, to) = if sleeping {
            (ObjectState::Dynamic, ObjectState::Sleeping)
        } else {
            solver.set_sleep_counter(0);
            (ObjectState::Sleeping, ObjectState::Dynamic)
        };

        let mut moved = false;
        for &particle in solver.particles() {
            if store.object_state(particle) == Some(from) {
                store.set_object_state(particle, to);
                moved = true;
            }
        }
        moved
    }

    fn update_sync_state<S: ParticleStore>(&mut self, store: &S, dense: usize) {
        if let Some(solver) = self.islands.get_mut(dense) {
            let needs_resim = solver
                .particles()
                .iter()
                .any(|&particle| store.is_desynced(particle));
            solver.set_needs_resim(needs_resim);
        }
    }

    // =========================================================================
    // Sleeping
    // =========================================================================

    /// Advance the sleep counter of one island and put it to sleep once it
    /// has rested long enough. Returns whether the island fell asleep.
    ///
    /// Only persistent awake islands are candidates. The island rests when the
    /// fastest dynamic particle is below the strictest thresholds of all its
    /// particles; any `never_sleep` material keeps it awake.
    pub fn sleep_inactive<S: ParticleStore>(
        &mut self,
        store: &mut S,
        materials: &PhysicsMaterials,
        dense: usize,
    ) -> bool {
        let Some(solver) = self.islands.get(dense) else {
            return false;
        };
        let Some(island) = self.graph.island(solver.island()) else {
            return false;
        };
        if !island.is_persistent || island.is_sleeping {
            return false;
        }

        let mut max_linear = 0.0f32;
        let mut max_angular = 0.0f32;
        let mut thresholds: Option<SleepThresholds> = None;
        let mut vetoed = false;
        for &particle in solver.particles() {
            if store.object_state(particle) != Some(ObjectState::Dynamic) {
                continue;
            }

            let material = store.material(particle).and_then(|id| materials.get(id));
            if material.is_some_and(|material| material.never_sleep) {
                vetoed = true;
                break;
            }

            let particle_thresholds = material.map_or(self.config.default_sleep, |m| m.sleep);
            thresholds = Some(match thresholds {
                Some(current) => current.min(particle_thresholds),
                None => particle_thresholds,
            });
            max_linear = max_linear.max(length_squared(store.linear_velocity(particle)));
            max_angular = max_angular.max(length_squared(store.angular_velocity(particle)));
        }

        if vetoed {
            self.islands[dense].set_sleep_counter(0);
            return false;
        }
        let Some(thresholds) = thresholds else {
            return false;
        };

        let solver = &mut self.islands[dense];
        let resting = max_linear < thresholds.linear * thresholds.linear
            && max_angular < thresholds.angular * thresholds.angular;
        let counter = if resting { solver.sleep_counter() + 1 } else { 0 };
        solver.set_sleep_counter(counter);

        if counter < thresholds.counter_threshold {
            return false;
        }

        let island = solver.island();
        trace!("{island} rested for {counter} updates");
        self.sleep_island(store, dense)
    }

    /// Run `sleep_inactive` on every island. Returns how many fell asleep.
    pub fn sleep_inactive_islands<S: ParticleStore>(
        &mut self,
        store: &mut S,
        materials: &PhysicsMaterials,
    ) -> usize {
        let slept = (0..self.islands.len())
            .filter(|&dense| self.sleep_inactive(store, materials, dense))
            .count();
        if slept > 0 {
            debug!("{slept} islands fell asleep");
        }
        slept
    }

    /// Put an island to sleep now.
    pub fn sleep_island<S: ParticleStore>(&mut self, store: &mut S, dense: usize) -> bool {
        self.set_island_sleeping(store, dense, true)
    }

    /// Wake an island now.
    pub fn wake_island<S: ParticleStore>(&mut self, store: &mut S, dense: usize) -> bool {
        self.set_island_sleeping(store, dense, false)
    }

    fn set_island_sleeping<S: ParticleStore>(
        &mut self,
        store: &mut S,
        dense: usize,
        sleeping: bool,
    ) -> bool {
        let Some(solver) = self.islands.get_mut(dense) else {
            return false;
        };
        solver.set_sleep_counter(0);
        if let Err(err) = self.graph.set_island_sleeping(solver.island(), sleeping) {
            error!("set_island_sleeping: {err}");
            return false;
        }

        if self.update_sleep_state(store, dense) {
            store.rebuild_views();
        }
        true
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Compute the levels of one container.
    pub fn compute_levels(&mut self, container: ContainerId) {
        self.graph.compute_levels(container);
    }

    /// Compute the colors of one container, skipping small islands.
    pub fn compute_colors(&mut self, container: ContainerId) {
        self.graph
            .compute_colors(container, self.config.min_color_edges);
    }

    pub fn constraint_level(&self, constraint: &ConstraintHandle) -> Option<u32> {
        self.graph.edge_level(constraint)
    }

    pub fn constraint_color(&self, constraint: &ConstraintHandle) -> Option<u32> {
        self.graph.edge_color(constraint)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of synced islands.
    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    pub fn island_solver(&self, dense: usize) -> Option<&IslandSolver> {
        self.islands.get(dense)
    }

    pub fn island_solvers(&self) -> &[IslandSolver] {
        &self.islands
    }

    pub fn island_particles(&self, dense: usize) -> &[ParticleId] {
        self.islands
            .get(dense)
            .map(IslandSolver::particles)
            .unwrap_or_default()
    }

    pub fn island_constraints(&self, dense: usize) -> &[ConstraintHandle] {
        self.islands
            .get(dense)
            .map(IslandSolver::constraints)
            .unwrap_or_default()
    }

    pub fn island_needs_resim(&self, dense: usize) -> bool {
        self.islands
            .get(dense)
            .is_some_and(IslandSolver::needs_resim)
    }

    pub fn is_island_sleeping(&self, dense: usize) -> bool {
        self.islands.get(dense).is_some_and(IslandSolver::is_sleeping)
    }

    pub fn is_island_persistent(&self, dense: usize) -> bool {
        self.islands
            .get(dense)
            .is_some_and(IslandSolver::is_persistent)
    }

    /// Dense index of the island holding a particle, as of the last sync.
    pub fn particle_island(&self, particle: ParticleId) -> Option<usize> {
        let index = self.graph.node_index(&particle)?;
        let island = self.graph.node(index)?.island?;
        self.graph.island(island)?.island_item
    }

    /// Per-island diagnostics in dense order.
    pub fn island_summaries(&self) -> Vec<IslandSummary> {
        self.islands
            .iter()
            .enumerate()
            .map(|(index, solver)| {
                let island = self.graph.island(solver.island());
                IslandSummary {
                    index,
                    island: solver.island().raw(),
                    num_particles: solver.particles().len(),
                    num_constraints: solver.constraints().len(),
                    is_sleeping: solver.is_sleeping(),
                    is_persistent: solver.is_persistent(),
                    needs_resim: solver.needs_resim(),
                    sleep_counter: solver.sleep_counter(),
                    max_levels: island.map_or(0, |island| island.max_levels),
                    max_colors: island.map_or(0, |island| island.max_colors),
                }
            })
            .collect()
    }

    /// Forget every particle, constraint and island.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.islands.clear();
    }
}
