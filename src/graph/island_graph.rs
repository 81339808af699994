//! IslandGraph - incremental island bookkeeping over bodies and constraints.
//!
//! The IslandGraph stores bodies (nodes) and constraints (edges) in a
//! petgraph `StableGraph`, so indices survive the removal of other items, and
//! keeps the islands in a second `StableGraph` whose edges are the deferred
//! merge links between islands.
//!
//! # Update cycle
//!
//! 1. Structural changes (`add_edge`, `remove_node`, ...) only link islands
//!    together and flag them as dirty (non persistent).
//! 2. `update_graph` flattens the links (`merge_islands`), gives every loose
//!    valid node its own island, refreshes the sleeping flags and finally
//!    rediscovers the connected components of every dirty awake island
//!    (`split_islands`).
//! 3. Sleeping or persistent islands are never traversed by the split.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, NodeIndexable};

use super::edge::{ContainerId, GraphEdge};
use super::island::{GraphIsland, IslandId};
use super::node::GraphNode;
use crate::error::IslandError;

/// Incremental graph of bodies, constraints and islands.
///
/// `N` identifies a body and `E` a constraint. Both are opaque to the graph
/// and only used as lookup keys.
#[derive(Debug, Clone)]
pub struct IslandGraph<N, E> {
    /// Bodies and constraints. An edge anchored on a single node is a self loop.
    pub(crate) graph: StableUnGraph<GraphNode<N>, GraphEdge<E>>,

    /// Islands. Edges are merge links waiting for the next `merge_islands`.
    pub(crate) islands: StableUnGraph<GraphIsland, ()>,

    /// Map from body item to node index
    node_items: HashMap<N, NodeIndex>,

    /// Map from constraint item to edge index
    edge_items: HashMap<E, EdgeIndex>,

    /// Traversal generation, compared against the per-item stamps
    graph_counter: u32,
}

impl<N, E> IslandGraph<N, E>
where
    N: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    /// Create a new empty island graph.
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            islands: StableUnGraph::default(),
            node_items: HashMap::new(),
            edge_items: HashMap::new(),
            graph_counter: 0,
        }
    }

    /// Create an island graph with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: StableUnGraph::with_capacity(node_capacity, edge_capacity),
            islands: StableUnGraph::default(),
            node_items: HashMap::with_capacity(node_capacity),
            edge_items: HashMap::with_capacity(edge_capacity),
            graph_counter: 0,
        }
    }

    /// Reserve room in the item lookups for additional nodes and edges.
    pub fn reserve(&mut self, additional_nodes: usize, additional_edges: usize) {
        self.node_items.reserve(additional_nodes);
        self.edge_items.reserve(additional_edges);
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node for `item`, or update it in place if it already exists.
    ///
    /// The island of a new node is assigned lazily when an edge attaches to it,
    /// or by `update_graph` for isolated valid nodes. `island_hint` places a new
    /// valid node directly into an existing island.
    pub fn add_node(
        &mut self,
        item: N,
        valid: bool,
        island_hint: Option<IslandId>,
        stationary: bool,
    ) -> NodeIndex {
        if let Some(&index) = self.node_items.get(&item) {
            self.update_node(index, valid, island_hint, stationary);
            return index;
        }

        let index = self.graph.add_node(GraphNode::new(item, valid, stationary));
        self.node_items.insert(item, index);

        if valid {
            if let Some(hint) = island_hint.filter(|id| self.islands.contains_node(id.index())) {
                self.graph[index].island = Some(hint);
                let island = &mut self.islands[hint.index()];
                island.num_nodes += 1;
                island.is_persistent = false;
            }
        }

        index
    }

    /// Update the flags of an existing node.
    ///
    /// A node becoming valid joins (and links) the islands of its edges. A node
    /// becoming invalid leaves its island and drops every edge whose other side
    /// is not valid either.
    pub fn update_node(
        &mut self,
        index: NodeIndex,
        valid: bool,
        island_hint: Option<IslandId>,
        stationary: bool,
    ) {
        let Some(node) = self.graph.node_weight_mut(index) else {
            return;
        };

        let was_valid = node.is_valid();
        node.flags.set_stationary(stationary);
        node.flags.set_valid(valid);

        if !was_valid && valid {
            self.enable_node(index, island_hint);
        } else if was_valid && !valid {
            self.disable_node(index);
        }
    }

    fn enable_node(&mut self, index: NodeIndex, island_hint: Option<IslandId>) {
        let mut touching: Vec<IslandId> = self
            .incident_edges(index)
            .into_iter()
            .filter_map(|edge| self.graph[edge].island)
            .chain(island_hint)
            .filter(|id| self.islands.contains_node(id.index()))
            .collect();
        touching.sort_unstable();
        touching.dedup();

        let Some((&root, others)) = touching.split_first() else {
            return;
        };

        for &other in others {
            self.parent_islands(root, other);
        }

        self.graph[index].island = Some(root);
        let island = &mut self.islands[root.index()];
        island.num_nodes += 1;
        island.is_persistent = false;
    }

    fn disable_node(&mut self, index: NodeIndex) {
        if let Some(id) = self.graph[index].island.take() {
            if let Some(island) = self.islands.node_weight_mut(id.index()) {
                island.num_nodes = island.num_nodes.saturating_sub(1);
                island.is_persistent = false;
            }
        }

        // An edge between two immobile points carries no simulation meaning.
        for edge in self.incident_edges(index) {
            let other_valid = self.graph[edge]
                .other_node(index)
                .is_some_and(|other| self.graph[other].is_valid());
            if !other_valid {
                self.dirty_edge_island(edge);
                self.remove_edge(edge);
            }
        }
    }

    /// Remove the node of `item` together with all its edges.
    pub fn remove_node(&mut self, item: N) -> Result<(), IslandError> {
        let index = self
            .node_items
            .get(&item)
            .copied()
            .ok_or_else(|| IslandError::UnknownNode(format!("{item:?}")))?;

        let edges = self.incident_edges(index);
        if edges.is_empty() {
            if !self.graph[index].is_stationary() {
                self.dirty_island(self.graph[index].island);
            }
        } else {
            for edge in edges {
                self.dirty_edge_island(edge);
                self.remove_edge(edge);
            }
        }

        self.node_items.remove(&item);
        if let Some(node) = self.graph.remove_node(index) {
            if let Some(island) = node
                .island
                .and_then(|id| self.islands.node_weight_mut(id.index()))
            {
                island.num_nodes = island.num_nodes.saturating_sub(1);
                if !node.is_stationary() {
                    island.is_persistent = false;
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge for `item` between two optional nodes.
    ///
    /// At least one endpoint must be a valid node. Adding an item twice returns
    /// the existing edge.
    pub fn add_edge(
        &mut self,
        item: E,
        container: ContainerId,
        first_node: Option<NodeIndex>,
        second_node: Option<NodeIndex>,
    ) -> Result<EdgeIndex, IslandError> {
        if let Some(&index) = self.edge_items.get(&item) {
            return Ok(index);
        }

        let first_node = first_node.filter(|&node| self.graph.contains_node(node));
        let second_node = second_node.filter(|&node| self.graph.contains_node(node));

        if !self.is_valid_node(first_node) && !self.is_valid_node(second_node) {
            return Err(IslandError::NoValidEndpoint(format!("{item:?}")));
        }

        let Some(source) = first_node.or(second_node) else {
            return Err(IslandError::NoValidEndpoint(format!("{item:?}")));
        };
        let target = second_node.unwrap_or(source);

        let index = self.graph.add_edge(
            source,
            target,
            GraphEdge::new(item, container, first_node, second_node),
        );
        self.edge_items.insert(item, index);
        self.attach_islands(index);

        Ok(index)
    }

    /// Resolve the island of a freshly added edge from its endpoints.
    fn attach_islands(&mut self, edge_index: EdgeIndex) {
        let mut endpoints: Vec<NodeIndex> = self.graph[edge_index]
            .nodes()
            .into_iter()
            .flatten()
            .filter(|&node| self.graph[node].is_valid())
            .collect();
        endpoints.dedup();

        let island1 = endpoints.first().and_then(|&node| self.graph[node].island);
        let island2 = endpoints.get(1).and_then(|&node| self.graph[node].island);

        let island = match (island1, island2) {
            (Some(first), Some(second)) => {
                if first != second {
                    self.parent_islands(first, second);
                } else {
                    self.dirty_island(Some(first));
                }
                first.min(second)
            }
            (Some(island), None) | (None, Some(island)) => {
                self.dirty_island(Some(island));
                // A loose body joining a sleeping island wakes it.
                if endpoints.len() > 1 {
                    self.islands[island.index()].is_sleeping = false;
                }
                island
            }
            (None, None) => self.new_island(),
        };

        for node in endpoints {
            if self.graph[node].island.is_none() {
                self.graph[node].island = Some(island);
                self.islands[island.index()].num_nodes += 1;
            }
        }

        self.graph[edge_index].island = Some(island);
        self.islands[island.index()].num_edges += 1;
    }

    /// Remove an edge by index. Stale indices are ignored.
    ///
    /// Island persistence is left to the caller.
    pub fn remove_edge(&mut self, index: EdgeIndex) -> Option<E> {
        let edge = self.graph.remove_edge(index)?;
        self.edge_items.remove(&edge.item);

        if let Some(island) = edge
            .island
            .and_then(|id| self.islands.node_weight_mut(id.index()))
        {
            island.num_edges = island.num_edges.saturating_sub(1);
        }

        for node in edge.nodes().into_iter().flatten() {
            let orphaned = self.graph.edges(node).next().is_none();
            if let Some(weight) = self.graph.node_weight_mut(node) {
                if orphaned && weight.is_valid() {
                    weight.flags.set_lost_edges(true);
                }
            }
        }

        Some(edge.item)
    }

    /// Remove the edge of `item`.
    pub fn remove_edge_item(&mut self, item: E) -> Result<EdgeIndex, IslandError> {
        let index = self
            .edge_items
            .get(&item)
            .copied()
            .ok_or_else(|| IslandError::UnknownEdge(format!("{item:?}")))?;
        self.remove_edge(index);
        Ok(index)
    }

    // =========================================================================
    // Island Operations
    // =========================================================================

    fn new_island(&mut self) -> IslandId {
        let index = self.islands.add_node(GraphIsland::new(IslandId(u32::MAX)));
        let id = IslandId::from_index(index);
        self.islands[index].parent = id;
        id
    }

    /// Queue two islands for merging in the next `merge_islands` pass.
    fn parent_islands(&mut self, first: IslandId, second: IslandId) {
        if first == second {
            return;
        }
        self.islands.update_edge(first.index(), second.index(), ());
        self.dirty_island(Some(first));
        self.dirty_island(Some(second));
    }

    fn dirty_island(&mut self, id: Option<IslandId>) {
        if let Some(island) = id.and_then(|id| self.islands.node_weight_mut(id.index())) {
            island.is_persistent = false;
        }
    }

    fn dirty_edge_island(&mut self, edge: EdgeIndex) {
        let island = self.graph.edge_weight(edge).and_then(|edge| edge.island);
        self.dirty_island(island);
    }

    /// Flag an island as structurally changed so the next update re-splits it.
    pub fn mark_island_dirty(&mut self, id: IslandId) -> Result<(), IslandError> {
        let island = self
            .islands
            .node_weight_mut(id.index())
            .ok_or(IslandError::UnknownIsland(id))?;
        island.is_persistent = false;
        Ok(())
    }

    /// Set the sleeping flag of an island.
    pub fn set_island_sleeping(
        &mut self,
        id: IslandId,
        sleeping: bool,
    ) -> Result<(), IslandError> {
        let island = self
            .islands
            .node_weight_mut(id.index())
            .ok_or(IslandError::UnknownIsland(id))?;
        island.is_sleeping = sleeping;
        Ok(())
    }

    /// Flatten the deferred merge links into their root islands.
    ///
    /// Each connected group of linked islands collapses into its smallest
    /// island index. Node and edge islands are then rewritten in one linear
    /// pass and emptied islands are erased.
    pub fn merge_islands(&mut self) {
        let counter = self.next_counter();
        let dirty: Vec<NodeIndex> = self
            .islands
            .node_indices()
            .filter(|&index| !self.islands[index].is_persistent)
            .collect();

        let mut merged = 0;
        let mut component = Vec::new();
        for start in dirty {
            if self.islands[start].counter == counter {
                continue;
            }

            component.clear();
            component.push(start);
            self.islands[start].counter = counter;

            let mut cursor = 0;
            while cursor < component.len() {
                let current = component[cursor];
                cursor += 1;
                let children: Vec<NodeIndex> = self.islands.neighbors(current).collect();
                for child in children {
                    if self.islands[child].counter != counter {
                        self.islands[child].counter = counter;
                        component.push(child);
                    }
                }
            }

            if component.len() < 2 {
                continue;
            }

            let Some(root) = component.iter().copied().min() else {
                continue;
            };
            let root_id = IslandId::from_index(root);

            let mut num_nodes = 0;
            let mut num_edges = 0;
            let mut is_sleeping = true;
            for &index in &component {
                let island = &mut self.islands[index];
                num_nodes += island.num_nodes;
                num_edges += island.num_edges;
                is_sleeping &= island.is_sleeping;
                island.parent = root_id;
                if index != root {
                    island.num_nodes = 0;
                    island.num_edges = 0;
                    merged += 1;
                }
            }

            let root_island = &mut self.islands[root];
            root_island.num_nodes = num_nodes;
            root_island.num_edges = num_edges;
            root_island.is_sleeping = is_sleeping;
            root_island.is_persistent = false;
        }

        self.islands.clear_edges();
        self.reassign_islands();

        let empty: Vec<NodeIndex> = self
            .islands
            .node_indices()
            .filter(|&index| self.islands[index].num_nodes == 0)
            .collect();
        for index in &empty {
            self.islands.remove_node(*index);
        }

        if merged > 0 || !empty.is_empty() {
            debug!(
                "merged {merged} islands, erased {} empty islands, {} remaining",
                empty.len(),
                self.islands.node_count()
            );
        }
    }

    /// Rewrite every node and edge island to its resolved root.
    fn reassign_islands(&mut self) {
        let islands = &self.islands;
        let resolve = |id: Option<IslandId>| {
            id.map(|id| {
                islands
                    .node_weight(id.index())
                    .map_or(id, |island| island.parent)
            })
        };

        for node in self.graph.node_weights_mut() {
            node.island = resolve(node.island);
        }
        for edge in self.graph.edge_weights_mut() {
            edge.island = resolve(edge.island);
        }

        for index in self.islands.node_indices().collect::<Vec<_>>() {
            self.islands[index].parent = IslandId::from_index(index);
        }
    }

    /// Rediscover the connected components of every dirty awake island.
    ///
    /// Sleeping and persistent islands are skipped entirely. Invalid nodes end
    /// a traversal without propagating it, so a static body shared by several
    /// islands does not merge them.
    pub fn split_islands(&mut self) {
        let dirty: HashSet<IslandId> = self
            .islands
            .node_indices()
            .filter(|&index| {
                let island = &self.islands[index];
                !island.is_persistent && !island.is_sleeping
            })
            .map(IslandId::from_index)
            .collect();

        if dirty.is_empty() {
            return;
        }

        for id in &dirty {
            let island = &mut self.islands[id.index()];
            island.num_nodes = 0;
            island.num_edges = 0;
        }

        let counter = self.next_counter();
        let mut reused = HashSet::with_capacity(dirty.len());
        let mut created = 0;
        let seeds: Vec<NodeIndex> = self.graph.node_indices().collect();
        for seed in seeds {
            let node = &self.graph[seed];
            if !node.is_valid() || node.counter == counter {
                continue;
            }
            let Some(old) = node.island.filter(|id| dirty.contains(id)) else {
                continue;
            };

            // The first component found keeps the old index.
            let island = if reused.insert(old) {
                old
            } else {
                created += 1;
                self.new_island()
            };
            self.split_island(seed, island, counter);
        }

        for id in &dirty {
            if self.islands[id.index()].num_nodes == 0 {
                self.islands.remove_node(id.index());
            }
        }

        trace!(
            "split {} dirty islands into {} islands",
            dirty.len(),
            reused.len() + created
        );
    }

    /// Breadth-first flood of `island` from `seed` through valid nodes.
    fn split_island(&mut self, seed: NodeIndex, island: IslandId, counter: u32) {
        let mut num_nodes = 0;
        let mut num_edges = 0;
        let mut queue = VecDeque::from([seed]);
        self.graph[seed].counter = counter;

        while let Some(current) = queue.pop_front() {
            self.graph[current].island = Some(island);
            num_nodes += 1;

            for edge_index in self.incident_edges(current) {
                let edge = &mut self.graph[edge_index];
                if edge.counter == counter {
                    continue;
                }
                edge.counter = counter;
                edge.island = Some(island);
                num_edges += 1;

                if let Some(other) = edge.other_node(current) {
                    let other_node = &mut self.graph[other];
                    if other_node.is_valid() && other_node.counter != counter {
                        other_node.counter = counter;
                        queue.push_back(other);
                    }
                }
            }
        }

        let island = &mut self.islands[island.index()];
        island.num_nodes += num_nodes;
        island.num_edges += num_edges;
    }

    /// Settle the graph: merge, assign loose nodes, refresh sleep flags, split.
    pub fn update_graph(&mut self) {
        self.merge_islands();

        let loose: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&index| {
                let node = &self.graph[index];
                node.is_valid() && node.island.is_none()
            })
            .collect();
        for index in loose {
            let island = self.new_island();
            self.graph[index].island = Some(island);
            self.islands[island.index()].num_nodes = 1;
        }

        // A body that lost all its support has to wake up.
        let mut woken = Vec::new();
        for node in self.graph.node_weights_mut() {
            if node.flags.lost_edges() {
                node.flags.set_lost_edges(false);
                woken.extend(node.island);
            }
        }

        // One kinematic body may touch several islands, so the check is per edge.
        for edge in self.graph.edge_weights() {
            let moving_anchor = edge.nodes().into_iter().flatten().any(|node| {
                let node = &self.graph[node];
                !node.is_valid() && !node.is_stationary()
            });
            if moving_anchor {
                woken.extend(edge.island);
            }
        }

        for id in woken {
            if let Some(island) = self.islands.node_weight_mut(id.index()) {
                if island.is_sleeping {
                    trace!("waking {id}");
                    island.is_sleeping = false;
                }
            }
        }

        self.split_islands();
    }

    /// Mark every awake island persistent once its state has been consumed.
    ///
    /// Islands changed while sleeping stay dirty so they split when woken.
    pub fn settle_islands(&mut self) {
        for island in self.islands.node_weights_mut() {
            if !island.is_sleeping {
                island.is_persistent = true;
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get the number of islands.
    pub fn island_count(&self) -> usize {
        self.islands.node_count()
    }

    /// Get the upper bound on node indices (max index + 1).
    pub fn node_bound(&self) -> usize {
        self.graph.node_bound()
    }

    /// Node index of a body item.
    pub fn node_index(&self, item: &N) -> Option<NodeIndex> {
        self.node_items.get(item).copied()
    }

    /// Edge index of a constraint item.
    pub fn edge_index(&self, item: &E) -> Option<EdgeIndex> {
        self.edge_items.get(item).copied()
    }

    /// Get a node by index.
    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode<N>> {
        self.graph.node_weight(index)
    }

    /// Get an edge by index.
    pub fn edge(&self, index: EdgeIndex) -> Option<&GraphEdge<E>> {
        self.graph.edge_weight(index)
    }

    /// Get an island by id.
    pub fn island(&self, id: IslandId) -> Option<&GraphIsland> {
        self.islands.node_weight(id.index())
    }

    /// Get an island by id, mutably.
    pub fn island_mut(&mut self, id: IslandId) -> Option<&mut GraphIsland> {
        self.islands.node_weight_mut(id.index())
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode<N>)> {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    /// Iterate over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &GraphEdge<E>)> {
        self.graph
            .edge_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    /// Iterate over all islands in index order.
    pub fn islands(&self) -> impl Iterator<Item = (IslandId, &GraphIsland)> {
        self.islands
            .node_indices()
            .map(move |index| (IslandId::from_index(index), &self.islands[index]))
    }

    /// Edges touching a node.
    pub fn incident_edges(&self, index: NodeIndex) -> Vec<EdgeIndex> {
        if !self.graph.contains_node(index) {
            return Vec::new();
        }
        self.graph.edges(index).map(|edge| edge.id()).collect()
    }

    /// Valid nodes owned by an island.
    pub fn island_nodes(&self, id: IslandId) -> Vec<NodeIndex> {
        self.nodes()
            .filter(|(_, node)| node.is_valid() && node.island == Some(id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Edges owned by an island.
    pub fn island_edges(&self, id: IslandId) -> Vec<EdgeIndex> {
        self.edges()
            .filter(|(_, edge)| edge.island == Some(id))
            .map(|(index, _)| index)
            .collect()
    }

    fn is_valid_node(&self, index: Option<NodeIndex>) -> bool {
        index
            .and_then(|index| self.graph.node_weight(index))
            .is_some_and(GraphNode::is_valid)
    }

    /// Advance the traversal generation, resetting every stamp on wraparound.
    pub(crate) fn next_counter(&mut self) -> u32 {
        if self.graph_counter == u32::MAX {
            for node in self.graph.node_weights_mut() {
                node.counter = 0;
            }
            for edge in self.graph.edge_weights_mut() {
                edge.counter = 0;
            }
            for island in self.islands.node_weights_mut() {
                island.counter = 0;
            }
            self.graph_counter = 0;
        }
        self.graph_counter += 1;
        self.graph_counter
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Check the island invariants of a settled graph.
    ///
    /// # Panics
    ///
    /// Panics if a valid node has no island, an edge is not owned by the island
    /// of one of its valid endpoints, or island counts disagree with the
    /// actual membership.
    pub fn validate(&self) {
        let mut num_nodes: HashMap<IslandId, u32> = HashMap::new();
        let mut num_edges: HashMap<IslandId, u32> = HashMap::new();

        for (index, node) in self.nodes() {
            if !node.is_valid() {
                assert!(node.island.is_none(), "invalid node {index:?} owns an island");
                continue;
            }
            let island = node
                .island
                .unwrap_or_else(|| panic!("valid node {index:?} has no island"));
            assert!(self.island(island).is_some(), "node {index:?} points at missing {island}");
            *num_nodes.entry(island).or_default() += 1;
        }

        for (index, edge) in self.edges() {
            let island = edge
                .island
                .unwrap_or_else(|| panic!("edge {index:?} has no island"));
            let owned = edge
                .nodes()
                .into_iter()
                .flatten()
                .any(|node| self.graph[node].is_valid() && self.graph[node].island == Some(island));
            assert!(owned, "edge {index:?} is not owned by an endpoint island");
            *num_edges.entry(island).or_default() += 1;
        }

        for (id, island) in self.islands() {
            assert_eq!(island.num_nodes, num_nodes.get(&id).copied().unwrap_or(0), "{id} node count");
            assert_eq!(island.num_edges, num_edges.get(&id).copied().unwrap_or(0), "{id} edge count");
        }
    }

    /// Clear all nodes, edges and islands.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.islands.clear();
        self.node_items.clear();
        self.edge_items.clear();
        self.graph_counter = 0;
    }
}

impl<N, E> Default for IslandGraph<N, E>
where
    N: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
