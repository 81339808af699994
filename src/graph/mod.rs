//! Island graph data structures and operations.
//!
//! Bodies are nodes, constraints are edges and islands are the connected
//! components of valid nodes. Storage is built on petgraph's StableGraph so
//! node and edge indices stay stable while other items are removed.

mod coloring;
mod edge;
mod island;
mod island_graph;
mod levels;
mod node;

pub use edge::{ContainerId, GraphEdge};
pub use island::{GraphIsland, IslandId};
pub use island_graph::IslandGraph;
pub use node::{GraphNode, NodeFlags};
pub use petgraph::stable_graph::{EdgeIndex, NodeIndex};
