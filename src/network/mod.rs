//! Claims network: host input records and the graph derived from them.

pub mod agents;
pub mod builder;
pub mod claims;
pub mod graph;

pub use agents::{AgentLinkage, AgentResolver, PlaceholderAgents};
pub use builder::{GraphBuilder, build_graph};
pub use claims::{ClaimProperties, ClaimRecord};
pub use graph::{
	AgentNode, ClaimNode, EdgeKind, Graph, GraphEdge, GraphNode, NodeId, NodeKind,
	PolicyholderNode,
};
