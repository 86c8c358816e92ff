//! Derived node/edge model of the claims network.

use std::fmt;

/// Stable node identifier, unique within one derived graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
	/// `claim-<primaryKey>`
	pub fn claim(primary_key: &str) -> Self {
		Self(format!("claim-{primary_key}"))
	}

	/// `ph-<policyholderId>`
	pub fn policyholder(policyholder_id: &str) -> Self {
		Self(format!("ph-{policyholder_id}"))
	}

	/// `agent-<agentId>`
	pub fn agent(agent_id: &str) -> Self {
		Self(format!("agent-{agent_id}"))
	}

	/// The raw identifier string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Discriminant of [`GraphNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// An insurance claim.
	Claim,
	/// The policyholder who filed one or more claims.
	Policyholder,
	/// An insurance agent.
	Agent,
}

/// Claim node attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimNode {
	/// Object primary key of the claim.
	pub primary_key: String,
	/// Display claim number, falls back to the primary key.
	pub claim_id: String,
	/// Claimed amount, 0 when unknown.
	pub amount: f64,
	/// Anomaly score, 0 when unknown.
	pub anomaly_score: f64,
	/// Workflow status.
	pub status: Option<String>,
	/// Policyholder the claim belongs to.
	pub policyholder_id: Option<String>,
	/// Line of business.
	pub claim_type: Option<String>,
	/// Filing date.
	pub claim_date: Option<String>,
}

/// Policyholder node attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyholderNode {
	/// Policyholder identifier.
	pub policyholder_id: String,
	/// Display name.
	pub name: String,
	/// Risk label, "High Risk" or "Standard".
	pub risk_profile: String,
}

/// Agent node attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentNode {
	/// Agent identifier, e.g. `AGENT_0`.
	pub agent_id: String,
	/// Display name.
	pub name: String,
}

/// A node of the claims network.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphNode {
	/// See [`ClaimNode`].
	Claim(ClaimNode),
	/// See [`PolicyholderNode`].
	Policyholder(PolicyholderNode),
	/// See [`AgentNode`].
	Agent(AgentNode),
}

impl GraphNode {
	/// Identifier derived from the node's identity field.
	pub fn id(&self) -> NodeId {
		match self {
			Self::Claim(c) => NodeId::claim(&c.primary_key),
			Self::Policyholder(p) => NodeId::policyholder(&p.policyholder_id),
			Self::Agent(a) => NodeId::agent(&a.agent_id),
		}
	}

	/// Node kind.
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Claim(_) => NodeKind::Claim,
			Self::Policyholder(_) => NodeKind::Policyholder,
			Self::Agent(_) => NodeKind::Agent,
		}
	}

	/// Short text drawn next to the node.
	pub fn label(&self) -> &str {
		match self {
			Self::Claim(c) => &c.claim_id,
			Self::Policyholder(p) => &p.name,
			Self::Agent(a) => &a.name,
		}
	}
}

/// Relationship kind of a [`GraphEdge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	/// Claim filed by a policyholder.
	ClaimPolicyholder,
	/// Policyholder served by an agent.
	PolicyholderAgent,
}

/// Unordered link between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	/// One endpoint.
	pub source: NodeId,
	/// The other endpoint.
	pub target: NodeId,
	/// Relationship kind.
	pub kind: EdgeKind,
}

/// Nodes and edges derived from one claim list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// Nodes in derivation order: claims, policyholders, agents.
	pub nodes: Vec<GraphNode>,
	/// Edges whose endpoints all exist in `nodes`.
	pub edges: Vec<GraphEdge>,
}

impl Graph {
	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Looks a node up by id.
	pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| &n.id() == id)
	}

	/// Number of nodes of one kind.
	pub fn count(&self, kind: NodeKind) -> usize {
		self.nodes.iter().filter(|n| n.kind() == kind).count()
	}

	/// Ids of every node sharing an edge with `id`.
	pub fn neighbors(&self, id: &NodeId) -> Vec<NodeId> {
		self.edges
			.iter()
			.filter_map(|e| {
				if &e.source == id {
					Some(e.target.clone())
				} else if &e.target == id {
					Some(e.source.clone())
				} else {
					None
				}
			})
			.collect()
	}
}
