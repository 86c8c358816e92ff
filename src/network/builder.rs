//! Derives the claims network from a flat claim list.

use std::rc::Rc;

use indexmap::IndexMap;

use super::agents::{AgentResolver, PlaceholderAgents};
use super::claims::ClaimRecord;
use super::graph::{ClaimNode, EdgeKind, Graph, GraphEdge, GraphNode, NodeId, PolicyholderNode};

/// Maximum number of claims drawn in one graph.
pub const DEFAULT_CLAIM_LIMIT: usize = 200;

/// Risk label given to every policyholder until real enrichment exists.
pub const DEFAULT_RISK_PROFILE: &str = "Standard";

/// Builds a [`Graph`] from claim records.
#[derive(Clone)]
pub struct GraphBuilder {
	claim_limit: usize,
	agents: Rc<dyn AgentResolver>,
}

impl Default for GraphBuilder {
	fn default() -> Self {
		Self {
			claim_limit: DEFAULT_CLAIM_LIMIT,
			agents: Rc::new(PlaceholderAgents),
		}
	}
}

impl GraphBuilder {
	/// Builder with the default limit and the placeholder agent list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Caps the number of claims taken from the input.
	pub fn with_claim_limit(mut self, claim_limit: usize) -> Self {
		self.claim_limit = claim_limit;
		self
	}

	/// Replaces the agent resolver.
	pub fn with_agent_resolver(mut self, agents: Rc<dyn AgentResolver>) -> Self {
		self.agents = agents;
		self
	}

	/// Rebuilds the whole graph. Empty input gives an empty graph.
	pub fn build(&self, claims: &[ClaimRecord]) -> Graph {
		if claims.is_empty() {
			return Graph::default();
		}
		let claims = &claims[..claims.len().min(self.claim_limit)];

		// Keyed by node id; a repeated key overwrites in place.
		let mut nodes: IndexMap<NodeId, GraphNode> = IndexMap::new();
		for record in claims {
			let node = GraphNode::Claim(claim_node(record));
			nodes.insert(node.id(), node);
		}

		let mut policyholders: IndexMap<NodeId, PolicyholderNode> = IndexMap::new();
		for record in claims {
			if let Some(ph_id) = record.policyholder_id() {
				policyholders
					.entry(NodeId::policyholder(ph_id))
					.or_insert_with(|| PolicyholderNode {
						policyholder_id: ph_id.to_string(),
						name: ph_id.to_string(),
						risk_profile: DEFAULT_RISK_PROFILE.to_string(),
					});
			}
		}

		let linkage = {
			let refs: Vec<&PolicyholderNode> = policyholders.values().collect();
			self.agents.resolve(&refs)
		};

		for (id, ph) in policyholders {
			nodes.insert(id, GraphNode::Policyholder(ph));
		}
		for agent in linkage.agents {
			let node = GraphNode::Agent(agent);
			nodes.insert(node.id(), node);
		}

		let mut edges = Vec::new();
		for node in nodes.values() {
			let GraphNode::Claim(claim) = node else {
				continue;
			};
			let Some(ph_id) = claim.policyholder_id.as_deref() else {
				continue;
			};
			let target = NodeId::policyholder(ph_id);
			if nodes.contains_key(&target) {
				edges.push(GraphEdge {
					source: node.id(),
					target,
					kind: EdgeKind::ClaimPolicyholder,
				});
			}
		}
		for (ph_id, agent_id) in &linkage.links {
			let (source, target) = (NodeId::policyholder(ph_id), NodeId::agent(agent_id));
			if nodes.contains_key(&source) && nodes.contains_key(&target) {
				edges.push(GraphEdge {
					source,
					target,
					kind: EdgeKind::PolicyholderAgent,
				});
			}
		}

		Graph {
			nodes: nodes.into_values().collect(),
			edges,
		}
	}
}

/// Builds with [`GraphBuilder::default`].
pub fn build_graph(claims: &[ClaimRecord]) -> Graph {
	GraphBuilder::default().build(claims)
}

fn claim_node(record: &ClaimRecord) -> ClaimNode {
	let props = &record.properties;
	ClaimNode {
		primary_key: record.primary_key.clone(),
		claim_id: props
			.claim_id
			.clone()
			.unwrap_or_else(|| record.primary_key.clone()),
		amount: record.amount(),
		anomaly_score: record.anomaly_score(),
		status: props.status.clone(),
		policyholder_id: record.policyholder_id().map(str::to_string),
		claim_type: props.claim_type.clone(),
		claim_date: props.claim_date.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::agents::AgentLinkage;
	use crate::network::graph::{AgentNode, NodeKind};

	fn claim(pk: &str, ph: Option<&str>) -> ClaimRecord {
		let mut record = ClaimRecord {
			primary_key: pk.into(),
			..Default::default()
		};
		record.properties.policyholder_id = ph.map(Into::into);
		record
	}

	#[test]
	fn empty_input_builds_empty_graph() {
		let graph = build_graph(&[]);
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn nodes_come_in_derivation_order() {
		let graph = build_graph(&[claim("C1", Some("PH_1")), claim("C2", Some("PH_0"))]);
		let ids: Vec<String> = graph.nodes.iter().map(|n| n.id().to_string()).collect();
		assert_eq!(
			ids,
			[
				"claim-C1",
				"claim-C2",
				"ph-PH_1",
				"ph-PH_0",
				"agent-AGENT_0",
				"agent-AGENT_1",
				"agent-AGENT_2"
			]
		);
	}

	#[test]
	fn policyholder_placeholder_enrichment() {
		let graph = build_graph(&[claim("C1", Some("PH_9"))]);
		let Some(GraphNode::Policyholder(ph)) = graph.node(&NodeId::policyholder("PH_9")) else {
			panic!("policyholder node missing");
		};
		assert_eq!(ph.name, "PH_9");
		assert_eq!(ph.risk_profile, DEFAULT_RISK_PROFILE);
	}

	#[test]
	fn claim_without_policyholder_has_no_edge() {
		let graph = build_graph(&[claim("C1", None), claim("C2", Some("PH_0"))]);
		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].source, NodeId::claim("C2"));
		assert_eq!(graph.count(NodeKind::Policyholder), 1);
	}

	#[test]
	fn duplicate_primary_key_keeps_last_record() {
		let mut first = claim("C1", Some("PH_0"));
		first.properties.claim_amount = Some(10.0);
		let mut second = claim("C1", Some("PH_0"));
		second.properties.claim_amount = Some(20.0);
		let graph = build_graph(&[first, second]);
		assert_eq!(graph.count(NodeKind::Claim), 1);
		let Some(GraphNode::Claim(c)) = graph.node(&NodeId::claim("C1")) else {
			panic!("claim node missing");
		};
		assert_eq!(c.amount, 20.0);
		assert_eq!(graph.edges.len(), 1);
	}

	#[test]
	fn claim_id_falls_back_to_primary_key() {
		let graph = build_graph(&[claim("C1", None)]);
		assert_eq!(graph.nodes[0].label(), "C1");
	}

	#[test]
	fn limit_is_configurable() {
		let claims: Vec<_> = (0..10).map(|i| claim(&format!("C{i}"), None)).collect();
		let graph = GraphBuilder::new().with_claim_limit(4).build(&claims);
		assert_eq!(graph.count(NodeKind::Claim), 4);
		assert!(graph.node(&NodeId::claim("C4")).is_none());
	}

	struct OneAgent;

	impl AgentResolver for OneAgent {
		fn resolve(&self, policyholders: &[&PolicyholderNode]) -> AgentLinkage {
			AgentLinkage {
				agents: vec![AgentNode {
					agent_id: "AGENT_7".into(),
					name: "Agent 8".into(),
				}],
				links: policyholders
					.iter()
					.map(|p| (p.policyholder_id.clone(), "AGENT_7".to_string()))
					.chain([("PH_missing".to_string(), "AGENT_7".to_string())])
					.collect(),
			}
		}
	}

	#[test]
	fn custom_resolver_links_policyholders() {
		let graph = GraphBuilder::new()
			.with_agent_resolver(Rc::new(OneAgent))
			.build(&[claim("C1", Some("PH_0")), claim("C2", Some("PH_1"))]);
		assert_eq!(graph.count(NodeKind::Agent), 1);
		let agent_edges: Vec<_> = graph
			.edges
			.iter()
			.filter(|e| e.kind == EdgeKind::PolicyholderAgent)
			.collect();
		assert_eq!(agent_edges.len(), 2);
		assert!(agent_edges.iter().all(|e| e.target == NodeId::agent("AGENT_7")));
	}
}
