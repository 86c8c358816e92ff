//! Agent linkage extension point.

use super::graph::{AgentNode, PolicyholderNode};

/// Agents to show plus which policyholders they serve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentLinkage {
	/// Agent nodes to add to the graph.
	pub agents: Vec<AgentNode>,
	/// `(policyholder_id, agent_id)` pairs. Pairs naming an unknown
	/// policyholder or agent are dropped by the builder.
	pub links: Vec<(String, String)>,
}

/// Resolves the agents related to a set of policyholders.
pub trait AgentResolver {
	/// Agents and links for the policyholders of one graph pass.
	fn resolve(&self, policyholders: &[&PolicyholderNode]) -> AgentLinkage;
}

/// Number of agents [`PlaceholderAgents`] always reports.
pub const PLACEHOLDER_AGENT_COUNT: usize = 3;

/// Fixed watch list `AGENT_0..AGENT_2`, unlinked to any policyholder.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderAgents;

impl AgentResolver for PlaceholderAgents {
	fn resolve(&self, _policyholders: &[&PolicyholderNode]) -> AgentLinkage {
		let agents = (0..PLACEHOLDER_AGENT_COUNT)
			.map(|i| AgentNode {
				agent_id: format!("AGENT_{i}"),
				name: format!("Agent {}", i + 1),
			})
			.collect();
		AgentLinkage {
			agents,
			links: Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn placeholder_ignores_input() {
		let ph = PolicyholderNode {
			policyholder_id: "PH_0".into(),
			name: "PH_0".into(),
			risk_profile: "High Risk".into(),
		};
		let with = PlaceholderAgents.resolve(&[&ph]);
		let without = PlaceholderAgents.resolve(&[]);
		assert_eq!(with, without);
		let ids: Vec<_> = with.agents.iter().map(|a| a.agent_id.as_str()).collect();
		assert_eq!(ids, ["AGENT_0", "AGENT_1", "AGENT_2"]);
		assert_eq!(with.agents[2].name, "Agent 3");
		assert!(with.links.is_empty());
	}
}
