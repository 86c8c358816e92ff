//! Outbound widget events and click dispatch.

use std::rc::Rc;

use log::debug;
use serde::Serialize;

use super::bridge::HostBridge;
use crate::network::GraphNode;

/// Payload of `flagSuspicious`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagSuspiciousPayload {
	/// Primary key of the clicked claim.
	pub claim_id: String,
}

/// Payload of `investigateCluster`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigateClusterPayload {
	/// Identifier of the clicked agent.
	pub agent_id: String,
}

/// Event emitted to the host, serialized as `{"event": ..., "payload": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum WidgetEvent {
	/// A claim node was clicked.
	FlagSuspicious(FlagSuspiciousPayload),
	/// An agent node was clicked.
	InvestigateCluster(InvestigateClusterPayload),
}

impl WidgetEvent {
	/// Event name as registered in the manifest.
	pub fn name(&self) -> &'static str {
		match self {
			Self::FlagSuspicious(_) => "flagSuspicious",
			Self::InvestigateCluster(_) => "investigateCluster",
		}
	}
}

/// Host callback for one event kind.
pub type EventCallback<P> = Rc<dyn Fn(P)>;

/// Event callbacks wired by the host. Unwired events are dropped.
#[derive(Clone, Default)]
pub struct EventHandlers {
	/// Called with the claim's primary key on claim click.
	pub flag_suspicious: Option<EventCallback<FlagSuspiciousPayload>>,
	/// Called with the agent id on agent click.
	pub investigate_cluster: Option<EventCallback<InvestigateClusterPayload>>,
}

impl EventHandlers {
	/// Routes both events to `host.emit`.
	pub fn from_host(host: Rc<dyn HostBridge>) -> Self {
		let flag_host = host.clone();
		Self {
			flag_suspicious: Some(Rc::new(move |p: FlagSuspiciousPayload| {
				flag_host.emit(WidgetEvent::FlagSuspicious(p))
			})),
			investigate_cluster: Some(Rc::new(move |p: InvestigateClusterPayload| {
				host.emit(WidgetEvent::InvestigateCluster(p))
			})),
		}
	}

	/// Dispatches the event bound to a node click, if any.
	///
	/// Returns the event only when a callback actually received it.
	pub fn handle_click(&self, node: &GraphNode) -> Option<WidgetEvent> {
		match node {
			GraphNode::Claim(claim) => {
				let payload = FlagSuspiciousPayload {
					claim_id: claim.primary_key.clone(),
				};
				let Some(cb) = &self.flag_suspicious else {
					debug!("flagSuspicious not wired, dropping click");
					return None;
				};
				cb(payload.clone());
				Some(WidgetEvent::FlagSuspicious(payload))
			}
			GraphNode::Agent(agent) => {
				let payload = InvestigateClusterPayload {
					agent_id: agent.agent_id.clone(),
				};
				let Some(cb) = &self.investigate_cluster else {
					debug!("investigateCluster not wired, dropping click");
					return None;
				};
				cb(payload.clone());
				Some(WidgetEvent::InvestigateCluster(payload))
			}
			GraphNode::Policyholder(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::network::{AgentNode, ClaimNode, PolicyholderNode};

	fn claim_node() -> GraphNode {
		GraphNode::Claim(ClaimNode {
			primary_key: "CLAIM_12".into(),
			claim_id: "CLAIM_12".into(),
			amount: 1000.0,
			anomaly_score: 90.0,
			status: None,
			policyholder_id: None,
			claim_type: None,
			claim_date: None,
		})
	}

	#[test]
	fn event_wire_format() {
		let event = WidgetEvent::FlagSuspicious(FlagSuspiciousPayload {
			claim_id: "CLAIM_1".into(),
		});
		assert_eq!(
			serde_json::to_value(&event).unwrap(),
			serde_json::json!({"event": "flagSuspicious", "payload": {"claimId": "CLAIM_1"}})
		);
		let event = WidgetEvent::InvestigateCluster(InvestigateClusterPayload {
			agent_id: "AGENT_2".into(),
		});
		assert_eq!(event.name(), "investigateCluster");
		assert_eq!(
			serde_json::to_value(&event).unwrap(),
			serde_json::json!({"event": "investigateCluster", "payload": {"agentId": "AGENT_2"}})
		);
	}

	#[test]
	fn unwired_handlers_are_noops() {
		let handlers = EventHandlers::default();
		assert_eq!(handlers.handle_click(&claim_node()), None);
		let agent = GraphNode::Agent(AgentNode {
			agent_id: "AGENT_0".into(),
			name: "Agent 1".into(),
		});
		assert_eq!(handlers.handle_click(&agent), None);
	}

	#[test]
	fn policyholder_click_is_inert() {
		let flagged = Rc::new(RefCell::new(0));
		let counter = flagged.clone();
		let handlers = EventHandlers {
			flag_suspicious: Some(Rc::new(move |_: FlagSuspiciousPayload| {
				*counter.borrow_mut() += 1
			})),
			investigate_cluster: None,
		};
		let ph = GraphNode::Policyholder(PolicyholderNode {
			policyholder_id: "PH_0".into(),
			name: "PH_0".into(),
			risk_profile: "Standard".into(),
		});
		assert_eq!(handlers.handle_click(&ph), None);
		assert_eq!(*flagged.borrow(), 0);
	}

	#[test]
	fn agent_click_carries_agent_id() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let handlers = EventHandlers {
			flag_suspicious: None,
			investigate_cluster: Some(Rc::new(move |p: InvestigateClusterPayload| {
				sink.borrow_mut().push(p.agent_id)
			})),
		};
		let event = handlers.handle_click(&GraphNode::Agent(AgentNode {
			agent_id: "AGENT_1".into(),
			name: "Agent 2".into(),
		}));
		assert_eq!(*seen.borrow(), ["AGENT_1"]);
		assert_eq!(event.map(|e| e.name()), Some("investigateCluster"));
		assert_eq!(handlers.handle_click(&claim_node()), None);
	}
}
