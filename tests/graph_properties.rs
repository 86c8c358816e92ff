use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use claims_network::host::{
	EventHandlers, FlagSuspiciousPayload, InvestigateClusterPayload, LocalHost, WidgetEvent,
};
use claims_network::network::{ClaimRecord, EdgeKind, GraphNode, NodeId, NodeKind, build_graph};

fn claims(n: usize, policyholders: usize) -> Vec<ClaimRecord> {
	(0..n)
		.map(|i| {
			serde_json::from_value(serde_json::json!({
				"primaryKey": format!("CLAIM_{i}"),
				"properties": {
					"claimId": format!("CLAIM_{i}"),
					"claimAmount": 1000.0 + i as f64,
					"anomalyScore": (i % 100) as f64,
					"status": "Pending Review",
					"policyholderId": format!("PH_{}", i % policyholders),
				}
			}))
			.unwrap()
		})
		.collect()
}

#[test]
fn claim_nodes_are_capped_at_200() {
	for n in [1, 5, 199, 200, 201, 350] {
		let graph = build_graph(&claims(n, 7));
		assert_eq!(graph.count(NodeKind::Claim), n.min(200), "n = {n}");
	}
}

#[test]
fn one_policyholder_per_distinct_id_in_first_200() {
	// PH ids cycle with period 250, so records past 200 introduce new ids
	let input = claims(300, 250);
	let expected: HashSet<_> = input[..200]
		.iter()
		.filter_map(|c| c.policyholder_id())
		.collect();
	let graph = build_graph(&input);
	assert_eq!(graph.count(NodeKind::Policyholder), expected.len());
	assert!(graph.node(&NodeId::policyholder("PH_249")).is_none());
}

#[test]
fn always_three_fixed_agents() {
	for n in [1, 50, 400] {
		let graph = build_graph(&claims(n, 3));
		let agents: Vec<_> = graph
			.nodes
			.iter()
			.filter_map(|node| match node {
				GraphNode::Agent(a) => Some(a.agent_id.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(agents, ["AGENT_0", "AGENT_1", "AGENT_2"]);
	}
}

#[test]
fn edges_reference_existing_nodes() {
	let mut input = claims(220, 9);
	input[3].properties.policyholder_id = None;
	let graph = build_graph(&input);
	let ids: HashSet<NodeId> = graph.nodes.iter().map(GraphNode::id).collect();
	assert_eq!(graph.edges.len(), 199);
	for edge in &graph.edges {
		assert!(ids.contains(&edge.source) && ids.contains(&edge.target));
		assert_eq!(edge.kind, EdgeKind::ClaimPolicyholder);
	}
}

#[test]
fn agents_stay_disconnected() {
	let graph = build_graph(&claims(120, 4));
	assert!(graph.edges.iter().all(|e| e.kind != EdgeKind::PolicyholderAgent));
	assert!(graph.neighbors(&NodeId::agent("AGENT_0")).is_empty());
}

#[test]
fn empty_input_gives_empty_graph() {
	let graph = build_graph(&[]);
	assert!(graph.is_empty());
	assert!(graph.edges.is_empty());
}

#[test]
fn clicks_dispatch_to_the_right_callback() {
	let flagged = Rc::new(RefCell::new(Vec::new()));
	let investigated = Rc::new(RefCell::new(Vec::new()));
	let (flag_sink, cluster_sink) = (flagged.clone(), investigated.clone());
	let handlers = EventHandlers {
		flag_suspicious: Some(Rc::new(move |p: FlagSuspiciousPayload| {
			flag_sink.borrow_mut().push(p.claim_id)
		})),
		investigate_cluster: Some(Rc::new(move |p: InvestigateClusterPayload| {
			cluster_sink.borrow_mut().push(p.agent_id)
		})),
	};
	let graph = build_graph(&claims(2, 1));

	handlers.handle_click(graph.node(&NodeId::claim("CLAIM_1")).unwrap());
	assert_eq!(*flagged.borrow(), ["CLAIM_1"]);
	assert!(investigated.borrow().is_empty());

	handlers.handle_click(graph.node(&NodeId::agent("AGENT_2")).unwrap());
	assert_eq!(*investigated.borrow(), ["AGENT_2"]);

	handlers.handle_click(graph.node(&NodeId::policyholder("PH_0")).unwrap());
	assert_eq!(flagged.borrow().len(), 1);
	assert_eq!(investigated.borrow().len(), 1);
}

#[test]
fn host_receives_emitted_events() {
	let host = Rc::new(LocalHost::new(claims(1, 1)));
	let handlers = EventHandlers::from_host(host.clone());
	let graph = build_graph(&claims(1, 1));
	handlers.handle_click(graph.node(&NodeId::claim("CLAIM_0")).unwrap());
	assert_eq!(
		host.emitted(),
		[WidgetEvent::FlagSuspicious(FlagSuspiciousPayload {
			claim_id: "CLAIM_0".into()
		})]
	);
}
