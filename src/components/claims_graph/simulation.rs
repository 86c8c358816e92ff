use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::forces::{self, Body};
use super::scale::node_radius;
use crate::config::LayoutConfig;
use crate::network::{Graph, NodeId};

/// Layout state of one graph pass.
///
/// Positions and pins live in the force graph, keyed by slot (the node's
/// index in [`Graph::nodes`]); the derived graph itself is never mutated.
pub struct Simulation {
	graph: ForceGraph<usize, ()>,
	slots: HashMap<NodeId, usize>,
	radii: Vec<f64>,
	links: Vec<(usize, usize)>,
	layout: LayoutConfig,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	running: bool,
}

impl Simulation {
	pub fn new(data: &Graph, layout: &LayoutConfig, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: layout.charge_strength,
			force_spring: layout.spring_strength,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: layout.damping,
		});
		let (cx, cy) = (width / 2.0, height / 2.0);
		let mut slots = HashMap::with_capacity(data.nodes.len());
		let mut indices = Vec::with_capacity(data.nodes.len());

		for (slot, node) in data.nodes.iter().enumerate() {
			let angle = (slot as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (cx + 100.0 * angle.cos()) as f32,
				y: (cy + 100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: slot,
			});
			slots.insert(node.id(), slot);
			indices.push(idx);
		}

		let mut links = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) = (slots.get(&edge.source), slots.get(&edge.target)) {
				graph.add_edge(indices[src], indices[tgt], EdgeData::default());
				links.push((src, tgt));
			}
		}

		info!(
			"Simulation started: {} nodes, {} links",
			data.nodes.len(),
			links.len()
		);
		Self {
			graph,
			radii: data.nodes.iter().map(node_radius).collect(),
			slots,
			links,
			layout: layout.clone(),
			center: (cx, cy),
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
		}
	}

	/// Advances one frame unless stopped or cooled down.
	pub fn tick(&mut self, dt: f32) {
		if !self.is_active() {
			return;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.layout.alpha_decay;
		self.graph.update(dt * self.alpha as f32);

		let mut bodies = self.bodies();
		forces::link_distance(&mut bodies, &self.links, self.layout.link_distance, self.alpha);
		forces::center(
			&mut bodies,
			self.center.0,
			self.center.1,
			self.layout.center_strength,
		);
		forces::collide(&mut bodies, self.layout.collision_margin);
		self.graph.visit_nodes_mut(|node| {
			let body = &bodies[node.data.user_data];
			if !node.data.is_anchor {
				node.data.x = body.x as f32;
				node.data.y = body.y as f32;
			}
		});
	}

	fn bodies(&self) -> Vec<Body> {
		let mut bodies = vec![Body::default(); self.radii.len()];
		self.graph.visit_nodes(|node| {
			let slot = node.data.user_data;
			bodies[slot] = Body {
				x: node.x() as f64,
				y: node.y() as f64,
				radius: self.radii[slot],
				pinned: node.data.is_anchor,
			};
		});
		bodies
	}

	/// Whether ticks still move nodes.
	pub fn is_active(&self) -> bool {
		let min = self.layout.alpha_min;
		self.running && (self.alpha >= min || self.alpha_target >= min)
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Ends the simulation; later ticks are no-ops.
	pub fn stop(&mut self) {
		if self.running {
			self.running = false;
			info!("Simulation stopped");
		}
	}

	/// Pins a node and reheats the layout.
	pub fn drag_start(&mut self, id: &NodeId) {
		if self.set_pin(id, None, true) {
			self.alpha_target = self.layout.drag_alpha_target;
		}
	}

	/// Moves a pinned node to graph coordinates.
	pub fn drag_to(&mut self, id: &NodeId, x: f64, y: f64) {
		self.set_pin(id, Some((x, y)), true);
	}

	/// Releases the pin and lets the layout cool.
	pub fn drag_end(&mut self, id: &NodeId) {
		self.set_pin(id, None, false);
		self.alpha_target = 0.0;
	}

	fn set_pin(&mut self, id: &NodeId, at: Option<(f64, f64)>, pinned: bool) -> bool {
		let Some(&slot) = self.slots.get(id) else {
			return false;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data == slot {
				node.data.is_anchor = pinned;
				if let Some((x, y)) = at {
					node.data.x = x as f32;
					node.data.y = y as f32;
				}
			}
		});
		true
	}

	#[cfg(test)]
	pub fn is_pinned(&self, id: &NodeId) -> bool {
		let Some(&slot) = self.slots.get(id) else {
			return false;
		};
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.data.user_data == slot {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	/// Position of a node in graph coordinates.
	pub fn position(&self, id: &NodeId) -> Option<(f64, f64)> {
		let &slot = self.slots.get(id)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data == slot {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Slot of the topmost node covering a graph-space point.
	pub fn node_at(&self, gx: f64, gy: f64) -> Option<usize> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let slot = node.data.user_data;
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// at least 6 units so tiny claims stay clickable
			if (dx * dx + dy * dy).sqrt() < self.radii[slot].max(6.0) {
				found = Some(slot);
			}
		});
		found
	}

	/// Moves the centering target, e.g. after a resize.
	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	/// Calls `f(slot, x, y)` for every node.
	pub fn visit_nodes(&self, mut f: impl FnMut(usize, f64, f64)) {
		self.graph
			.visit_nodes(|node| f(node.data.user_data, node.x() as f64, node.y() as f64));
	}

	/// Calls `f((slot, x, y), (slot, x, y))` for every link.
	pub fn visit_links(&self, mut f: impl FnMut((usize, f64, f64), (usize, f64, f64))) {
		self.graph.visit_edges(|n1, n2, _| {
			f(
				(n1.data.user_data, n1.x() as f64, n1.y() as f64),
				(n2.data.user_data, n2.x() as f64, n2.y() as f64),
			)
		});
	}

	/// Radius of the node in `slot`.
	pub fn radius(&self, slot: usize) -> f64 {
		self.radii[slot]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::{ClaimRecord, build_graph};

	fn graph() -> Graph {
		let claims: Vec<ClaimRecord> = (0..6)
			.map(|i| {
				let mut record = ClaimRecord {
					primary_key: format!("C{i}"),
					..Default::default()
				};
				record.properties.policyholder_id = Some(format!("PH_{}", i % 2));
				record.properties.claim_amount = Some(1000.0 * i as f64);
				record
			})
			.collect();
		build_graph(&claims)
	}

	fn positions(sim: &Simulation, data: &Graph) -> Vec<(f64, f64)> {
		data.nodes
			.iter()
			.map(|n| sim.position(&n.id()).unwrap())
			.collect()
	}

	#[test]
	fn every_node_gets_a_position() {
		let data = graph();
		let sim = Simulation::new(&data, &LayoutConfig::default(), 800.0, 600.0);
		assert_eq!(positions(&sim, &data).len(), data.nodes.len());
		assert_eq!(sim.position(&NodeId::claim("missing")), None);
	}

	#[test]
	fn ticks_move_nodes_until_stopped() {
		let data = graph();
		let mut sim = Simulation::new(&data, &LayoutConfig::default(), 800.0, 600.0);
		let start = positions(&sim, &data);
		sim.tick(0.016);
		let moved = positions(&sim, &data);
		assert_ne!(start, moved);

		sim.stop();
		assert!(!sim.is_active());
		sim.tick(0.016);
		assert_eq!(positions(&sim, &data), moved);
	}

	#[test]
	fn layout_cools_down() {
		let data = graph();
		let mut sim = Simulation::new(&data, &LayoutConfig::default(), 800.0, 600.0);
		for _ in 0..400 {
			sim.tick(0.016);
		}
		assert!(!sim.is_active());
		let frozen = positions(&sim, &data);
		sim.tick(0.016);
		assert_eq!(positions(&sim, &data), frozen);
	}

	#[test]
	fn drag_reheats_and_release_unpins() {
		let data = graph();
		let mut sim = Simulation::new(&data, &LayoutConfig::default(), 800.0, 600.0);
		for _ in 0..400 {
			sim.tick(0.016);
		}
		let cold = sim.alpha();
		let id = NodeId::claim("C3");

		sim.drag_start(&id);
		assert!(sim.is_pinned(&id));
		assert!(sim.is_active());
		sim.drag_to(&id, 10.0, 20.0);
		for _ in 0..10 {
			sim.tick(0.016);
		}
		assert!(sim.alpha() > cold);
		assert_eq!(sim.position(&id), Some((10.0, 20.0)));

		sim.drag_end(&id);
		assert!(!sim.is_pinned(&id));
	}

	#[test]
	fn hit_test_uses_node_radius() {
		let data = graph();
		let sim = Simulation::new(&data, &LayoutConfig::default(), 800.0, 600.0);
		let id = NodeId::agent("AGENT_0");
		let (x, y) = sim.position(&id).unwrap();
		let slot = sim.node_at(x + 11.0, y).unwrap();
		assert_eq!(data.nodes[slot].id(), id);
		assert_eq!(sim.node_at(-5000.0, -5000.0), None);
	}
}
