use std::collections::HashSet;

use log::info;

use super::simulation::Simulation;
use super::tooltip::{TooltipData, tooltip_text};
use crate::config::WidgetConfig;
use crate::network::{ClaimRecord, Graph, GraphBuilder, GraphNode, NodeId};

/// Pointer travel, in screen pixels, beyond which a press becomes a drag.
pub const CLICK_TOLERANCE: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

/// Everything one rendering pass owns: the derived graph, its simulation and
/// the gesture state of the canvas.
pub struct ClaimsGraphState {
	pub graph: Graph,
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	ids: Vec<NodeId>,
}

impl ClaimsGraphState {
	/// Builds the graph with `builder` and starts its simulation.
	///
	/// Returns `None` without creating a simulation when there are no claims.
	pub fn prepare(
		claims: &[ClaimRecord],
		builder: &GraphBuilder,
		config: &WidgetConfig,
		width: f64,
		height: f64,
	) -> Option<Self> {
		if claims.is_empty() {
			info!("No claims supplied, showing placeholder");
			return None;
		}
		let graph = builder.build(claims);
		info!(
			"Graph rebuilt: {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		Some(Self::new(graph, config, width, height))
	}

	pub fn new(graph: Graph, config: &WidgetConfig, width: f64, height: f64) -> Self {
		let simulation = Simulation::new(&graph, &config.layout, width, height);
		Self {
			ids: graph.nodes.iter().map(GraphNode::id).collect(),
			graph,
			simulation,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.simulation.node_at(gx, gy)
	}

	pub fn node(&self, slot: usize) -> Option<&GraphNode> {
		self.graph.nodes.get(slot)
	}

	/// Press on the canvas: grabs a node or starts panning.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(slot) = self.node_at_position(x, y) {
			let id = self.ids[slot].clone();
			let (nx, ny) = self.simulation.position(&id).unwrap_or_default();
			self.drag = DragState {
				active: true,
				node: Some(slot),
				moved: false,
				start_x: x,
				start_y: y,
				node_start_x: nx,
				node_start_y: ny,
			};
			self.simulation.drag_start(&id);
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Pointer motion: hover, drag or pan. Returns the tooltip to show.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<TooltipData> {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if let Some(slot) = self.drag.node {
				let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
				if (dx * dx + dy * dy).sqrt() > CLICK_TOLERANCE {
					self.drag.moved = true;
				}
				let (nx, ny) = (
					self.drag.node_start_x + dx / self.transform.k,
					self.drag.node_start_y + dy / self.transform.k,
				);
				let id = self.ids[slot].clone();
				self.simulation.drag_to(&id, nx, ny);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}

		self.hover.node.and_then(|slot| {
			self.node(slot).map(|node| TooltipData {
				text: tooltip_text(node),
				x,
				y,
			})
		})
	}

	/// Release: ends any drag or pan. Returns the clicked node when the
	/// pointer went down and up on a node without dragging it.
	pub fn pointer_up(&mut self) -> Option<&GraphNode> {
		let clicked = match (self.drag.active, self.drag.node) {
			(true, Some(slot)) => {
				let id = self.ids[slot].clone();
				self.simulation.drag_end(&id);
				(!self.drag.moved).then_some(slot)
			}
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked.and_then(|slot| self.node(slot))
	}

	/// Pointer left the canvas.
	pub fn pointer_leave(&mut self) {
		if let (true, Some(slot)) = (self.drag.active, self.drag.node) {
			let id = self.ids[slot].clone();
			self.simulation.drag_end(&id);
		}
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Zooms by `factor` around a screen point.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(slot) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for neighbor in self.graph.neighbors(&self.ids[slot]) {
				if let Some(n) = self.ids.iter().position(|id| *id == neighbor) {
					self.hover.neighbors.insert(n);
				}
			}
		}
	}

	pub fn is_highlighted(&self, slot: usize) -> bool {
		self.hover.node == Some(slot)
			|| self.hover.neighbors.contains(&slot)
			|| self.hover.prev_node == Some(slot)
			|| self.hover.prev_neighbors.contains(&slot)
	}

	pub fn is_hovered(&self, slot: usize) -> bool {
		self.hover.node == Some(slot) || self.hover.prev_node == Some(slot)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.simulation.tick(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.set_center(width / 2.0, height / 2.0);
	}

	/// Stops the simulation for good.
	pub fn stop(&mut self) {
		self.simulation.stop();
	}
}
