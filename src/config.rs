//! Deployment tuning read once at startup.

use log::warn;
use serde::Deserialize;

use crate::network::builder::DEFAULT_CLAIM_LIMIT;

/// Element id of the optional inline JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "widget-config";

/// Widget configuration. Every field has a default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
	/// Maximum number of claims drawn.
	pub claim_limit: usize,
	/// Force simulation constants.
	pub layout: LayoutConfig,
	/// Origin of the embedding dashboard. When unset, the first message from
	/// the parent frame fixes it.
	pub host_origin: Option<String>,
}

impl Default for WidgetConfig {
	fn default() -> Self {
		Self {
			claim_limit: DEFAULT_CLAIM_LIMIT,
			layout: LayoutConfig::default(),
			host_origin: None,
		}
	}
}

/// Force and cooling constants of the layout simulation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body repulsion.
	pub charge_strength: f32,
	/// Spring attraction along links.
	pub spring_strength: f32,
	/// Pull of the node centroid toward the viewport midpoint, 0..=1.
	pub center_strength: f64,
	/// Gap kept between node circles.
	pub collision_margin: f64,
	/// Temperature below which the layout freezes.
	pub alpha_min: f64,
	/// Fraction of the distance to the target temperature covered per tick.
	pub alpha_decay: f64,
	/// Target temperature while a node is dragged.
	pub drag_alpha_target: f64,
	/// Velocity damping per step.
	pub damping: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 60.0,
			charge_strength: 200.0,
			spring_strength: 0.05,
			center_strength: 1.0,
			collision_margin: 2.0,
			alpha_min,
			// cools from 1 to alpha_min in ~300 ticks
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
			damping: 0.9,
		}
	}
}

impl WidgetConfig {
	/// Parses a JSON config, falling back to defaults on error.
	pub fn from_json(json: &str) -> Self {
		serde_json::from_str(json).unwrap_or_else(|e| {
			warn!("Ignoring malformed widget config: {e}");
			Self::default()
		})
	}

	/// Reads the inline `<script id="widget-config">` block of the page.
	pub fn from_document() -> Self {
		web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content())
			.map(|json| Self::from_json(&json))
			.unwrap_or_default()
	}
}
