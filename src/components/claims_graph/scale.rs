//! Size and color encoding of nodes.

use crate::network::GraphNode;

/// Claim radius at amount 0.
pub const CLAIM_BASE_RADIUS: f64 = 4.0;
/// sqrt(amount) is divided by this to get the claim radius increment.
pub const CLAIM_RADIUS_DIVISOR: f64 = 10.0;
/// Policyholder radius.
pub const POLICYHOLDER_RADIUS: f64 = 8.0;
/// Agent radius.
pub const AGENT_RADIUS: f64 = 12.0;

/// Anomaly scores strictly above this are high.
pub const HIGH_ANOMALY: f64 = 70.0;
/// Anomaly scores strictly above this (and not high) are medium.
pub const MEDIUM_ANOMALY: f64 = 40.0;

/// Risk label that marks a policyholder as risky.
pub const HIGH_RISK_PROFILE: &str = "High Risk";

/// Red.
pub const HIGH_COLOR: &str = "#e74c3c";
/// Amber.
pub const MEDIUM_COLOR: &str = "#f39c12";
/// Green.
pub const LOW_COLOR: &str = "#27ae60";
/// Purple.
pub const AGENT_COLOR: &str = "#8e44ad";

/// Anomaly bucket of a claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnomalyLevel {
	/// score > 70
	High,
	/// 40 < score <= 70
	Medium,
	/// score <= 40
	Low,
}

impl AnomalyLevel {
	/// Buckets a score.
	pub fn from_score(score: f64) -> Self {
		if score > HIGH_ANOMALY {
			Self::High
		} else if score > MEDIUM_ANOMALY {
			Self::Medium
		} else {
			Self::Low
		}
	}

	/// Fill color of the bucket.
	pub fn color(self) -> &'static str {
		match self {
			Self::High => HIGH_COLOR,
			Self::Medium => MEDIUM_COLOR,
			Self::Low => LOW_COLOR,
		}
	}
}

/// Radius in graph units. Claim area grows roughly linearly with amount.
pub fn node_radius(node: &GraphNode) -> f64 {
	match node {
		GraphNode::Claim(c) => CLAIM_BASE_RADIUS + c.amount.max(0.0).sqrt() / CLAIM_RADIUS_DIVISOR,
		GraphNode::Policyholder(_) => POLICYHOLDER_RADIUS,
		GraphNode::Agent(_) => AGENT_RADIUS,
	}
}

/// Fill color.
pub fn node_color(node: &GraphNode) -> &'static str {
	match node {
		GraphNode::Claim(c) => AnomalyLevel::from_score(c.anomaly_score).color(),
		GraphNode::Policyholder(p) if p.risk_profile == HIGH_RISK_PROFILE => MEDIUM_COLOR,
		GraphNode::Policyholder(_) => LOW_COLOR,
		GraphNode::Agent(_) => AGENT_COLOR,
	}
}

/// `(label, color)` pairs explaining the encoding.
pub const LEGEND: &[(&str, &str)] = &[
	("Claim, anomaly > 70", HIGH_COLOR),
	("Claim, anomaly > 40", MEDIUM_COLOR),
	("Claim, anomaly <= 40", LOW_COLOR),
	("High risk policyholder", MEDIUM_COLOR),
	("Policyholder", LOW_COLOR),
	("Agent", AGENT_COLOR),
];
