use leptos::prelude::*;

use crate::network::GraphNode;

/// Tooltip content and anchor in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipData {
	pub text: String,
	pub x: f64,
	pub y: f64,
}

/// Kind-specific hover text, one fact per line.
pub fn tooltip_text(node: &GraphNode) -> String {
	match node {
		GraphNode::Claim(c) => {
			let mut lines = vec![
				format!("Claim: {}", c.claim_id),
				format!("Amount: {}", format_amount(c.amount)),
				format!("Anomaly score: {:.1}", c.anomaly_score),
				format!("Status: {}", c.status.as_deref().unwrap_or("Unknown")),
			];
			if let Some(kind) = &c.claim_type {
				lines.push(format!("Type: {kind}"));
			}
			if let Some(date) = &c.claim_date {
				lines.push(format!("Filed: {date}"));
			}
			lines.join("\n")
		}
		GraphNode::Policyholder(p) => format!("Policyholder: {}\nRisk: {}", p.name, p.risk_profile),
		GraphNode::Agent(a) => format!("Agent: {}\nId: {}", a.name, a.agent_id),
	}
}

/// Whole dollars with thousands separators, e.g. `$12,345`.
pub fn format_amount(amount: f64) -> String {
	let whole = amount.round().abs() as u64;
	let digits = whole.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}
	let sign = if amount.round() < 0.0 { "-" } else { "" };
	format!("{sign}${grouped}")
}

/// Floating tooltip next to the hovered node.
#[component]
pub fn GraphTooltip(#[prop(into)] data: Signal<Option<TooltipData>>) -> impl IntoView {
	move || {
		data.get().map(|t| {
			view! {
				<div
					class="graph-tooltip"
					style=format!(
						"position: absolute; left: {}px; top: {}px; pointer-events: none; white-space: pre-line;",
						t.x + 12.0,
						t.y + 12.0,
					)
				>
					{t.text}
				</div>
			}
		})
	}
}
