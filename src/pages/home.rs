use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};

use crate::components::claims_graph::{ClaimsGraphCanvas, GraphLegend};
use crate::config::WidgetConfig;
use crate::host::{EventHandlers, HostBridge, LocalHost, MessageHost};
use crate::network::{ClaimProperties, ClaimRecord};

/// Claims generated when no host frames the widget.
const SAMPLE_CLAIMS: usize = 240;

const CLAIM_TYPES: [&str; 4] = ["Auto", "Home", "Health", "Liability"];

/// Sample claims with one fraud cluster, a medium band and a normal tail.
fn generate_sample_claims(n: usize) -> Vec<ClaimRecord> {
	(0..n)
		.map(|i| {
			let r = rand_simple(i);
			let (amount, score, status, policyholder) = if i < n * 3 / 10 {
				let status = ["Under Investigation", "Pending Review", "Approved"][i % 3];
				(25_000.0 + r * 50_000.0, 60.0 + r * 40.0, status, i % 3)
			} else if i < n * 6 / 10 {
				let status = ["Pending Review", "Approved", "Denied"][i % 3];
				(5_000.0 + r * 15_000.0, 20.0 + r * 30.0, status, 3 + i % 20)
			} else {
				let status = if i % 10 == 0 { "Denied" } else { "Approved" };
				(500.0 + r * 4_500.0, r * 20.0, status, 3 + i % 60)
			};
			ClaimRecord {
				primary_key: format!("CLAIM_{i}"),
				properties: ClaimProperties {
					claim_id: Some(format!("CLAIM_{i}")),
					claim_amount: Some((amount * 100.0).round() / 100.0),
					anomaly_score: Some((score * 10.0).round() / 10.0),
					status: Some(status.to_string()),
					policyholder_id: Some(format!("PH_{policyholder}")),
					claim_type: Some(CLAIM_TYPES[i % CLAIM_TYPES.len()].to_string()),
					claim_date: Some(format!("2026-{:02}-{:02}", 1 + i % 9, 1 + i % 28)),
				},
			}
		})
		.collect()
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Picks the host: the parent frame when embedded, sample data otherwise.
fn connect_host(config: &WidgetConfig, claims: RwSignal<Vec<ClaimRecord>>) -> Rc<dyn HostBridge> {
	if MessageHost::is_embedded() {
		let on_parameters = move |records: Vec<ClaimRecord>| claims.set(records);
		match MessageHost::connect(config.host_origin.clone(), on_parameters) {
			Ok(host) => return host,
			Err(e) => warn!("Host bridge unavailable, running standalone: {e}"),
		}
	}
	info!("Running standalone with {SAMPLE_CLAIMS} sample claims");
	Rc::new(LocalHost::new(generate_sample_claims(SAMPLE_CLAIMS)))
}

/// Claims network dashboard page
#[component]
pub fn Home() -> impl IntoView {
	let config = WidgetConfig::from_document();
	let claims = RwSignal::new(Vec::<ClaimRecord>::new());
	let host = connect_host(&config, claims);
	claims.set(host.parameters());
	let events = EventHandlers::from_host(host);

	view! {
		<div class="fullscreen-graph">
			<ClaimsGraphCanvas claims=claims events=events config=config fullscreen=true />
			<div class="graph-overlay">
				<h1>"Claims Anomaly Network"</h1>
				<p class="subtitle">
					"Click a claim to flag it. Click an agent to investigate its cluster. Drag nodes to reposition, scroll to zoom."
				</p>
			</div>
			<GraphLegend />
		</div>
	}
}
