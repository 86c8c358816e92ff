//! Static registration of the widget's parameter and event contract.

use serde::Serialize;

/// Widget identity, consumed parameters and emitted events.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetManifest {
	/// Registered widget id.
	pub id: &'static str,
	/// Name shown in the dashboard editor.
	pub display_name: &'static str,
	/// Parameters the host supplies.
	pub parameters: Vec<ParameterSpec>,
	/// Events the widget emits.
	pub events: Vec<EventSpec>,
}

/// Parameter value shapes understood by the widget.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParameterType {
	/// A set of ontology objects of one type.
	#[serde(rename_all = "camelCase")]
	ObjectSet {
		/// Object type api name.
		object_type: &'static str,
	},
}

/// One consumed parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
	/// Parameter id.
	pub id: &'static str,
	/// Editor label.
	pub display_name: &'static str,
	/// Value shape.
	#[serde(rename = "type")]
	pub value_type: ParameterType,
}

/// One emitted event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSpec {
	/// Event id, matches [`WidgetEvent::name`](super::WidgetEvent::name).
	pub id: &'static str,
	/// Editor label.
	pub display_name: &'static str,
	/// Parameters the host refreshes after the event fires.
	pub parameter_update_ids: Vec<&'static str>,
}

/// Id of the claims object-set parameter.
pub const CLAIMS_PARAMETER: &str = "claims";

impl WidgetManifest {
	/// The manifest of this widget.
	pub fn claims_network() -> Self {
		Self {
			id: "claims-anomaly-network",
			display_name: "Claims Anomaly Network",
			parameters: vec![ParameterSpec {
				id: CLAIMS_PARAMETER,
				display_name: "Claims",
				value_type: ParameterType::ObjectSet {
					object_type: "InsuranceClaim",
				},
			}],
			events: vec![
				EventSpec {
					id: "flagSuspicious",
					display_name: "Flag Suspicious Claim",
					parameter_update_ids: vec![CLAIMS_PARAMETER],
				},
				EventSpec {
					id: "investigateCluster",
					display_name: "Investigate Agent Cluster",
					parameter_update_ids: Vec::new(),
				},
			],
		}
	}

	/// Looks up an event registration.
	pub fn event(&self, id: &str) -> Option<&EventSpec> {
		self.events.iter().find(|e| e.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::{FlagSuspiciousPayload, InvestigateClusterPayload, WidgetEvent};

	#[test]
	fn every_emitted_event_is_registered() {
		let manifest = WidgetManifest::claims_network();
		let events = [
			WidgetEvent::FlagSuspicious(FlagSuspiciousPayload {
				claim_id: String::new(),
			}),
			WidgetEvent::InvestigateCluster(InvestigateClusterPayload {
				agent_id: String::new(),
			}),
		];
		for event in events {
			assert!(manifest.event(event.name()).is_some(), "{}", event.name());
		}
	}

	#[test]
	fn flag_refreshes_claims() {
		let manifest = WidgetManifest::claims_network();
		let flag = manifest.event("flagSuspicious").unwrap();
		assert_eq!(flag.parameter_update_ids, [CLAIMS_PARAMETER]);
		assert!(
			manifest
				.event("investigateCluster")
				.unwrap()
				.parameter_update_ids
				.is_empty()
		);
	}

	#[test]
	fn parameter_wire_format() {
		let json = serde_json::to_value(WidgetManifest::claims_network()).unwrap();
		assert_eq!(
			json["parameters"][0],
			serde_json::json!({
				"id": "claims",
				"displayName": "Claims",
				"type": {"type": "objectSet", "objectType": "InsuranceClaim"}
			})
		);
	}
}
