use serde::Deserialize;

/// One `InsuranceClaim` object as supplied by the host's `claims` object set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
	/// Object primary key; the claim node's identity.
	pub primary_key: String,
	/// Typed properties of the claim object.
	#[serde(default)]
	pub properties: ClaimProperties,
}

/// Properties of an `InsuranceClaim`. Every field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimProperties {
	/// Human readable claim number.
	pub claim_id: Option<String>,
	/// Claimed amount in dollars.
	pub claim_amount: Option<f64>,
	/// Anomaly score, 0 to 100.
	pub anomaly_score: Option<f64>,
	/// Workflow status, e.g. "Under Investigation".
	pub status: Option<String>,
	/// Policyholder the claim was filed by.
	pub policyholder_id: Option<String>,
	/// Line of business: Auto, Home, Health or Liability.
	pub claim_type: Option<String>,
	/// Filing date as `yyyy-MM-dd`.
	pub claim_date: Option<String>,
}

impl ClaimRecord {
	/// Claim amount, 0 when missing or not a number.
	pub fn amount(&self) -> f64 {
		self.properties
			.claim_amount
			.filter(|a| a.is_finite())
			.unwrap_or(0.0)
	}

	/// Anomaly score, 0 when missing or not a number.
	pub fn anomaly_score(&self) -> f64 {
		self.properties
			.anomaly_score
			.filter(|s| s.is_finite())
			.unwrap_or(0.0)
	}

	/// Policyholder reference; empty ids count as missing.
	pub fn policyholder_id(&self) -> Option<&str> {
		self.properties
			.policyholder_id
			.as_deref()
			.filter(|id| !id.is_empty())
	}
}
