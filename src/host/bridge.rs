//! Narrow interface to the embedding dashboard.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use web_sys::MessageEvent;

use super::error::{HostError, HostResult};
use super::events::WidgetEvent;
use super::manifest::WidgetManifest;
use crate::network::ClaimRecord;

/// What the widget needs from its host.
pub trait HostBridge {
	/// Current value of the `claims` parameter.
	fn parameters(&self) -> Vec<ClaimRecord>;
	/// Delivers an event. Best effort, failures are logged.
	fn emit(&self, event: WidgetEvent);
}

/// Message posted by the host into the widget frame.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
	/// New value of the `claims` parameter.
	Parameters {
		/// The object set, already filtered by the host.
		#[serde(default)]
		claims: Vec<ClaimRecord>,
	},
}

impl HostMessage {
	/// Decodes a JSON message.
	pub fn from_json(json: &str) -> HostResult<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Message posted by the widget to the host.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage<'a> {
	/// Sent once on startup.
	Ready {
		/// Contract registration.
		manifest: &'a WidgetManifest,
	},
	/// A user interaction event.
	Event(&'a WidgetEvent),
}

impl OutboundMessage<'_> {
	/// Encodes to JSON.
	pub fn to_json(&self) -> HostResult<String> {
		Ok(serde_json::to_string(self)?)
	}
}

/// Origin of the framing host.
///
/// Fixed by configuration, or pinned to the first message the parent frame
/// sends. Messages from any other window or origin are ignored.
#[derive(Debug, Default)]
pub struct HostOrigin {
	pinned: RefCell<Option<String>>,
}

impl HostOrigin {
	/// Guard with an optional origin known up front.
	pub fn new(configured: Option<String>) -> Self {
		Self {
			pinned: RefCell::new(configured),
		}
	}

	/// Whether a message from `origin` is the host speaking.
	pub fn admit(&self, from_parent: bool, origin: &str) -> bool {
		if !from_parent {
			return false;
		}
		let mut pinned = self.pinned.borrow_mut();
		match pinned.as_deref() {
			Some(expected) => expected == origin,
			None => {
				info!("Host origin pinned to {origin}");
				*pinned = Some(origin.to_string());
				true
			}
		}
	}

	/// Target origin for outbound messages, once known.
	pub fn target(&self) -> Option<String> {
		self.pinned.borrow().clone()
	}

	/// Decodes an inbound message, or `None` when it is not from the host.
	pub fn inbound(
		&self,
		from_parent: bool,
		origin: &str,
		data: Option<String>,
	) -> Option<HostResult<HostMessage>> {
		if !self.admit(from_parent, origin) {
			return None;
		}
		Some(
			data.ok_or(HostError::NonTextMessage)
				.and_then(|json| HostMessage::from_json(&json)),
		)
	}
}

fn sent_by_parent(ev: &MessageEvent) -> bool {
	let parent = web_sys::window().and_then(|w| w.parent().ok().flatten());
	match (ev.source(), parent) {
		(Some(source), Some(parent)) => js_sys::Object::is(source.as_ref(), parent.as_ref()),
		_ => false,
	}
}

/// Host reached through `postMessage` when the widget runs in a frame.
pub struct MessageHost {
	claims: Rc<RefCell<Vec<ClaimRecord>>>,
	origin: Rc<HostOrigin>,
	listener: RefCell<Option<Closure<dyn FnMut(MessageEvent)>>>,
}

impl MessageHost {
	/// Whether the page is framed by a parent window.
	pub fn is_embedded() -> bool {
		let Some(window) = web_sys::window() else {
			return false;
		};
		match window.parent() {
			Ok(Some(parent)) => !js_sys::Object::is(parent.as_ref(), window.as_ref()),
			_ => false,
		}
	}

	/// Starts listening for parameter updates and announces the manifest.
	///
	/// `host_origin` restricts both directions to one origin; without it the
	/// first message from the parent frame decides.
	pub fn connect(
		host_origin: Option<String>,
		on_parameters: impl Fn(Vec<ClaimRecord>) + 'static,
	) -> HostResult<Rc<Self>> {
		let window = web_sys::window().ok_or(HostError::NoParent)?;
		let host = Rc::new(Self {
			claims: Rc::new(RefCell::new(Vec::new())),
			origin: Rc::new(HostOrigin::new(host_origin)),
			listener: RefCell::new(None),
		});

		let (claims, origin) = (host.claims.clone(), host.origin.clone());
		let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
			let sender = ev.origin();
			match origin.inbound(sent_by_parent(&ev), &sender, ev.data().as_string()) {
				Some(Ok(HostMessage::Parameters { claims: records })) => {
					info!("Host supplied {} claims", records.len());
					*claims.borrow_mut() = records.clone();
					on_parameters(records);
				}
				Some(Err(e)) => warn!("{e}"),
				None => debug!("Ignoring message from {sender}"),
			}
		});
		window
			.add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
			.map_err(|e| HostError::Listen(format!("{e:?}")))?;
		*host.listener.borrow_mut() = Some(listener);

		// the manifest is public, so an unknown host may receive it
		let target = host.origin.target().unwrap_or_else(|| "*".to_string());
		host.post(
			&OutboundMessage::Ready {
				manifest: &WidgetManifest::claims_network(),
			},
			&target,
		)?;
		Ok(host)
	}

	fn post(&self, message: &OutboundMessage<'_>, target_origin: &str) -> HostResult<()> {
		let json = message.to_json()?;
		let parent = web_sys::window()
			.and_then(|w| w.parent().ok().flatten())
			.ok_or(HostError::NoParent)?;
		parent
			.post_message(&JsValue::from_str(&json), target_origin)
			.map_err(|e| HostError::Post(format!("{e:?}")))
	}
}

impl HostBridge for MessageHost {
	fn parameters(&self) -> Vec<ClaimRecord> {
		self.claims.borrow().clone()
	}

	fn emit(&self, event: WidgetEvent) {
		let sent = self
			.origin
			.target()
			.ok_or(HostError::UnknownOrigin)
			.and_then(|target| self.post(&OutboundMessage::Event(&event), &target));
		match sent {
			Ok(()) => info!("Emitted {}", event.name()),
			Err(e) => warn!("Could not emit {}: {e}", event.name()),
		}
	}
}

impl Drop for MessageHost {
	fn drop(&mut self) {
		let listener = self.listener.get_mut().take();
		if let (Some(window), Some(listener)) = (web_sys::window(), listener) {
			let _ = window
				.remove_event_listener_with_callback("message", listener.as_ref().unchecked_ref());
		}
	}
}

/// In-page host used when the widget runs standalone.
#[derive(Default)]
pub struct LocalHost {
	claims: Vec<ClaimRecord>,
	emitted: RefCell<Vec<WidgetEvent>>,
}

impl LocalHost {
	/// Host with fixed parameters.
	pub fn new(claims: Vec<ClaimRecord>) -> Self {
		Self {
			claims,
			emitted: RefCell::new(Vec::new()),
		}
	}

	/// Events emitted so far, oldest first.
	pub fn emitted(&self) -> Vec<WidgetEvent> {
		self.emitted.borrow().clone()
	}
}

impl HostBridge for LocalHost {
	fn parameters(&self) -> Vec<ClaimRecord> {
		self.claims.clone()
	}

	fn emit(&self, event: WidgetEvent) {
		match OutboundMessage::Event(&event).to_json() {
			Ok(json) => info!("Event for host: {json}"),
			Err(e) => warn!("Could not encode {}: {e}", event.name()),
		}
		self.emitted.borrow_mut().push(event);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::{EventHandlers, FlagSuspiciousPayload};
	use crate::network::{AgentNode, GraphNode};

	#[test]
	fn decodes_parameters_message() {
		let message = HostMessage::from_json(
			r#"{"type": "parameters", "claims": [{"primaryKey": "C1", "properties": {}}]}"#,
		)
		.unwrap();
		let HostMessage::Parameters { claims } = message;
		assert_eq!(claims.len(), 1);
		assert_eq!(claims[0].primary_key, "C1");
	}

	#[test]
	fn rejects_malformed_messages() {
		for json in ["", "[]", r#"{"type": "refresh"}"#, r#"{"claims": []}"#] {
			assert!(matches!(HostMessage::from_json(json), Err(HostError::Json(_))), "{json}");
		}
	}

	#[test]
	fn foreign_windows_are_ignored() {
		let origin = HostOrigin::default();
		let json = Some(r#"{"type": "parameters", "claims": []}"#.to_string());
		assert!(origin.inbound(false, "https://evil.example", json.clone()).is_none());
		assert_eq!(origin.target(), None);

		let first = origin.inbound(true, "https://dash.example", json.clone());
		assert!(matches!(first, Some(Ok(HostMessage::Parameters { .. }))));
		assert_eq!(origin.target().as_deref(), Some("https://dash.example"));

		// the parent navigated elsewhere
		assert!(origin.inbound(true, "https://evil.example", json.clone()).is_none());
		assert!(origin.inbound(false, "https://dash.example", json).is_none());
	}

	#[test]
	fn configured_origin_is_enforced() {
		let origin = HostOrigin::new(Some("https://dash.example".into()));
		assert!(!origin.admit(true, "https://other.example"));
		assert!(origin.admit(true, "https://dash.example"));
		assert!(matches!(
			origin.inbound(true, "https://dash.example", None),
			Some(Err(HostError::NonTextMessage))
		));
	}

	#[test]
	fn outbound_wire_format() {
		let event = WidgetEvent::FlagSuspicious(FlagSuspiciousPayload {
			claim_id: "C9".into(),
		});
		let json: serde_json::Value =
			serde_json::from_str(&OutboundMessage::Event(&event).to_json().unwrap()).unwrap();
		assert_eq!(
			json,
			serde_json::json!({"type": "event", "event": "flagSuspicious", "payload": {"claimId": "C9"}})
		);

		let manifest = WidgetManifest::claims_network();
		let json: serde_json::Value = serde_json::from_str(
			&OutboundMessage::Ready {
				manifest: &manifest,
			}
			.to_json()
			.unwrap(),
		)
		.unwrap();
		assert_eq!(json["type"], "ready");
		assert_eq!(json["manifest"]["id"], "claims-anomaly-network");
	}

	#[test]
	fn local_host_records_events() {
		let host = Rc::new(LocalHost::new(Vec::new()));
		let handlers = EventHandlers::from_host(host.clone());
		handlers.handle_click(&GraphNode::Agent(AgentNode {
			agent_id: "AGENT_0".into(),
			name: "Agent 1".into(),
		}));
		let emitted = host.emitted();
		assert_eq!(emitted.len(), 1);
		assert_eq!(emitted[0].name(), "investigateCluster");
		assert!(host.parameters().is_empty());
	}
}
