//! Parameter and event contract with the embedding dashboard.

mod bridge;
mod error;
mod events;
mod manifest;

pub use bridge::{HostBridge, HostMessage, HostOrigin, LocalHost, MessageHost, OutboundMessage};
pub use error::{HostError, HostResult};
pub use events::{
	EventCallback, EventHandlers, FlagSuspiciousPayload, InvestigateClusterPayload, WidgetEvent,
};
pub use manifest::{CLAIMS_PARAMETER, EventSpec, ParameterSpec, ParameterType, WidgetManifest};
