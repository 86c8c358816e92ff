use thiserror::Error;

/// Result alias for host bridge operations.
pub type HostResult<T> = Result<T, HostError>;

/// Failures talking to the embedding dashboard.
#[derive(Debug, Error)]
pub enum HostError {
	/// A message could not be encoded or decoded.
	#[error("Malformed host message: {0}")]
	Json(#[from] serde_json::Error),

	/// An inbound message carried something other than a JSON string.
	#[error("Host message payload is not text")]
	NonTextMessage,

	/// The widget is not running inside a frame.
	#[error("No parent window to post to")]
	NoParent,

	/// The host origin is not known yet, so events cannot be addressed.
	#[error("Host origin unknown, no message received from the parent yet")]
	UnknownOrigin,

	/// The inbound message listener could not be attached.
	#[error("Could not listen for host messages: {0}")]
	Listen(String),

	/// The browser rejected `postMessage`.
	#[error("postMessage failed: {0}")]
	Post(String),
}
