//! Adapter-level error types shared across authority resolution, wire decoding, and
//! scheme negotiation.

// self
use crate::_prelude::*;

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical adapter error exposed by public APIs.
///
/// Every variant except [`Error::NoBrowserAvailable`] is fatal: the adapter call that
/// raised it aborts without producing a partially-populated result.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Authority string was malformed or uses an unsupported scheme.
	#[error(transparent)]
	InvalidAuthority(#[from] AuthorityError),
	/// Wire payload could not be reconstructed into a broker request.
	#[error(transparent)]
	MalformedBrokerPayload(#[from] PayloadError),
	/// A secure random source could not be obtained.
	#[error("Secure random source is unavailable.")]
	CryptoUnavailable {
		/// Underlying OS random source failure.
		#[source]
		source: rand::rand_core::OsError,
	},
	/// The provider family cannot derive its authorization endpoint statically.
	///
	/// Expected terminal failure for federated providers that require dynamic endpoint
	/// discovery; callers must not treat it as a bug.
	#[error("The {family} provider family does not support static authorization endpoint derivation.")]
	NotSupported {
		/// Provider family label.
		family: &'static str,
	},
	/// No safelisted browser is installed on the device.
	///
	/// Raised by browser-selection seams; the adapter recovers from it locally in the
	/// one best-effort path that consumes it.
	#[error("No safelisted browser is available.")]
	NoBrowserAvailable,
}

/// Authority validation failures raised during resolution.
#[derive(Debug, ThisError)]
pub enum AuthorityError {
	/// The authority string is not an absolute URL.
	#[error("Authority is not a well-formed absolute URL: {raw}.")]
	Malformed {
		/// The raw authority string as supplied.
		raw: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The authority URL does not use HTTPS.
	#[error("Authority must use HTTPS: {url}.")]
	InsecureScheme {
		/// The offending authority URL.
		url: String,
	},
	/// The authority URL carries no tenant path segment.
	#[error("Authority URL has no tenant path segment: {url}.")]
	MissingTenant {
		/// The offending authority URL.
		url: String,
	},
}

/// Wire payload failures raised while decoding or realizing broker requests.
#[derive(Debug, ThisError)]
pub enum PayloadError {
	/// Envelope carries no broker request payload under the expected key.
	#[error("Envelope is missing the broker request payload.")]
	MissingPayload,
	/// Broker request JSON could not be parsed.
	///
	/// Also covers unknown authentication-scheme discriminators, which the decoder
	/// rejects rather than defaulting.
	#[error("Broker request JSON could not be parsed.")]
	Decode {
		/// Structured parsing failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Broker request could not be serialized for the wire.
	#[error("Broker request could not be serialized.")]
	Encode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Extra query parameter JSON could not be parsed.
	#[error("Extra query parameter JSON could not be parsed.")]
	ExtraQueryParameters {
		/// Structured parsing failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Wire environment name does not match a known cloud environment.
	#[error("Unknown cloud environment name: {name}.")]
	UnknownEnvironment {
		/// The unrecognized environment name.
		name: String,
	},
	/// Wire prompt name does not match a known prompt behavior.
	#[error("Unknown prompt name: {name}.")]
	UnknownPrompt {
		/// The unrecognized prompt name.
		name: String,
	},
	/// Wire correlation id is present but not a well-formed identifier.
	#[error("Correlation id is not a well-formed identifier: {value}.")]
	InvalidCorrelationId {
		/// The unparseable correlation id value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: uuid::Error,
	},
}
