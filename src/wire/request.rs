// self
use crate::{_prelude::*, auth::AuthenticationScheme, error::PayloadError};

/// Flat, versioned broker request record mirroring command parameters as transport-safe
/// primitives.
///
/// Every field is a string or boolean; the authentication scheme is the one nested value
/// and rides a discriminated encoding (see [`AuthenticationScheme`]) so the decoder can
/// reconstruct the correct variant. The serialized field names are the wire contract and
/// must not change between protocol versions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BrokerRequest {
	/// Authority URL string the request targets.
	pub authority: String,
	/// Space-joined scope string.
	#[serde(rename = "scopes")]
	pub scope: String,
	/// Redirect URI registered for the calling application.
	pub redirect: String,
	/// OAuth client identifier.
	pub client_id: String,
	/// Home account identifier (silent requests only).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub home_account_id: Option<String>,
	/// Local account identifier (silent requests only).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_account_id: Option<String>,
	/// Login hint (interactive) or account username (silent).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Extra query parameters as a JSON array of key/value pairs.
	#[serde(rename = "extra_query_param", default, skip_serializing_if = "Option::is_none")]
	pub extra_query_parameters: Option<String>,
	/// Wire name of the requested prompt behavior.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub prompt: Option<String>,
	/// Claims-request JSON passed through opaquely.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub claims: Option<String>,
	/// Forces the broker to bypass its token cache.
	#[serde(default)]
	pub force_refresh: bool,
	/// Correlation id string; empty means the receiver must generate one.
	#[serde(default)]
	pub correlation_id: String,
	/// Calling application's package name.
	#[serde(rename = "client_app_name")]
	pub application_name: String,
	/// Calling application's version.
	#[serde(rename = "client_app_version")]
	pub application_version: String,
	/// SDK version the calling application links against.
	#[serde(rename = "client_version")]
	pub sdk_version: String,
	/// Cloud environment name for instance discovery; absent means "leave unchanged".
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub environment: Option<String>,
	/// Whether the caller's authority declared multi-cloud discovery support.
	#[serde(default)]
	pub multiple_clouds_supported: bool,
	/// Requested authorization agent name (`BROWSER`/`WEBVIEW`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authorization_agent: Option<String>,
	/// Requested authentication scheme; absent defaults to bearer on the receiving side.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authentication_scheme: Option<AuthenticationScheme>,
}
impl BrokerRequest {
	/// Serializes the record to its wire JSON form.
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self).map_err(|e| PayloadError::Encode { source: e }.into())
	}

	/// Reconstructs a record from wire JSON.
	pub fn from_json(json: &str) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_str(json);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|e| PayloadError::Decode { source: e }.into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::PopParameters;

	fn minimal_request() -> BrokerRequest {
		BrokerRequest {
			authority: "https://login.microsoftonline.com/common".into(),
			scope: "User.Read openid".into(),
			redirect: "msauth://com.example.app/signature".into(),
			client_id: "abc".into(),
			application_name: "com.example.app".into(),
			application_version: "1.2.3".into(),
			sdk_version: "5.0.0".into(),
			..Default::default()
		}
	}

	#[test]
	fn wire_field_names_are_stable() {
		let json = minimal_request().to_json().expect("Request should serialize.");
		let value: serde_json::Value =
			serde_json::from_str(&json).expect("Serialized request should be JSON.");

		assert_eq!(value["scopes"], "User.Read openid");
		assert_eq!(value["client_app_name"], "com.example.app");
		assert_eq!(value["client_app_version"], "1.2.3");
		assert_eq!(value["client_version"], "5.0.0");
		assert_eq!(value["force_refresh"], false);
		assert!(value.get("home_account_id").is_none(), "Absent options stay off the wire.");
	}

	#[test]
	fn optional_fields_default_when_missing() {
		let json = "{\"authority\":\"https://login.microsoftonline.com/common\",\
			\"scopes\":\"openid\",\"redirect\":\"r\",\"client_id\":\"c\",\
			\"client_app_name\":\"a\",\"client_app_version\":\"1\",\"client_version\":\"5\"}";
		let request = BrokerRequest::from_json(json).expect("Minimal payload should decode.");

		assert!(request.correlation_id.is_empty());
		assert!(!request.force_refresh);
		assert!(!request.multiple_clouds_supported);
		assert!(request.authentication_scheme.is_none());
		assert!(request.prompt.is_none());
	}

	#[test]
	fn scheme_round_trips_through_the_discriminated_encoding() {
		let mut request = minimal_request();

		request.authentication_scheme = Some(AuthenticationScheme::Pop(PopParameters {
			http_method: Some("POST".into()),
			..Default::default()
		}));

		let json = request.to_json().expect("Request with scheme should serialize.");
		let back = BrokerRequest::from_json(&json).expect("Request should deserialize.");

		assert!(matches!(back.authentication_scheme, Some(AuthenticationScheme::Pop(_))));
	}

	#[test]
	fn malformed_payloads_are_decode_errors() {
		let err = BrokerRequest::from_json("{").expect_err("Malformed JSON must fail.");

		assert!(matches!(err, Error::MalformedBrokerPayload(PayloadError::Decode { .. })));

		let err = BrokerRequest::from_json(
			"{\"authority\":\"a\",\"scopes\":\"s\",\"redirect\":\"r\",\"client_id\":\"c\",\
			\"client_app_name\":\"a\",\"client_app_version\":\"1\",\"client_version\":\"5\",\
			\"authentication_scheme\":{\"name\":\"Basic\"}}",
		)
		.expect_err("Unknown scheme discriminators must be rejected.");

		assert!(matches!(err, Error::MalformedBrokerPayload(PayloadError::Decode { .. })));
	}
}
