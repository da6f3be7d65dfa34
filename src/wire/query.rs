// crates.io
use serde_json::{Value, json};
// self
use crate::{_prelude::*, error::PayloadError};

/// Ordered query-parameter pair carried through broker payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
	/// Parameter key.
	pub key: String,
	/// Parameter value.
	pub value: String,
}
impl QueryParam {
	/// Creates a new pair.
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self { key: key.into(), value: value.into() }
	}
}

/// Serializes parameters as the JSON array embedded in broker requests.
///
/// Construction goes through [`Value`] so the encoding cannot fail and preserves the
/// caller-supplied order.
pub fn to_json(params: &[QueryParam]) -> String {
	Value::Array(params.iter().map(|p| json!({ "key": p.key, "value": p.value })).collect())
		.to_string()
}

/// Deserializes the JSON array form back into ordered pairs.
pub fn from_json(json: &str) -> Result<Vec<QueryParam>> {
	let mut deserializer = serde_json::Deserializer::from_str(json);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|e| PayloadError::ExtraQueryParameters { source: e }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn pairs_round_trip_in_order() {
		let params = vec![QueryParam::new("slice", "testslice"), QueryParam::new("b", "2")];
		let json = to_json(&params);
		let back = from_json(&json).expect("Encoded parameters should decode.");

		assert_eq!(back, params);
	}

	#[test]
	fn empty_list_encodes_as_an_empty_array() {
		assert_eq!(to_json(&[]), "[]");
		assert!(from_json("[]").expect("Empty array should decode.").is_empty());
	}

	#[test]
	fn malformed_json_is_a_payload_error() {
		let err = from_json("{not json").expect_err("Malformed input must fail.");

		assert!(matches!(
			err,
			Error::MalformedBrokerPayload(PayloadError::ExtraQueryParameters { .. }),
		));
	}
}
