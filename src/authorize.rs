//! OAuth2 authorization request assembly and the canonical authorization-start URL.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::{CorrelationId, PkceChallenge, ScopeSet},
	authority::AuthorityDescriptor,
	error::PayloadError,
	wire::QueryParam,
};

const STATE_LEN: usize = 32;
// Query keys owned by the request builder; caller extras can extend the URL but never
// override these.
const RESERVED_QUERY_KEYS: &[&str] = &[
	"response_type",
	"client_id",
	"redirect_uri",
	"scope",
	"state",
	"code_challenge",
	"code_challenge_method",
	"login_hint",
	"prompt",
	"client-request-id",
];

/// OpenID Connect prompt behaviors understood by the authorization endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
	/// No prompt requested; the endpoint decides.
	#[default]
	None,
	/// Force a fresh credential prompt.
	Login,
	/// Force a consent prompt.
	Consent,
	/// Force the account picker.
	SelectAccount,
}
impl Prompt {
	/// Returns the wire name carried in broker requests.
	pub const fn wire_name(self) -> &'static str {
		match self {
			Prompt::None => "NONE",
			Prompt::Login => "LOGIN",
			Prompt::Consent => "CONSENT",
			Prompt::SelectAccount => "SELECT_ACCOUNT",
		}
	}

	/// Returns the `prompt` query value, or none when the endpoint should decide.
	pub const fn query_value(self) -> Option<&'static str> {
		match self {
			Prompt::None => None,
			Prompt::Login => Some("login"),
			Prompt::Consent => Some("consent"),
			Prompt::SelectAccount => Some("select_account"),
		}
	}
}
impl Display for Prompt {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.wire_name())
	}
}
impl FromStr for Prompt {
	type Err = PayloadError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"NONE" => Ok(Prompt::None),
			"LOGIN" => Ok(Prompt::Login),
			"CONSENT" => Ok(Prompt::Consent),
			"SELECT_ACCOUNT" => Ok(Prompt::SelectAccount),
			other => Err(PayloadError::UnknownPrompt { name: other.to_owned() }),
		}
	}
}

/// A complete OAuth2 authorization request.
///
/// Pure data: construction performs no I/O, and
/// [`authorization_start_url`](Self::authorization_start_url) is a pure transformation
/// over the fields.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
	/// OAuth client identifier.
	pub client_id: String,
	/// Redirect URI the authorization code returns to.
	pub redirect_uri: String,
	/// Requested scope set.
	pub scope: ScopeSet,
	/// Resolved authority the request targets.
	pub authority: AuthorityDescriptor,
	/// Login hint forwarded to the endpoint, when known.
	pub login_hint: Option<String>,
	/// Correlation id forwarded as `client-request-id`.
	pub correlation_id: CorrelationId,
	/// PKCE material; the verifier stays in this request's local state.
	pub pkce: PkceChallenge,
	/// Caller-supplied extra query parameters, appended last.
	pub extra_query_parameters: Vec<QueryParam>,
	/// Requested prompt behavior.
	pub prompt: Prompt,
	/// Opaque state value that must round-trip via the redirect.
	pub state: String,
}
impl AuthorizationRequest {
	/// Creates a new authorization request.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		client_id: impl Into<String>,
		redirect_uri: impl Into<String>,
		scope: ScopeSet,
		authority: AuthorityDescriptor,
		login_hint: Option<String>,
		correlation_id: CorrelationId,
		pkce: PkceChallenge,
		extra_query_parameters: Vec<QueryParam>,
		prompt: Prompt,
		state: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			redirect_uri: redirect_uri.into(),
			scope,
			authority,
			login_hint,
			correlation_id,
			pkce,
			extra_query_parameters,
			prompt,
			state: state.into(),
		}
	}

	/// Canonical authorization-start URL for this request.
	///
	/// Caller extras are appended after the reserved parameters and cannot override
	/// them; reserved keys win on conflict. Fails with [`Error::NotSupported`] for
	/// provider families whose endpoint cannot be statically derived.
	pub fn authorization_start_url(&self) -> Result<Url> {
		let mut url = self.authority.authorization_endpoint()?;

		{
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair("response_type", "code");
			pairs.append_pair("client_id", &self.client_id);
			pairs.append_pair("redirect_uri", &self.redirect_uri);

			if !self.scope.is_empty() {
				pairs.append_pair("scope", &self.scope.normalized());
			}

			pairs.append_pair("state", &self.state);
			pairs.append_pair("code_challenge", &self.pkce.challenge);
			pairs.append_pair("code_challenge_method", self.pkce.method.as_str());

			if let Some(login_hint) = self.login_hint.as_deref() {
				pairs.append_pair("login_hint", login_hint);
			}
			if let Some(prompt) = self.prompt.query_value() {
				pairs.append_pair("prompt", prompt);
			}

			pairs.append_pair("client-request-id", &self.correlation_id.to_string());

			for param in &self.extra_query_parameters {
				if !RESERVED_QUERY_KEYS.contains(&param.key.as_str()) {
					pairs.append_pair(&param.key, &param.value);
				}
			}
		}

		Ok(url)
	}
}

/// Generates the opaque state string bound to one authorization round trip.
pub fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn request_against(authority_url: &str) -> AuthorizationRequest {
		let authority = AuthorityDescriptor::resolve_from_url(authority_url)
			.expect("Authority fixture should resolve.");
		let scope = ScopeSet::new(["User.Read", "openid"]).expect("Scope fixture should be valid.");

		AuthorizationRequest::new(
			"client-abc",
			"msauth://com.example.app/signature",
			scope,
			authority,
			Some("user@example.com".into()),
			CorrelationId::generate().expect("Correlation id should generate."),
			PkceChallenge::generate().expect("PKCE should generate."),
			vec![QueryParam::new("instance_aware", "true"), QueryParam::new("client_id", "spoof")],
			Prompt::SelectAccount,
			random_state(),
		)
	}

	#[test]
	fn start_url_carries_the_canonical_parameters() {
		let request = request_against("https://login.microsoftonline.com/common");
		let url = request.authorization_start_url().expect("Directory URL should derive.");

		assert!(url.as_str().starts_with(
			"https://login.microsoftonline.com/common/oauth2/v2.0/authorize?",
		));

		let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("response_type"), Some(&"code".into()));
		assert_eq!(pairs.get("client_id"), Some(&"client-abc".into()));
		assert_eq!(pairs.get("scope"), Some(&"User.Read openid".into()));
		assert_eq!(pairs.get("login_hint"), Some(&"user@example.com".into()));
		assert_eq!(pairs.get("prompt"), Some(&"select_account".into()));
		assert_eq!(pairs.get("code_challenge"), Some(&request.pkce.challenge));
		assert_eq!(pairs.get("code_challenge_method"), Some(&"S256".into()));
		assert_eq!(pairs.get("state"), Some(&request.state));
		assert_eq!(
			pairs.get("client-request-id"),
			Some(&request.correlation_id.to_string()),
		);
		assert_eq!(pairs.get("instance_aware"), Some(&"true".into()));
	}

	#[test]
	fn reserved_keys_win_over_caller_extras() {
		let request = request_against("https://login.microsoftonline.com/common");
		let url = request.authorization_start_url().expect("URL should derive.");
		let client_ids: Vec<_> = url
			.query_pairs()
			.filter(|(key, _)| key == "client_id")
			.map(|(_, value)| value.into_owned())
			.collect();

		assert_eq!(client_ids, vec!["client-abc"], "The spoofed client_id must be dropped.");
	}

	#[test]
	fn federated_authorities_cannot_start_authorization() {
		let request = request_against("https://fs.contoso.com/adfs");
		let err = request
			.authorization_start_url()
			.expect_err("Federated start URLs are not derivable.");

		assert!(matches!(err, Error::NotSupported { .. }));
	}

	#[test]
	fn prompt_wire_names_round_trip() {
		for prompt in [Prompt::None, Prompt::Login, Prompt::Consent, Prompt::SelectAccount] {
			assert_eq!(
				prompt.wire_name().parse::<Prompt>().expect("Wire name should parse back."),
				prompt,
			);
		}

		assert!(matches!(
			"ALWAYS".parse::<Prompt>(),
			Err(PayloadError::UnknownPrompt { .. }),
		));
	}

	#[test]
	fn state_strings_are_fresh_per_call() {
		let lhs = random_state();
		let rhs = random_state();

		assert_eq!(lhs.len(), STATE_LEN);
		assert_ne!(lhs, rhs);
	}
}
