//! In-process command parameters the adapter translates to and from the wire.

// self
use crate::{
	_prelude::*,
	auth::{AuthenticationScheme, CorrelationId, ScopeSet},
	authority::AuthorityDescriptor,
	authorize::Prompt,
	ui::{AuthorizationAgent, BrowserDescriptor},
	wire::QueryParam,
};

/// Token command parameters: one shared field set plus a flow-specific payload.
///
/// Both sides of the process boundary reconstruct this type fresh from the wire; it is
/// never shared across the boundary by reference.
#[derive(Clone, Debug)]
pub struct TokenCommandParameters {
	/// OAuth client identifier.
	pub client_id: String,
	/// Requested scope set.
	pub scopes: ScopeSet,
	/// Redirect URI; when absent the outbound path derives one from the calling
	/// application's identity.
	pub redirect_uri: Option<String>,
	/// Resolved authority the request targets.
	pub authority: AuthorityDescriptor,
	/// Correlation id threaded through the request.
	pub correlation_id: CorrelationId,
	/// Calling application's package name.
	pub application_name: String,
	/// Calling application's version.
	pub application_version: String,
	/// SDK version the calling application links against.
	pub sdk_version: String,
	/// Claims-request JSON passed through opaquely.
	pub claims_request_json: Option<String>,
	/// Requested authentication scheme; absent negotiates to bearer.
	pub authentication_scheme: Option<AuthenticationScheme>,
	/// Minimum broker protocol version the client accepts, for the hello handshake.
	pub required_broker_protocol_version: Option<String>,
	/// OS-assigned uid of the calling application, populated on the broker side.
	pub caller_uid: Option<i64>,
	/// Flow-specific payload.
	pub flow: FlowParameters,
}
impl TokenCommandParameters {
	/// Interactive payload, when this command is interactive.
	pub fn interactive(&self) -> Option<&InteractiveParameters> {
		match &self.flow {
			FlowParameters::Interactive(parameters) => Some(parameters),
			FlowParameters::Silent(_) => None,
		}
	}

	/// Silent payload, when this command is silent.
	pub fn silent(&self) -> Option<&SilentParameters> {
		match &self.flow {
			FlowParameters::Silent(parameters) => Some(parameters),
			FlowParameters::Interactive(_) => None,
		}
	}
}

/// Flow-specific payload for token commands.
#[derive(Clone, Debug)]
pub enum FlowParameters {
	/// Interactive authorization in a browser or webview.
	Interactive(InteractiveParameters),
	/// Silent token acquisition keyed off a stored account.
	Silent(SilentParameters),
}

/// Fields specific to interactive token commands.
#[derive(Clone, Debug, Default)]
pub struct InteractiveParameters {
	/// Login hint shown to the authorization endpoint.
	pub login_hint: Option<String>,
	/// Requested prompt behavior.
	pub prompt: Prompt,
	/// Caller-supplied extra query parameters, order preserved.
	pub extra_query_parameters: Vec<QueryParam>,
	/// Agent the authorization should run in.
	pub authorization_agent: AuthorizationAgent,
	/// Whether the calling application opted into system-browser support.
	pub broker_browser_enabled: bool,
	/// Browsers the authorization may leave the webview for.
	pub browser_safe_list: Vec<BrowserDescriptor>,
}

/// Fields specific to silent token commands.
#[derive(Clone, Debug)]
pub struct SilentParameters {
	/// Stored account the request acts on behalf of.
	pub account: AccountRecord,
	/// Forces the broker to bypass its token cache.
	pub force_refresh: bool,
}

/// Identity of a stored account, as the account store reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountRecord {
	/// Home account identifier (tenant-qualified).
	pub home_account_id: String,
	/// Local account identifier within the target tenant.
	pub local_account_id: String,
	/// Account username (UPN).
	pub username: String,
	/// Environment label recorded alongside the account.
	pub environment: Option<String>,
}

/// Parameters for account-maintenance commands relayed to the broker.
#[derive(Clone, Debug, Default)]
pub struct AccountCommandParameters {
	/// OAuth client identifier whose accounts are addressed.
	pub client_id: String,
	/// Redirect URI registered for the calling application.
	pub redirect_uri: Option<String>,
	/// Account being removed, when the command targets one.
	pub account: Option<AccountRecord>,
	/// Browsers the shared-device removal flow may hand off to.
	pub browser_safe_list: Vec<BrowserDescriptor>,
}
