#![allow(dead_code)]

// std
use std::sync::Arc;
// self
use oauth2_broker_protocol::{
	adapter::{BrokerRequestAdapter, DiagnosticSource, RedirectUriResolver},
	auth::{CorrelationId, ScopeSet},
	authority::{ActiveEnvironment, AuthorityDescriptor},
	authorize::Prompt,
	error::Result,
	params::{
		AccountRecord, FlowParameters, InteractiveParameters, SilentParameters,
		TokenCommandParameters,
	},
	ui::{AuthorizationAgent, Browser, BrowserDescriptor, BrowserSelector},
	wire::{BROKER_REQUEST_KEY, BrokerRequest, CALLER_INFO_UID_KEY, MemoryEnvelope, TransportEnvelope},
};

pub const CLIENT_ID: &str = "abc";
pub const AUTHORITY: &str = "https://login.example.com/common";
pub const APP_NAME: &str = "com.example.app";

/// Derives a deterministic redirect URI from the application identity, standing in for
/// the platform's signature-based derivation.
pub struct StaticRedirectResolver;
impl RedirectUriResolver for StaticRedirectResolver {
	fn redirect_uri_for(&self, application_name: &str) -> String {
		format!("msauth://{application_name}/fixture-signature")
	}
}

/// Diagnostic context pinned to an optional fixed correlation id.
pub struct StaticDiagnostics(pub Option<CorrelationId>);
impl DiagnosticSource for StaticDiagnostics {
	fn correlation_id(&self) -> Option<CorrelationId> {
		self.0
	}
}

/// Browser seam returning a fixed browser, or failing when none is installed.
pub struct StubBrowserSelector {
	pub installed: Option<Browser>,
}
impl BrowserSelector for StubBrowserSelector {
	fn select(&self, safe_list: &[BrowserDescriptor]) -> Result<Browser> {
		let browser = self
			.installed
			.clone()
			.ok_or(oauth2_broker_protocol::error::Error::NoBrowserAvailable)?;

		if safe_list.iter().any(|descriptor| descriptor.package_name == browser.package_name) {
			Ok(browser)
		} else {
			Err(oauth2_broker_protocol::error::Error::NoBrowserAvailable)
		}
	}
}

/// Adapter wired to the stub collaborators and a fresh environment cell.
pub fn test_adapter() -> BrokerRequestAdapter {
	adapter_with_browser(None)
}

/// Adapter whose browser seam reports the provided installed browser.
pub fn adapter_with_browser(installed: Option<Browser>) -> BrokerRequestAdapter {
	BrokerRequestAdapter::new(
		Arc::new(StaticRedirectResolver),
		Arc::new(StaticDiagnostics(None)),
		Arc::new(StubBrowserSelector { installed }),
		ActiveEnvironment::default(),
	)
}

/// Interactive command parameters mirroring a plain, non-managed calling application.
pub fn interactive_parameters(scopes: &[&str]) -> TokenCommandParameters {
	TokenCommandParameters {
		client_id: CLIENT_ID.into(),
		scopes: ScopeSet::new(scopes.iter().copied())
			.expect("Scope fixture should be valid."),
		redirect_uri: None,
		authority: AuthorityDescriptor::resolve_from_url(AUTHORITY)
			.expect("Authority fixture should resolve."),
		correlation_id: CorrelationId::generate()
			.expect("Correlation id fixture should generate."),
		application_name: APP_NAME.into(),
		application_version: "1.2.3".into(),
		sdk_version: "5.0.0".into(),
		claims_request_json: None,
		authentication_scheme: None,
		required_broker_protocol_version: None,
		caller_uid: None,
		flow: FlowParameters::Interactive(InteractiveParameters {
			login_hint: Some("user@example.com".into()),
			prompt: Prompt::None,
			extra_query_parameters: Vec::new(),
			authorization_agent: AuthorizationAgent::Webview,
			broker_browser_enabled: false,
			browser_safe_list: Vec::new(),
		}),
	}
}

/// Silent command parameters carrying a stored-account identity.
pub fn silent_parameters(force_refresh: bool) -> TokenCommandParameters {
	let mut parameters = interactive_parameters(&["User.Read"]);

	parameters.flow = FlowParameters::Silent(SilentParameters {
		account: AccountRecord {
			home_account_id: "uid.utid".into(),
			local_account_id: "local-account".into(),
			username: "user@example.com".into(),
			environment: Some("login.example.com".into()),
		},
		force_refresh,
	});

	parameters
}

/// Wraps a broker request into the transport envelope the inbound paths expect.
pub fn envelope_with(request: &BrokerRequest) -> MemoryEnvelope {
	let mut envelope = MemoryEnvelope::new();

	envelope.put_string(
		BROKER_REQUEST_KEY,
		&request.to_json().expect("Broker request fixture should serialize."),
	);
	envelope.put_int(CALLER_INFO_UID_KEY, 10_071);

	envelope
}

/// Minimal wire record targeting the fixture authority.
pub fn wire_request() -> BrokerRequest {
	BrokerRequest {
		authority: AUTHORITY.into(),
		scope: "User.Read".into(),
		redirect: format!("msauth://{APP_NAME}/fixture-signature"),
		client_id: CLIENT_ID.into(),
		application_name: APP_NAME.into(),
		application_version: "1.2.3".into(),
		sdk_version: "5.0.0".into(),
		..Default::default()
	}
}
