// self
use crate::{
	_prelude::*,
	adapter::BrokerRequestAdapter,
	auth,
	params::{AccountCommandParameters, FlowParameters, TokenCommandParameters},
	ui::AuthorizationAgent,
	wire::{
		self, ACCOUNT_CLIENT_ID_KEY, ACCOUNT_HOME_ACCOUNT_ID_KEY, ACCOUNT_REDIRECT_KEY,
		BROKER_REQUEST_KEY, BrokerRequest, CALLER_INFO_UID_KEY,
		CLIENT_ADVERTISED_MAXIMUM_PROTOCOL_VERSION_KEY,
		CLIENT_CONFIGURED_MINIMUM_PROTOCOL_VERSION_KEY, DEFAULT_BROWSER_PACKAGE_NAME_KEY,
		ENVIRONMENT_KEY, PROTOCOL_VERSION_CODE, TransportEnvelope,
	},
};

impl BrokerRequestAdapter {
	/// Converts token command parameters into the flat broker request record.
	///
	/// Both flows share the same translation: scopes are space-joined, the redirect is
	/// the supplied value or derived from the calling application's identity, extras
	/// serialize to a JSON array, the multi-cloud flag echoes the authority's declared
	/// capability, and the authentication scheme runs through the same negotiation as
	/// the inbound path, so an absent scheme ships as bearer. Interactive parameters
	/// additionally carry the login hint, prompt name, and requested agent; silent
	/// parameters carry the stored account identity and force-refresh flag.
	pub fn broker_request_from_parameters(
		&self,
		parameters: &TokenCommandParameters,
	) -> BrokerRequest {
		tracing::info!(
			client_id = %parameters.client_id,
			"Constructing broker request from token command parameters."
		);

		let correlation_id =
			self.diagnostics.correlation_id().unwrap_or(parameters.correlation_id);
		let mut request = BrokerRequest {
			authority: parameters.authority.url.to_string(),
			scope: parameters.scopes.normalized(),
			redirect: self.redirect_uri(parameters),
			client_id: parameters.client_id.clone(),
			claims: parameters.claims_request_json.clone(),
			correlation_id: correlation_id.to_string(),
			application_name: parameters.application_name.clone(),
			application_version: parameters.application_version.clone(),
			sdk_version: parameters.sdk_version.clone(),
			environment: Some(self.environment.get().as_str().to_owned()),
			multiple_clouds_supported: parameters.authority.multiple_clouds_supported(),
			authentication_scheme: Some(auth::negotiate(
				parameters.authentication_scheme.clone(),
				&self.clock_skew,
			)),
			..Default::default()
		};

		match &parameters.flow {
			FlowParameters::Interactive(interactive) => {
				request.username = interactive.login_hint.clone();
				request.extra_query_parameters = (!interactive.extra_query_parameters.is_empty())
					.then(|| wire::query::to_json(&interactive.extra_query_parameters));
				request.prompt = Some(interactive.prompt.wire_name().to_owned());
				request.force_refresh = false;
				request.authorization_agent = Some(
					if interactive.broker_browser_enabled {
						AuthorizationAgent::Browser
					} else {
						AuthorizationAgent::Webview
					}
					.as_str()
					.to_owned(),
				);
			},
			FlowParameters::Silent(silent) => {
				request.home_account_id = Some(silent.account.home_account_id.clone());
				request.local_account_id = Some(silent.account.local_account_id.clone());
				request.username = Some(silent.account.username.clone());
				request.force_refresh = silent.force_refresh;
			},
		}

		request
	}

	/// Populates the protocol-version handshake ("hello") envelope.
	///
	/// Advertises the highest version this client implements and, when the caller
	/// configured one, the minimum version it accepts.
	pub fn write_hello(
		&self,
		minimum_protocol_version: Option<&str>,
		envelope: &mut dyn TransportEnvelope,
	) {
		envelope.put_string(CLIENT_ADVERTISED_MAXIMUM_PROTOCOL_VERSION_KEY, PROTOCOL_VERSION_CODE);

		if let Some(minimum) = minimum_protocol_version.filter(|version| !version.is_empty()) {
			envelope.put_string(CLIENT_CONFIGURED_MINIMUM_PROTOCOL_VERSION_KEY, minimum);
		}
	}

	/// Populates the envelope for a silent token acquisition.
	pub fn write_acquire_token_silent(
		&self,
		parameters: &TokenCommandParameters,
		envelope: &mut dyn TransportEnvelope,
	) -> Result<()> {
		let request = self.broker_request_from_parameters(parameters);

		envelope.put_string(BROKER_REQUEST_KEY, &request.to_json()?);

		if let Some(uid) = parameters.caller_uid {
			envelope.put_int(CALLER_INFO_UID_KEY, uid);
		}

		Ok(())
	}

	/// Populates the envelope for an account enumeration call.
	///
	/// Environment and tenant are deliberately omitted; the broker returns every
	/// account belonging to the client identifier.
	pub fn write_get_accounts(
		&self,
		parameters: &AccountCommandParameters,
		envelope: &mut dyn TransportEnvelope,
	) {
		envelope.put_string(ACCOUNT_CLIENT_ID_KEY, &parameters.client_id);

		if let Some(redirect_uri) = parameters.redirect_uri.as_deref() {
			envelope.put_string(ACCOUNT_REDIRECT_KEY, redirect_uri);
		}
	}

	/// Populates the envelope for removing a single account.
	pub fn write_remove_account(
		&self,
		parameters: &AccountCommandParameters,
		envelope: &mut dyn TransportEnvelope,
	) {
		if let Some(account) = parameters.account.as_ref() {
			envelope.put_string(ACCOUNT_CLIENT_ID_KEY, &parameters.client_id);

			if let Some(environment) = account.environment.as_deref() {
				envelope.put_string(ENVIRONMENT_KEY, environment);
			}

			envelope.put_string(ACCOUNT_HOME_ACCOUNT_ID_KEY, &account.home_account_id);
		}
	}

	/// Populates the envelope for a shared-device account removal.
	///
	/// Browser selection is best-effort: when no safelisted browser is available the
	/// failure is logged, the field is omitted, and the device decides.
	pub fn write_remove_account_from_shared_device(
		&self,
		parameters: &AccountCommandParameters,
		envelope: &mut dyn TransportEnvelope,
	) {
		match self.browser_selector.select(&parameters.browser_safe_list) {
			Ok(browser) =>
				envelope.put_string(DEFAULT_BROWSER_PACKAGE_NAME_KEY, &browser.package_name),
			Err(e) => {
				tracing::warn!(
					error = %e,
					"No safelisted browser available; leaving browser selection to the device."
				);
			},
		}
	}

	fn redirect_uri(&self, parameters: &TokenCommandParameters) -> String {
		match parameters.redirect_uri.as_deref().filter(|uri| !uri.is_empty()) {
			Some(uri) => uri.to_owned(),
			None => self.redirect_resolver.redirect_uri_for(&parameters.application_name),
		}
	}
}
