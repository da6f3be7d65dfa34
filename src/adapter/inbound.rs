// self
use crate::{
	_prelude::*,
	adapter::BrokerRequestAdapter,
	auth::{self, CorrelationId, ScopeSet},
	authority::{AuthorityDescriptor, CloudEnvironment},
	authorize::Prompt,
	error::PayloadError,
	params::{
		AccountRecord, FlowParameters, InteractiveParameters, SilentParameters,
		TokenCommandParameters,
	},
	ui::{AuthorizationAgent, BrowserDescriptor},
	wire::{self, BROKER_REQUEST_KEY, BrokerRequest, CALLER_INFO_UID_KEY, TransportEnvelope},
};

impl BrokerRequestAdapter {
	/// Reconstructs interactive command parameters from a received broker envelope.
	///
	/// The authority is re-resolved with the wire's extra query parameters and the
	/// declared multi-cloud flag propagated onto it. A missing correlation id is
	/// generated; the requested authorization agent is subjected to the allowlist
	/// policy (webview is the conservative default); a non-empty wire environment
	/// updates the adapter's active-environment cell as the final step, so no decode
	/// failure can leak an environment write.
	pub fn interactive_parameters_from_envelope(
		&self,
		envelope: &dyn TransportEnvelope,
	) -> Result<TokenCommandParameters> {
		tracing::info!("Reconstructing interactive command parameters from broker envelope.");

		let request = read_broker_request(envelope)?;
		let caller_uid = envelope.get_int(CALLER_INFO_UID_KEY);
		let extra_query_parameters = match request.extra_query_parameters.as_deref() {
			Some(json) if !json.is_empty() => wire::query::from_json(json)?,
			_ => Vec::new(),
		};
		let mut authority = AuthorityDescriptor::resolve(&request.authority, &extra_query_parameters)?;

		authority.set_multiple_clouds_supported(request.multiple_clouds_supported);

		let correlation_id = self.correlation_id_from_wire(&request.correlation_id)?;
		let prompt = request
			.prompt
			.as_deref()
			.map(Prompt::from_str)
			.transpose()?
			.unwrap_or_default();
		let (authorization_agent, broker_browser_enabled, browser_safe_list) =
			self.resolve_agent(&request);
		let authentication_scheme =
			auth::negotiate(request.authentication_scheme.clone(), &self.clock_skew);

		self.apply_environment(request.environment.as_deref())?;

		Ok(TokenCommandParameters {
			client_id: request.client_id,
			scopes: ScopeSet::from_space_joined(&request.scope),
			redirect_uri: Some(request.redirect),
			authority,
			correlation_id,
			application_name: request.application_name,
			application_version: request.application_version,
			sdk_version: request.sdk_version,
			claims_request_json: request.claims,
			authentication_scheme: Some(authentication_scheme),
			required_broker_protocol_version: None,
			caller_uid,
			flow: FlowParameters::Interactive(InteractiveParameters {
				login_hint: request.username,
				prompt,
				extra_query_parameters,
				authorization_agent,
				broker_browser_enabled,
				browser_safe_list,
			}),
		})
	}

	/// Reconstructs silent command parameters from a received broker envelope.
	///
	/// The silent path resolves the authority from the bare URL (no extra query
	/// parameters travel on it) and carries the stored-account identity, claims, and
	/// force-refresh flag straight through. The correlation id is read from the broker
	/// request's fixed field.
	pub fn silent_parameters_from_envelope(
		&self,
		envelope: &dyn TransportEnvelope,
	) -> Result<TokenCommandParameters> {
		tracing::info!("Reconstructing silent command parameters from broker envelope.");

		let request = read_broker_request(envelope)?;
		let caller_uid = envelope.get_int(CALLER_INFO_UID_KEY);
		let mut authority = AuthorityDescriptor::resolve_from_url(&request.authority)?;

		authority.set_multiple_clouds_supported(request.multiple_clouds_supported);

		let correlation_id = self.correlation_id_from_wire(&request.correlation_id)?;
		let authentication_scheme =
			auth::negotiate(request.authentication_scheme.clone(), &self.clock_skew);

		self.apply_environment(request.environment.as_deref())?;

		Ok(TokenCommandParameters {
			client_id: request.client_id,
			scopes: ScopeSet::from_space_joined(&request.scope),
			redirect_uri: Some(request.redirect),
			authority,
			correlation_id,
			application_name: request.application_name,
			application_version: request.application_version,
			sdk_version: request.sdk_version,
			claims_request_json: request.claims,
			authentication_scheme: Some(authentication_scheme),
			required_broker_protocol_version: None,
			caller_uid,
			flow: FlowParameters::Silent(SilentParameters {
				account: AccountRecord {
					home_account_id: request.home_account_id.unwrap_or_default(),
					local_account_id: request.local_account_id.unwrap_or_default(),
					username: request.username.unwrap_or_default(),
					environment: None,
				},
				force_refresh: request.force_refresh,
			}),
		})
	}

	fn correlation_id_from_wire(&self, wire_value: &str) -> Result<CorrelationId> {
		if wire_value.is_empty() {
			let generated = CorrelationId::generate()?;

			tracing::debug!(
				correlation_id = %generated,
				"Generated a correlation id for a request arriving without one."
			);

			return Ok(generated);
		}

		wire_value.parse().map_err(|e| {
			PayloadError::InvalidCorrelationId { value: wire_value.to_owned(), source: e }.into()
		})
	}

	// Webview is forced unless the request asked for the system browser and the caller
	// is the recognized managed application; the managed path gets the fixed safelist.
	fn resolve_agent(
		&self,
		request: &BrokerRequest,
	) -> (AuthorizationAgent, bool, Vec<BrowserDescriptor>) {
		let browser_requested = request
			.authorization_agent
			.as_deref()
			.is_some_and(AuthorizationAgent::is_browser_name);

		if browser_requested && self.policy.is_managed_app(&request.application_name) {
			tracing::info!(
				application = %request.application_name,
				"Allowing the system browser for the managed application."
			);

			(AuthorizationAgent::Browser, true, self.policy.browser_safe_list.clone())
		} else {
			(AuthorizationAgent::Webview, false, Vec::new())
		}
	}

	fn apply_environment(&self, environment: Option<&str>) -> Result<()> {
		if let Some(name) = environment.filter(|name| !name.is_empty()) {
			let environment: CloudEnvironment = name.parse()?;

			tracing::info!(
				%environment,
				"Updating the active cloud environment from the broker payload."
			);
			self.environment.set(environment);
		}

		Ok(())
	}
}

fn read_broker_request(envelope: &dyn TransportEnvelope) -> Result<BrokerRequest> {
	let payload =
		envelope.get_string(BROKER_REQUEST_KEY).ok_or(PayloadError::MissingPayload)?;

	BrokerRequest::from_json(&payload)
}
