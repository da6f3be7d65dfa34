//! Translation between in-process command parameters and the broker wire contract.
//!
//! The adapter is synchronous and stateless per call: every input is already
//! materialized in memory when it runs, and the only shared mutable resource it touches
//! is the [`ActiveEnvironment`] cell it was constructed with (see
//! [`ActiveEnvironment`] for the write semantics).

/// Inbound reconstruction of command parameters from broker envelopes.
pub mod inbound;
/// Outbound construction of broker requests and transport envelopes.
pub mod outbound;

// self
use crate::{
	_prelude::*,
	auth::{ClockSkewCorrector, CorrelationId},
	authority::ActiveEnvironment,
	ui::{BrowserDescriptor, BrowserSelector},
};

const MANAGED_APP_PACKAGE: &str = "com.microsoft.intune";
const SAFELISTED_BROWSER_PACKAGE: &str = "com.android.chrome";
const SAFELISTED_BROWSER_SIGNATURE: &str =
	"7fmduHKTdHHrlMvldlEqAIlSfii1tl35bxj1OXN5Ve8c4lU6URVu4xtSHc3BVZxS6WWJnxMDhIfQN0N0K2NDJg==";

/// Collaborator seam deriving a broker redirect URI from an application identity.
///
/// The derivation is deterministic over the package name and its registered signature;
/// the platform-specific lookup lives outside this crate.
pub trait RedirectUriResolver: Send + Sync {
	/// Returns the redirect URI registered for the calling application.
	fn redirect_uri_for(&self, application_name: &str) -> String;
}

/// Ambient diagnostic context supplying the current request correlation id.
pub trait DiagnosticSource: Send + Sync {
	/// Correlation id active for the current logical request, when one exists.
	fn correlation_id(&self) -> Option<CorrelationId>;
}

/// Allowlist policy controlling when inbound interactive requests may leave the webview.
///
/// This is a narrow, explicit allowlist, not browser discovery: only the named managed
/// application may run in the system browser, and only against the fixed safelist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentPolicy {
	/// Package name of the managed application allowed to use the system browser.
	pub managed_app_package: String,
	/// Fixed browser safelist handed to managed-app browser sessions.
	pub browser_safe_list: Vec<BrowserDescriptor>,
}
impl AgentPolicy {
	/// Case-insensitive check against the managed-application package name.
	pub fn is_managed_app(&self, application_name: &str) -> bool {
		self.managed_app_package.eq_ignore_ascii_case(application_name)
	}
}
impl Default for AgentPolicy {
	fn default() -> Self {
		Self {
			managed_app_package: MANAGED_APP_PACKAGE.into(),
			browser_safe_list: vec![BrowserDescriptor::new(SAFELISTED_BROWSER_PACKAGE, [
				SAFELISTED_BROWSER_SIGNATURE,
			])],
		}
	}
}

/// State-free translator between command parameters and broker requests.
///
/// Owns the collaborator seams both directions share: redirect-URI derivation and the
/// ambient correlation id on the outbound path, browser selection, the clock-skew
/// corrector, the agent allowlist, and the active-environment cell on the inbound path.
#[derive(Clone)]
pub struct BrokerRequestAdapter {
	pub(crate) redirect_resolver: Arc<dyn RedirectUriResolver>,
	pub(crate) diagnostics: Arc<dyn DiagnosticSource>,
	pub(crate) browser_selector: Arc<dyn BrowserSelector>,
	pub(crate) environment: ActiveEnvironment,
	pub(crate) clock_skew: ClockSkewCorrector,
	pub(crate) policy: AgentPolicy,
}
impl BrokerRequestAdapter {
	/// Creates an adapter over the provided collaborator seams with the default agent
	/// policy and a fresh clock-skew corrector.
	pub fn new(
		redirect_resolver: Arc<dyn RedirectUriResolver>,
		diagnostics: Arc<dyn DiagnosticSource>,
		browser_selector: Arc<dyn BrowserSelector>,
		environment: ActiveEnvironment,
	) -> Self {
		Self {
			redirect_resolver,
			diagnostics,
			browser_selector,
			environment,
			clock_skew: ClockSkewCorrector::default(),
			policy: AgentPolicy::default(),
		}
	}

	/// Overrides the agent allowlist policy.
	pub fn with_policy(mut self, policy: AgentPolicy) -> Self {
		self.policy = policy;

		self
	}

	/// Replaces the clock-skew corrector attached to negotiated schemes.
	pub fn with_clock_skew(mut self, corrector: ClockSkewCorrector) -> Self {
		self.clock_skew = corrector;

		self
	}

	/// The active-environment cell this adapter propagates wire environments into.
	pub fn environment(&self) -> &ActiveEnvironment {
		&self.environment
	}

	/// The corrector attached to inbound proof-of-possession schemes.
	pub fn clock_skew(&self) -> &ClockSkewCorrector {
		&self.clock_skew
	}

	/// The agent allowlist policy in effect.
	pub fn policy(&self) -> &AgentPolicy {
		&self.policy
	}
}
impl Debug for BrokerRequestAdapter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BrokerRequestAdapter")
			.field("environment", &self.environment)
			.field("policy", &self.policy)
			.finish()
	}
}
