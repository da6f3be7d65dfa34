//! Authentication-scheme negotiation (bearer vs. proof-of-possession) and clock-skew
//! correction for signed token requests.

// self
use crate::_prelude::*;

/// Token authentication schemes negotiated between the calling application and the broker.
///
/// The wire encoding carries a `name` discriminator so the decoder dispatches to the
/// correct variant; unknown discriminators fail the decode instead of defaulting.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum AuthenticationScheme {
	/// Plain bearer tokens; requests carry the token verbatim and need no correction.
	Bearer,
	/// Proof-of-possession: a signed, time-sensitive proof accompanies the token.
	#[serde(rename = "PoP")]
	Pop(PopParameters),
}
impl AuthenticationScheme {
	/// Returns the wire discriminator for the scheme.
	pub fn name(&self) -> &'static str {
		match self {
			AuthenticationScheme::Bearer => "Bearer",
			AuthenticationScheme::Pop(_) => "PoP",
		}
	}
}

/// Request-binding material for the proof-of-possession scheme.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PopParameters {
	/// HTTP method of the request the proof will sign.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub http_method: Option<String>,
	/// URL of the resource the proof is bound to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Server nonce echoed into the signed proof.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nonce: Option<String>,
	/// Additional claims the client wants embedded in the signed proof.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_claims: Option<String>,
	/// Clock-skew corrector attached on the receiving side; never serialized.
	#[serde(skip)]
	pub clock_skew: Option<ClockSkewCorrector>,
}

/// Aligns locally generated proof timestamps with the token endpoint's clock.
///
/// The recorded offset is shared across clones, so a corrector attached to a scheme
/// observes updates recorded elsewhere in the same transaction.
#[derive(Clone, Debug, Default)]
pub struct ClockSkewCorrector {
	skew: Arc<Mutex<Duration>>,
}
impl ClockSkewCorrector {
	/// Records the offset between a server-reported timestamp and the local clock.
	pub fn record_server_time(&self, server_now: OffsetDateTime) {
		*self.skew.lock() = OffsetDateTime::now_utc() - server_now;
	}

	/// Currently recorded skew (local minus server).
	pub fn skew(&self) -> Duration {
		*self.skew.lock()
	}

	/// Local "now" shifted onto the server's clock.
	pub fn adjusted_now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc() - self.skew()
	}

	/// Shifts an arbitrary local timestamp onto the server's clock.
	pub fn adjust(&self, local: OffsetDateTime) -> OffsetDateTime {
		local - self.skew()
	}
}

/// Applies the scheme-negotiation policy shared by the outbound and inbound paths.
///
/// An absent scheme defaults to bearer. Proof-of-possession schemes get the supplied
/// corrector attached so signed requests can compensate for observed server offsets;
/// bearer needs no correction.
pub fn negotiate(
	requested: Option<AuthenticationScheme>,
	corrector: &ClockSkewCorrector,
) -> AuthenticationScheme {
	match requested {
		None => AuthenticationScheme::Bearer,
		Some(AuthenticationScheme::Pop(mut pop)) => {
			pop.clock_skew = Some(corrector.clone());

			AuthenticationScheme::Pop(pop)
		},
		Some(scheme) => scheme,
	}
}
