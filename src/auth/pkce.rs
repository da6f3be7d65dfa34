//! PKCE verifier/challenge generation for authorization-code flows.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

// 48 OS-sourced bytes encode to a 64-character verifier, inside RFC 7636's 43..=128
// unreserved-character window.
const VERIFIER_ENTROPY_BYTES: usize = 48;

/// Supported PKCE challenge transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PkceChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceChallengeMethod::S256 => "S256",
		}
	}
}

/// Verifier/challenge pair binding an authorization code to the requesting client.
///
/// The verifier is retained in-process only; it belongs to the authorization request's
/// local state and is never placed on the broker wire.
#[derive(Clone, PartialEq, Eq)]
pub struct PkceChallenge {
	verifier: String,
	/// Irreversible transform of the verifier sent on the authorize URL.
	pub challenge: String,
	/// Transform used to derive the challenge.
	pub method: PkceChallengeMethod,
}
impl PkceChallenge {
	/// Generates a fresh verifier/challenge pair.
	///
	/// Fails with [`Error::CryptoUnavailable`] when the OS random source cannot be
	/// obtained.
	pub fn generate() -> Result<Self> {
		let mut bytes = [0_u8; VERIFIER_ENTROPY_BYTES];

		OsRng.try_fill_bytes(&mut bytes).map_err(|e| Error::CryptoUnavailable { source: e })?;

		let verifier = URL_SAFE_NO_PAD.encode(bytes);
		let challenge = compute_challenge(&verifier);

		Ok(Self { verifier, challenge, method: PkceChallengeMethod::S256 })
	}

	/// The secret verifier. Callers must keep this value off the broker wire.
	pub fn verifier(&self) -> &str {
		&self.verifier
	}

	/// Checks a candidate verifier against this challenge using the recorded transform.
	pub fn matches(&self, verifier: &str) -> bool {
		match self.method {
			PkceChallengeMethod::S256 => compute_challenge(verifier) == self.challenge,
		}
	}
}
impl Debug for PkceChallenge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PkceChallenge")
			.field("verifier", &"<redacted>")
			.field("challenge", &self.challenge)
			.field("method", &self.method)
			.finish()
	}
}

fn compute_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();

	hasher.update(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(hasher.finalize())
}
