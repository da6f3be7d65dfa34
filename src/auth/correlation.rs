//! Per-request correlation identifiers threaded across the process boundary.

// crates.io
use rand::{TryRngCore, rngs::OsRng};
use uuid::Uuid;
// self
use crate::_prelude::*;

/// Process-wide, per-request unique identifier used for cross-process tracing.
///
/// Generated when absent on either side of the broker boundary and never regenerated
/// once assigned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);
impl CorrelationId {
	/// Generates a fresh random identifier.
	///
	/// Fails with [`Error::CryptoUnavailable`] when the OS random source cannot be
	/// obtained.
	pub fn generate() -> Result<Self> {
		let mut bytes = [0_u8; 16];

		OsRng.try_fill_bytes(&mut bytes).map_err(|e| Error::CryptoUnavailable { source: e })?;

		Ok(Self(uuid::Builder::from_random_bytes(bytes).into_uuid()))
	}
}
impl Debug for CorrelationId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CorrelationId({})", self.0)
	}
}
impl Display for CorrelationId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}
impl FromStr for CorrelationId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}
