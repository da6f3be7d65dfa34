//! Cloud environment targeting for instance discovery.

// self
use crate::{_prelude::*, error::PayloadError};

/// Cloud environments a broker transaction can target for instance discovery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudEnvironment {
	/// Public production cloud.
	#[default]
	Production,
	/// Pre-production validation cloud.
	PreProduction,
}
impl CloudEnvironment {
	/// Returns the wire name carried in broker requests.
	pub const fn as_str(self) -> &'static str {
		match self {
			CloudEnvironment::Production => "Production",
			CloudEnvironment::PreProduction => "PreProduction",
		}
	}
}
impl Display for CloudEnvironment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for CloudEnvironment {
	type Err = PayloadError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Production" => Ok(CloudEnvironment::Production),
			"PreProduction" => Ok(CloudEnvironment::PreProduction),
			other => Err(PayloadError::UnknownEnvironment { name: other.to_owned() }),
		}
	}
}

/// Shared, lock-guarded cloud-environment cell consumed by endpoint discovery.
///
/// This replaces a process-wide global: callers construct one cell per broker
/// transaction, or deliberately share a single cell across transactions when legacy
/// call sites need process-wide behavior. Writes are last-writer-wins; the lock makes
/// each read and write atomic, so concurrent transactions sharing a cell must still be
/// serialized externally or one transaction's environment leaks into another's
/// discovery call.
#[derive(Clone, Debug, Default)]
pub struct ActiveEnvironment {
	inner: Arc<Mutex<CloudEnvironment>>,
}
impl ActiveEnvironment {
	/// Creates a cell seeded with the provided environment.
	pub fn new(environment: CloudEnvironment) -> Self {
		Self { inner: Arc::new(Mutex::new(environment)) }
	}

	/// Currently active environment.
	pub fn get(&self) -> CloudEnvironment {
		*self.inner.lock()
	}

	/// Replaces the active environment.
	pub fn set(&self, environment: CloudEnvironment) {
		*self.inner.lock() = environment;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn wire_names_round_trip() {
		assert_eq!(
			"Production".parse::<CloudEnvironment>().expect("Production should parse."),
			CloudEnvironment::Production,
		);
		assert_eq!(
			"PreProduction".parse::<CloudEnvironment>().expect("PreProduction should parse."),
			CloudEnvironment::PreProduction,
		);
		assert_eq!(CloudEnvironment::PreProduction.as_str(), "PreProduction");
	}

	#[test]
	fn unknown_names_are_rejected() {
		assert!(matches!(
			"Staging".parse::<CloudEnvironment>(),
			Err(PayloadError::UnknownEnvironment { .. }),
		));
	}

	#[test]
	fn cell_updates_are_visible_to_clones() {
		let cell = ActiveEnvironment::default();
		let shared = cell.clone();

		assert_eq!(shared.get(), CloudEnvironment::Production);

		cell.set(CloudEnvironment::PreProduction);

		assert_eq!(shared.get(), CloudEnvironment::PreProduction);
	}
}
