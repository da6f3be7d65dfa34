//! Authorization user-agent selection types and the browser-discovery seam.

// self
use crate::_prelude::*;

/// User-agent surface an interactive authorization runs in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationAgent {
	/// System browser via a custom tab.
	Browser,
	/// Embedded webview; the conservative default on the broker side.
	#[default]
	Webview,
}
impl AuthorizationAgent {
	/// Returns the wire name carried in broker requests.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthorizationAgent::Browser => "BROWSER",
			AuthorizationAgent::Webview => "WEBVIEW",
		}
	}

	/// Case-insensitive check against the browser wire name, matching how peers compare
	/// the requested agent.
	pub fn is_browser_name(name: &str) -> bool {
		name.eq_ignore_ascii_case(AuthorizationAgent::Browser.as_str())
	}
}
impl Display for AuthorizationAgent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Identifies an allow-listed browser by package name and expected signature hashes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserDescriptor {
	/// Package name of the browser application.
	pub package_name: String,
	/// Base64 signature hashes the installed package must match.
	pub signature_hashes: BTreeSet<String>,
	/// Lowest acceptable browser version, when pinned.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version_lower_bound: Option<String>,
	/// Highest acceptable browser version, when pinned.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version_upper_bound: Option<String>,
}
impl BrowserDescriptor {
	/// Creates a descriptor with no version bounds.
	pub fn new<I, S>(package_name: impl Into<String>, signature_hashes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			package_name: package_name.into(),
			signature_hashes: signature_hashes.into_iter().map(Into::into).collect(),
			version_lower_bound: None,
			version_upper_bound: None,
		}
	}
}

/// A concrete browser chosen on the device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Browser {
	/// Package name of the selected browser.
	pub package_name: String,
	/// Installed version, when the platform reports one.
	pub version: Option<String>,
}

/// Best-effort browser discovery seam.
///
/// Implementations inspect the device's installed packages; the adapter only consumes
/// the result in the shared-device account-removal path, where failure is recovered
/// locally.
pub trait BrowserSelector: Send + Sync {
	/// Picks an installed browser matching the safelist, or fails with
	/// [`Error::NoBrowserAvailable`].
	fn select(&self, safe_list: &[BrowserDescriptor]) -> Result<Browser>;
}
