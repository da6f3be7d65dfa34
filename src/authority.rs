//! Authority parsing and cloud resolution.
//!
//! An authority string names the identity-provider endpoint a request targets. Resolution
//! validates the URL, extracts the tenant and cloud positionally, and keeps the reserved
//! instance-discovery parameters callers pass through extra query parameters.

/// Cloud environment tags and the shared active-environment cell.
pub mod environment;

pub use environment::*;

// self
use crate::{_prelude::*, error::AuthorityError, wire::QueryParam};

// Query keys that steer instance discovery; they are merged onto the authority URL
// instead of being forwarded blindly with the rest of the extras.
const RESERVED_DISCOVERY_KEYS: &[&str] = &["instance_aware", "slice", "dc"];

/// Identity-provider families distinguished by how endpoints derive from the authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
	/// Cloud directory authorities; endpoints derive statically from the authority URL.
	Directory,
	/// On-premises federation services; endpoints require dynamic discovery.
	Federated,
}
impl ProviderFamily {
	/// Returns a stable label suitable for error messages and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderFamily::Directory => "directory",
			ProviderFamily::Federated => "federated",
		}
	}
}
impl Display for ProviderFamily {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Cloud instance derived from the authority host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudInstance {
	/// Worldwide public cloud.
	Worldwide,
	/// China national cloud.
	China,
	/// Germany national cloud.
	Germany,
	/// United States government cloud.
	UsGovernment,
	/// Host outside the well-known table; treated as a sovereign deployment.
	Sovereign(String),
}
impl CloudInstance {
	/// Maps an authority host onto its cloud instance.
	pub fn from_host(host: &str) -> Self {
		match host.to_ascii_lowercase().as_str() {
			"login.microsoftonline.com"
			| "login.windows.net"
			| "login.microsoft.com"
			| "sts.windows.net" => CloudInstance::Worldwide,
			"login.partner.microsoftonline.cn" | "login.chinacloudapi.cn" => CloudInstance::China,
			"login.microsoftonline.de" => CloudInstance::Germany,
			"login.microsoftonline.us" | "login.usgovcloudapi.net" => CloudInstance::UsGovernment,
			other => CloudInstance::Sovereign(other.to_owned()),
		}
	}
}

/// Resolved authority descriptor consumed by request building and the broker adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorityDescriptor {
	/// Canonical authority URL (scheme, host, tenant segment, retained discovery keys).
	pub url: Url,
	/// Tenant path segment extracted from the authority.
	pub tenant: String,
	/// Cloud instance derived from the authority host.
	pub cloud: CloudInstance,
	/// Provider family derived from the tenant segment.
	pub family: ProviderFamily,
	multiple_clouds_supported: bool,
}
impl AuthorityDescriptor {
	/// Parses a raw authority string, merging reserved discovery keys from the supplied
	/// extra query parameters onto the canonical URL.
	///
	/// The multi-cloud flag always starts out false; it reflects the peer's declared
	/// capability and is set explicitly via
	/// [`set_multiple_clouds_supported`](Self::set_multiple_clouds_supported), never
	/// inferred from the URL.
	pub fn resolve(raw: &str, extra_query_params: &[QueryParam]) -> Result<Self> {
		let parsed = Url::parse(raw)
			.map_err(|e| AuthorityError::Malformed { raw: raw.to_owned(), source: e })?;

		if parsed.scheme() != "https" {
			return Err(AuthorityError::InsecureScheme { url: parsed.to_string() }.into());
		}

		let host = parsed.host_str().ok_or_else(|| AuthorityError::Malformed {
			raw: raw.to_owned(),
			source: url::ParseError::EmptyHost,
		})?;
		let tenant = parsed
			.path_segments()
			.and_then(|mut segments| segments.find(|segment| !segment.is_empty()))
			.map(str::to_owned)
			.ok_or_else(|| AuthorityError::MissingTenant { url: parsed.to_string() })?;
		let cloud = CloudInstance::from_host(host);
		let family = if tenant.eq_ignore_ascii_case("adfs") {
			ProviderFamily::Federated
		} else {
			ProviderFamily::Directory
		};
		let mut url = parsed;

		url.set_path(&tenant);
		url.set_query(None);
		url.set_fragment(None);

		{
			let mut pairs = url.query_pairs_mut();

			for param in extra_query_params {
				if RESERVED_DISCOVERY_KEYS.contains(&param.key.as_str()) {
					pairs.append_pair(&param.key, &param.value);
				}
			}
		}

		if url.query().is_some_and(str::is_empty) {
			url.set_query(None);
		}

		Ok(Self { url, tenant, cloud, family, multiple_clouds_supported: false })
	}

	/// Parses an already-normalized authority URL (the inbound path carries no extra
	/// query parameters).
	pub fn resolve_from_url(url: &str) -> Result<Self> {
		Self::resolve(url, &[])
	}

	/// Whether the peer declared multi-cloud discovery support for this authority.
	pub fn multiple_clouds_supported(&self) -> bool {
		self.multiple_clouds_supported
	}

	/// Records the peer's declared multi-cloud capability.
	pub fn set_multiple_clouds_supported(&mut self, supported: bool) {
		self.multiple_clouds_supported = supported;
	}

	/// Authorization endpoint statically derived from the authority.
	///
	/// Federated authorities cannot derive their endpoint without dynamic discovery and
	/// fail with [`Error::NotSupported`].
	pub fn authorization_endpoint(&self) -> Result<Url> {
		match self.family {
			ProviderFamily::Directory => {
				let mut endpoint = self.url.clone();

				endpoint.set_query(None);
				endpoint.set_path(&format!("{}/oauth2/v2.0/authorize", self.tenant));

				Ok(endpoint)
			},
			ProviderFamily::Federated =>
				Err(Error::NotSupported { family: self.family.as_str() }),
		}
	}
}
impl Display for AuthorityDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.url.as_str())
	}
}
