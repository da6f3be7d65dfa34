//! Versioned wire contract exchanged with the broker process.
//!
//! The broker request travels as a JSON object inside a single string-valued field of a
//! flat key/value transport envelope; the remaining keys carry caller identity and the
//! protocol-version handshake fields.

/// Narrow put/get surface over the flat transport envelope.
pub mod envelope;
/// Ordered query-parameter pairs and their JSON codec.
pub mod query;
/// The flat, versioned broker request record.
pub mod request;

pub use envelope::*;
pub use query::QueryParam;
pub use request::*;

/// Envelope key holding the serialized broker request payload.
pub const BROKER_REQUEST_KEY: &str = "broker_request_v2";
/// Envelope key carrying the calling application's OS-assigned uid.
pub const CALLER_INFO_UID_KEY: &str = "caller.info.uid";
/// Envelope key advertising the highest protocol version the client speaks.
pub const CLIENT_ADVERTISED_MAXIMUM_PROTOCOL_VERSION_KEY: &str = "broker.protocol.version.name";
/// Envelope key carrying the minimum protocol version the client accepts.
pub const CLIENT_CONFIGURED_MINIMUM_PROTOCOL_VERSION_KEY: &str =
	"required.broker.protocol.version.name";
/// Envelope key for the client identifier in account-maintenance calls.
pub const ACCOUNT_CLIENT_ID_KEY: &str = "account.clientid.key";
/// Envelope key for the redirect URI in account-maintenance calls.
pub const ACCOUNT_REDIRECT_KEY: &str = "account.redirect";
/// Envelope key for the home account identifier in account-maintenance calls.
pub const ACCOUNT_HOME_ACCOUNT_ID_KEY: &str = "account.home.account.id";
/// Envelope key for the account's environment label.
pub const ENVIRONMENT_KEY: &str = "environment";
/// Envelope key naming the browser package chosen for shared-device flows.
pub const DEFAULT_BROWSER_PACKAGE_NAME_KEY: &str = "default.browser.package.name";
/// Highest broker protocol version this client implements.
pub const PROTOCOL_VERSION_CODE: &str = "3.0";
