//! Protocol adapter for brokered OAuth 2.0/OIDC sign-in—translates strongly-typed command
//! parameters into the versioned broker wire contract and back, covering PKCE generation,
//! authority/cloud resolution, and authentication-scheme negotiation.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapter;
pub mod auth;
pub mod authority;
pub mod authorize;
pub mod error;
pub mod params;
pub mod ui;
pub mod wire;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, BTreeSet},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use serde_json;
pub use url;
