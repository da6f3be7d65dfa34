//! Auth-domain building blocks: correlation ids, PKCE material, scheme negotiation, scopes.

pub mod correlation;
pub mod pkce;
pub mod scheme;
pub mod scope;

pub use correlation::*;
pub use pkce::*;
pub use scheme::*;
pub use scope::*;
