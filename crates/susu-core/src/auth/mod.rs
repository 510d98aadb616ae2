//! Authentication: credential storage, access-token claims, and the
//! authenticated request gateway with single-flight token refresh.

pub mod claims;
pub mod gateway;
pub mod session;
pub mod store;

pub use claims::{AccessClaims, Role};
pub use gateway::AuthGateway;
pub use session::SessionEndReason;
pub use store::{CredentialPair, TokenStore};
