//! Session invalidation signalling.
//!
//! When the gateway hits an irrecoverable authentication failure it clears
//! the credential slot and emits a single session-end event. The application
//! shell registers a hook to return the user to the unauthenticated entry
//! point; the gateway itself knows nothing about navigation.

use std::fmt;
use std::sync::Arc;

/// Why the current session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEndReason {
    /// A 401 was received but no refresh token is stored.
    MissingRefreshToken,
    /// The refresh endpoint rejected the refresh token, the refresh call
    /// failed on the wire, or it exceeded the refresh timeout.
    RefreshFailed,
}

impl fmt::Display for SessionEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEndReason::MissingRefreshToken => write!(f, "missing refresh token"),
            SessionEndReason::RefreshFailed => write!(f, "refresh failed"),
        }
    }
}

/// Hook invoked exactly once per irrecoverable authentication failure.
pub type SessionEndHook = Arc<dyn Fn(SessionEndReason) + Send + Sync>;
