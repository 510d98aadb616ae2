//! Access-token claim decoding.
//!
//! Access tokens are JWTs whose payload is decodable client-side but not
//! verifiable (the signing key lives on the backend). Claims are used only
//! for display and local role routing, never for authorization decisions.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role carried in the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Collector,
    Client,
}

impl Role {
    /// Returns the short display name for this role.
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Collector => "collector",
            Role::Client => "client",
        }
    }
}

/// Claims decoded from an access token payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    /// Subject (collector or client id).
    pub sub: String,
    /// Role of the authenticated user.
    pub role: Role,
    /// Expiry as seconds since epoch.
    pub exp: i64,
}

impl AccessClaims {
    /// Decodes the claims from a token without verifying the signature.
    ///
    /// Returns `None` for anything that is not a well-formed JWT with the
    /// expected claims.
    pub fn decode(token: &str) -> Option<Self> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return None,
        };
        let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&decoded).ok()
    }

    /// Returns true if the token expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    /// Returns the expiry as a UTC timestamp, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_token(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.unverified-signature")
    }

    /// Test: well-formed tokens decode to subject, role and expiry.
    #[test]
    fn test_decode_valid_claims() {
        let token = encode_token(&serde_json::json!({
            "sub": "collector-123",
            "role": "COLLECTOR",
            "exp": 4_102_444_800i64,
        }));

        let claims = AccessClaims::decode(&token).unwrap();
        assert_eq!(claims.sub, "collector-123");
        assert_eq!(claims.role, Role::Collector);
        assert!(!claims.is_expired());
    }

    /// Test: expired tokens are flagged as such.
    #[test]
    fn test_expired_claims() {
        let token = encode_token(&serde_json::json!({
            "sub": "client-9",
            "role": "CLIENT",
            "exp": 1_000_000_000i64,
        }));

        let claims = AccessClaims::decode(&token).unwrap();
        assert_eq!(claims.role, Role::Client);
        assert!(claims.is_expired());
    }

    /// Test: malformed tokens decode to None rather than erroring.
    #[test]
    fn test_decode_rejects_malformed() {
        assert!(AccessClaims::decode("").is_none());
        assert!(AccessClaims::decode("opaque-token").is_none());
        assert!(AccessClaims::decode("a.b").is_none());
        assert!(AccessClaims::decode("a.not-base64!.c").is_none());

        // Valid base64 but missing claims
        let payload = URL_SAFE_NO_PAD.encode(br#"{"foo":"bar"}"#);
        assert!(AccessClaims::decode(&format!("h.{payload}.s")).is_none());
    }
}
