//! JWT payload decoding.
//!
//! The client never verifies signatures; it only peeks at the payload to
//! recover `email` and `role` when `/auth/me` is unavailable right after login.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use timetable_types::{Role, User};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// A minimal user, if the claims carry both an email and a known role.
    pub fn to_user(&self) -> Option<User> {
        let email = self.email.as_deref().filter(|e| !e.is_empty())?;
        let role: Role = self.role.as_deref()?.parse().ok()?;
        let mut user = User::from_claims(email, role);
        if let Some(id) = &self.user_id {
            user.id = id.clone();
        }
        Some(user)
    }
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    // Tolerate padded payloads from non-standard issuers
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.sig",
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn test_decode_claims() {
        let token = token_with(
            r#"{"user_id": "u1", "email": "lee@uni.ac.ke", "role": "lecturer", "exp": 1900000000}"#,
        );
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("lee@uni.ac.ke"));
        let user = claims.to_user().unwrap();
        assert_eq!(user.role, Role::Lecturer);
        assert_eq!(user.id, "u1");
    }

    #[test]
    fn test_unknown_role_yields_no_user() {
        let token = token_with(r#"{"email": "x@uni.ac.ke", "role": "dean"}"#);
        assert!(decode_claims(&token).unwrap().to_user().is_none());
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(decode_claims("not-a-jwt").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
        assert!(decode_claims(&token_with("not json")).is_none());
    }
}
