//! # Authentication
//!
//! The `CurrentUser` extractor gating protected routes, plus the argon2id
//! password helpers.
//!
//! ## The Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Authentication                           │
//! │                                                                         │
//! │  Request ──► CurrentUser extractor                                     │
//! │                  │                                                      │
//! │                  ├── session cookie present?                           │
//! │                  ├── token known to the SessionStore?                  │
//! │                  ├── within the TTL?                                   │
//! │                  │                                                      │
//! │          yes ────┤                       ┌──── no to any               │
//! │                  ▼                       ▼                              │
//! │          handler runs            303 See Other → /login                │
//! │          with CurrentUser        (never a bare 401 page)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use std::time::Duration;

use crate::error::ApiError;
use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "mostrador_session";

/// The authenticated user for the current request.
///
/// Carries the session token so handlers can reach back into the
/// `SessionStore` (logout, alert flag).
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: String,
    pub user_id: i64,
    pub username: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| Redirect::to("/login"))?;

        let ttl = Duration::from_secs(state.config.session_ttl_secs);
        let session = state
            .sessions
            .get(&token, ttl)
            .ok_or_else(|| Redirect::to("/login"))?;

        Ok(CurrentUser {
            token,
            user_id: session.user_id,
            username: session.username,
        })
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password for storage (argon2id, random salt, PHC string).
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against its stored hash.
///
/// Any failure (malformed hash included) reads as a mismatch; the caller
/// turns that into the generic login error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("secreto-123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secreto-123", &hash));
        assert!(!verify_password("otro", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("secreto-123").unwrap();
        let b = hash_password("secreto-123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("x", "plaintext-from-old-db"));
        assert!(!verify_password("x", ""));
    }
}
