//! # Tokens
//!
//! Session tokens are HS256 JWTs: `header.claims.signature`, each part
//! base64url without padding, signature is HMAC-SHA256 over `header.claims`.
//! Tokens last 24 hours and carry the user's name, role and display name so
//! the dashboard never needs a user lookup.
//!
//! ## Passwords
//! Stored as bcrypt hashes at cost 12, salt included in the hash string.
//! Hashing takes a few hundred milliseconds, so handlers run it on the
//! blocking pool.
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::{error::AppError, state::State};

type HmacSha256 = Hmac<Sha256>;

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;
const TOKEN_TTL_HOURS: i64 = 24;
const PASSWORD_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer token")]
    Missing,

    #[error("Malformed token")]
    Malformed,

    #[error("Bad token signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Invalid signing key")]
    InvalidKey,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    pub role: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AuthError::InvalidKey)?;

        Ok(Self { mac })
    }

    pub fn issue(&self, username: &str, role: &str, full_name: &str) -> String {
        self.issue_at(username, role, full_name, Utc::now())
    }

    pub fn issue_at(
        &self,
        username: &str,
        role: &str,
        full_name: &str,
        now: DateTime<Utc>,
    ) -> String {
        let claims = Claims {
            username: username.to_string(),
            role: role.to_string(),
            full_name: full_name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        // Serializing a struct of strings and integers can not fail.
        let claims = serde_json::to_vec(&claims).unwrap_or_default();
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER),
            URL_SAFE_NO_PAD.encode(claims)
        );

        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{signing_input}.{signature}")
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut parts = token.split('.');
        let (Some(header), Some(claims), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::Malformed);
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(claims.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let claims = URL_SAFE_NO_PAD
            .decode(claims)
            .map_err(|_| AuthError::Malformed)?;
        let claims: Claims = serde_json::from_slice(&claims).map_err(|_| AuthError::Malformed)?;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, PASSWORD_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// False for a wrong password and for anything that is not a bcrypt hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Claims of a request carrying a valid bearer token.
pub struct AuthUser(pub Claims);

impl FromRequestParts<Arc<State>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<State>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized(AuthError::Missing))?;

        state
            .signer
            .verify(token)
            .map(AuthUser)
            .map_err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret").unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let now = Utc::now();
        let token = signer().issue_at("admin", "lawyer", "আইনজীবী প্রশাসক", now);
        let claims = signer().verify_at(&token, now).unwrap();

        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "lawyer");
        assert_eq!(claims.full_name, "আইনজীবী প্রশাসক");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_token_is_jwt_shaped() {
        let token = signer().issue("admin", "lawyer", "Admin");
        let header = token.split('.').next().unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(URL_SAFE_NO_PAD.decode(header).unwrap(), HEADER.as_bytes());
    }

    #[test]
    fn test_expired() {
        let issued = Utc::now() - Duration::hours(25);
        let token = signer().issue_at("admin", "lawyer", "Admin", issued);

        assert_eq!(signer().verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn test_wrong_secret() {
        let token = signer().issue("admin", "lawyer", "Admin");
        let other = TokenSigner::new("other-secret").unwrap();

        assert_eq!(other.verify(&token), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_tampered_claims() {
        let token = signer().issue("assistant", "assistant", "Assistant");
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();

        let forged = Claims {
            username: "assistant".to_string(),
            role: "admin".to_string(),
            full_name: "Assistant".to_string(),
            iat: 0,
            exp: i64::MAX,
        };
        parts[1] = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());

        assert_eq!(signer().verify(&parts.join(".")), Err(AuthError::BadSignature));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(signer().verify(""), Err(AuthError::Malformed));
        assert_eq!(signer().verify("a.b"), Err(AuthError::Malformed));
        assert_eq!(signer().verify("a.b.c.d"), Err(AuthError::Malformed));
        assert_eq!(signer().verify("a.b.!!!"), Err(AuthError::Malformed));
    }

    #[test]
    fn test_password_round_trip() {
        let stored = hash_password("123456").unwrap();

        assert!(stored.starts_with("$2b$12$"));
        assert!(verify_password("123456", &stored));
        assert!(!verify_password("1234567", &stored));
    }

    #[test]
    fn test_password_salted() {
        assert_ne!(hash_password("123456").unwrap(), hash_password("123456").unwrap());
    }

    #[test]
    fn test_password_bad_hash() {
        assert!(!verify_password("123456", ""));
        assert!(!verify_password("123456", "nosalt"));
        assert!(!verify_password("123456", "zz$zz"));
        assert!(!verify_password("123456", "$2b$12$tooshort"));
    }
}
