//! JWT issuance and verification.
//!
//! Access and refresh tokens are HS256 JWTs signed with the configured secret. The `type`
//! claim keeps the two apart: a refresh token is never accepted where an access token is
//! expected and vice versa.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::error::{auth::AuthError, AppError};

/// Access token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Refresh token lifetime in seconds (7 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a 1 hour access token for `user_id`.
    pub fn issue_access(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue(user_id, TokenKind::Access, ACCESS_TOKEN_TTL_SECS)
    }

    /// Issues a 7 day refresh token for `user_id`.
    pub fn issue_refresh(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue(user_id, TokenKind::Refresh, REFRESH_TOKEN_TTL_SECS)
    }

    /// Verifies the signature, expiry and kind of `token`.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is valid and of the expected kind
    /// - `Err(AuthError::TokenExpired)` - Signature is valid but the token expired
    /// - `Err(AuthError::InvalidToken)` - Malformed, badly signed, or wrong kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        if data.claims.kind != expected {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }

    fn issue(&self, user_id: Uuid, kind: TokenKind, ttl_secs: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id,
            kind,
            iat: now,
            exp: now + ttl_secs,
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }
}
