use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::token::{TokenKind, TokenService},
};

/// Resolves the bearer token of a request to an existing user.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Requires a valid access token naming an existing user.
    ///
    /// Accepts `Authorization: Bearer <token>`; a header without the `Bearer ` prefix is
    /// treated as the raw token.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AuthError::MissingToken)` - No or empty Authorization header
    /// - `Err(AuthError::TokenExpired)` - Access token expired
    /// - `Err(AuthError::InvalidToken)` - Malformed, foreign or refresh token
    /// - `Err(AuthError::NotAuthenticated)` - Token user no longer exists
    /// - `Err(AppError::DbErr)` - Database error while loading the user
    pub async fn require(&self, headers: &HeaderMap) -> Result<User, AppError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify(token, TokenKind::Access)?;

        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_id(claims.user_id).await? else {
            return Err(AuthError::NotAuthenticated.into());
        };

        Ok(user)
    }
}

/// Extracts the token from the Authorization header, if any.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    (!token.is_empty()).then_some(token)
}
