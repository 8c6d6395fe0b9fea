use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token was sent with a request to a protected endpoint.
    #[error("No token provided")]
    MissingToken,

    /// The token signature is valid but its `exp` claim is in the past.
    #[error("Token expired")]
    TokenExpired,

    /// The token is malformed, signed with another key, or of the wrong kind
    /// (a refresh token presented as an access token, or vice versa).
    #[error("Invalid token")]
    InvalidToken,

    /// The token verified but the user it names no longer exists.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Login attempt with an unknown username or a wrong password.
    ///
    /// Both causes share one message so usernames cannot be probed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration or login without a username or password.
    #[error("Username and password are required")]
    MissingCredentials,

    /// Registration with a username that already exists.
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
}

/// Converts authentication errors into HTTP responses.
///
/// # Returns
/// - 401 Unauthorized - For token problems and bad credentials
/// - 400 Bad Request - For missing credentials
/// - 409 Conflict - For duplicate usernames
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingToken
            | Self::TokenExpired
            | Self::InvalidToken
            | Self::NotAuthenticated
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::UsernameTaken(_) => StatusCode::CONFLICT,
        };

        tracing::debug!("Rejected request: {}", self);

        error_response(status, self.to_string())
    }
}
