//! Account registration, login and token refresh.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::{DatabaseConnection, SqlErr};

use crate::{
    model::auth::TokenPairDto,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::user::{CreateUserParam, User},
        service::token::{TokenKind, TokenService, ACCESS_TOKEN_TTL_SECS},
    },
};

/// Access and refresh token handed out on login or refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenPair {
    pub fn into_dto(self) -> TokenPairDto {
        TokenPairDto {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
        }
    }
}

/// Service for operator accounts and the tokens that authenticate them.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `tokens` - Token signer shared through application state
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Registers a new account with an argon2id password hash.
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AppError::AuthErr(MissingCredentials))` - Username or password blank
    /// - `Err(AppError::AuthErr(UsernameTaken))` - Username already registered
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let repo = UserRepository::new(self.db);

        if repo.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()).into());
        }

        let param = CreateUserParam {
            username: username.to_string(),
            password_hash: hash_password(password).await?,
        };

        let user = match repo.create(param).await {
            Ok(user) => user,
            // Lost a race with a concurrent registration of the same name.
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(AuthError::UsernameTaken(username.to_string()).into())
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user_id = %user.id, "Registered user {}", user.username);

        Ok(user)
    }

    /// Checks credentials and issues a token pair.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Credentials matched
    /// - `Err(AppError::AuthErr(MissingCredentials))` - Username or password blank
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Unknown user or wrong password
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let repo = UserRepository::new(self.db);

        let user = repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::debug!(user_id = %user.id, "User logged in");

        Ok(TokenPair {
            access_token: self.tokens.issue_access(user.id)?,
            refresh_token: self.tokens.issue_refresh(user.id)?,
            expires_in: ACCESS_TOKEN_TTL_SECS,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The refresh token itself is returned unchanged.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - New access token with the same refresh token
    /// - `Err(AppError::AuthErr(TokenExpired | InvalidToken))` - Refresh token rejected
    /// - `Err(AppError::AuthErr(NotAuthenticated))` - Account no longer exists
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.verify(refresh_token.trim(), TokenKind::Refresh)?;

        let repo = UserRepository::new(self.db);
        let user = repo
            .find_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        Ok(TokenPair {
            access_token: self.tokens.issue_access(user.id)?,
            refresh_token: refresh_token.trim().to_string(),
            expires_in: ACCESS_TOKEN_TTL_SECS,
        })
    }

    /// Creates the account if no user with this username exists yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Account was created
    /// - `Ok(false)` - Account already existed and was left untouched
    /// - `Err(AppError)` - Hashing or database error
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        repo.create(CreateUserParam {
            username: username.to_string(),
            password_hash: hash_password(password).await?,
        })
        .await?;

        Ok(true)
    }
}

/// Hashes a plain password with argon2id and a random salt.
///
/// Runs on the blocking pool so a hash does not stall a runtime worker.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || argon2_hash(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
}

/// Verifies a password against a stored PHC string on the blocking pool.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Wrong password or unparseable hash
/// - `Err(AppError::InternalError)` - Verification task panicked or was cancelled
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || argon2_verify(&password, &hash))
        .await
        .map_err(|e| {
            AppError::InternalError(format!("Password verification task failed: {}", e))
        })
}

fn argon2_hash(password: &str) -> Result<String, AppError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::InternalError(format!("Failed to encode salt: {}", e)))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Unparseable hashes never match.
fn argon2_verify(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
