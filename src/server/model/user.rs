//! User domain models.
//!
//! Users are the principals recorded as `createdBy`/`updatedBy` on gadgets. The password
//! hash never leaves the server: `into_dto` drops it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::auth::UserDto;

/// Authenticated operator account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique id, used as the audit reference on gadgets.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses, omitting the hash.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            password_hash: entity.password,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub username: String,
    /// Already-hashed password.
    pub password_hash: String,
}
