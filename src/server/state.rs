//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Token service for signing and verifying JWTs
//! - Confirmation code vault for self-destruct requests
//! - Codename generator for new gadgets

use sea_orm::DatabaseConnection;

use super::service::{
    codename::CodenameGenerator, confirmation::ConfirmationCodeService, token::TokenService,
};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `TokenService` holds prepared keys
/// - `ConfirmationCodeService` uses `Arc` for shared state, so every clone sees the
///   same pending codes
/// - `CodenameGenerator` is `Copy`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Signs and verifies access and refresh tokens.
    pub tokens: TokenService,

    /// Pending self-destruct confirmation codes, keyed by gadget id.
    ///
    /// Held only in memory; codes do not survive a restart.
    pub confirmation_codes: ConfirmationCodeService,

    /// Source of codenames for newly created gadgets.
    pub codenames: CodenameGenerator,

    /// Deployment label reported by the health endpoint.
    pub environment: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `tokens` - Token service built from the configured secret
    /// - `confirmation_codes` - Confirmation code vault
    /// - `codenames` - Codename generator
    /// - `environment` - Deployment label
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        tokens: TokenService,
        confirmation_codes: ConfirmationCodeService,
        codenames: CodenameGenerator,
        environment: String,
    ) -> Self {
        Self {
            db,
            tokens,
            confirmation_codes,
            codenames,
            environment,
        }
    }
}
