//! Gadget factory for creating test gadget entities.
//!
//! Inserts gadget rows directly, bypassing codename generation and lifecycle rules, so
//! tests can start from any state (including terminal ones).

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test gadgets with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::gadget::GadgetFactory;
///
/// let gadget = GadgetFactory::new(&db, user.id)
///     .name("Exploding Gum")
///     .decommissioned()
///     .build()
///     .await?;
/// ```
pub struct GadgetFactory<'a> {
    db: &'a DatabaseConnection,
    owner: Uuid,
    name: String,
    codename: String,
    status: String,
    decommissioned_at: Option<DateTime<Utc>>,
    destroyed_at: Option<DateTime<Utc>>,
}

impl<'a> GadgetFactory<'a> {
    /// Creates a new GadgetFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Gadget {n}"`
    /// - codename: `"Test Codename {n}"` (outside the production pool)
    /// - status: `"Available"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `owner` - User id recorded as both creator and last updater
    pub fn new(db: &'a DatabaseConnection, owner: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            owner,
            name: format!("Gadget {}", id),
            codename: format!("Test Codename {}", id),
            status: "Available".to_string(),
            decommissioned_at: None,
            destroyed_at: None,
        }
    }

    /// Sets the gadget name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the codename.
    pub fn codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = codename.into();
        self
    }

    /// Sets a raw status string without touching the lifecycle timestamps.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Marks the gadget as decommissioned now.
    pub fn decommissioned(mut self) -> Self {
        self.status = "Decommissioned".to_string();
        self.decommissioned_at = Some(Utc::now());
        self
    }

    /// Marks the gadget as destroyed now.
    pub fn destroyed(mut self) -> Self {
        self.status = "Destroyed".to_string();
        self.destroyed_at = Some(Utc::now());
        self
    }

    /// Builds and inserts the gadget entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::gadget::Model)` - Created gadget entity
    /// - `Err(DbErr)` - Database error during insert (e.g. duplicate codename)
    pub async fn build(self) -> Result<entity::gadget::Model, DbErr> {
        let now = Utc::now();
        entity::gadget::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(self.name),
            codename: ActiveValue::Set(self.codename),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            decommissioned_at: ActiveValue::Set(self.decommissioned_at),
            destroyed_at: ActiveValue::Set(self.destroyed_at),
            created_by: ActiveValue::Set(self.owner),
            updated_by: ActiveValue::Set(self.owner),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an Available gadget owned by `owner` with default values.
pub async fn create_gadget(
    db: &DatabaseConnection,
    owner: Uuid,
) -> Result<entity::gadget::Model, DbErr> {
    GadgetFactory::new(db, owner).build().await
}
