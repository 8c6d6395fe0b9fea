//! Gadget data repository.
//!
//! Provides the persistence operations the lifecycle service relies on: create, find by
//! id, find by codename, list with an optional status filter, and a guarded update by id.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::gadget::{Gadget, GadgetChanges, GadgetStatus, NewGadget};

pub struct GadgetRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GadgetRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a gadget, recording `actor` as creator and last updater.
    ///
    /// # Returns
    /// - `Ok(Gadget)` - The created gadget
    /// - `Err(DbErr)` - Database error, including a unique violation on `codename`
    pub async fn create(&self, gadget: NewGadget) -> Result<Gadget, DbErr> {
        let now = Utc::now();
        let entity = entity::gadget::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(gadget.name),
            codename: ActiveValue::Set(gadget.codename),
            status: ActiveValue::Set(gadget.status.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            decommissioned_at: ActiveValue::Set(None),
            destroyed_at: ActiveValue::Set(None),
            created_by: ActiveValue::Set(gadget.actor),
            updated_by: ActiveValue::Set(gadget.actor),
        }
        .insert(self.db)
        .await?;

        Ok(Gadget::from_entity(entity))
    }

    /// Gets a gadget by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Gadget>, DbErr> {
        let entity = entity::prelude::Gadget::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Gadget::from_entity))
    }

    /// Gets the gadget holding `codename`, if any.
    pub async fn find_by_codename(&self, codename: &str) -> Result<Option<Gadget>, DbErr> {
        let entity = entity::prelude::Gadget::find()
            .filter(entity::gadget::Column::Codename.eq(codename))
            .one(self.db)
            .await?;

        Ok(entity.map(Gadget::from_entity))
    }

    /// Checks whether any gadget already holds `codename`, whatever its status.
    pub async fn codename_exists(&self, codename: &str) -> Result<bool, DbErr> {
        Ok(self.find_by_codename(codename).await?.is_some())
    }

    /// Gets all gadgets in creation order, optionally restricted to an exact status.
    pub async fn find_all(&self, status: Option<&str>) -> Result<Vec<Gadget>, DbErr> {
        let mut query = entity::prelude::Gadget::find();

        if let Some(status) = status {
            query = query.filter(entity::gadget::Column::Status.eq(status));
        }

        let entities = query
            .order_by_asc(entity::gadget::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Gadget::from_entity).collect())
    }

    /// Applies `changes` to the gadget if it still has `expected_status`.
    ///
    /// The status check and the write happen in one UPDATE statement, so two requests that
    /// read the same status cannot both move the gadget to a new one.
    ///
    /// # Returns
    /// - `Ok(Some(Gadget))` - The updated gadget
    /// - `Ok(None)` - No row matched: the gadget is gone or its status changed
    /// - `Err(DbErr)` - Database error during update or re-read
    pub async fn update_by_id(
        &self,
        id: Uuid,
        expected_status: &GadgetStatus,
        changes: GadgetChanges,
    ) -> Result<Option<Gadget>, DbErr> {
        let mut active_model = entity::gadget::ActiveModel {
            updated_at: ActiveValue::Set(Utc::now()),
            updated_by: ActiveValue::Set(changes.updated_by),
            ..Default::default()
        };

        if let Some(name) = changes.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(status) = changes.status {
            active_model.status = ActiveValue::Set(status.to_string());
        }
        if let Some(at) = changes.decommissioned_at {
            active_model.decommissioned_at = ActiveValue::Set(Some(at));
        }
        if let Some(at) = changes.destroyed_at {
            active_model.destroyed_at = ActiveValue::Set(Some(at));
        }

        let result = entity::prelude::Gadget::update_many()
            .set(active_model)
            .filter(entity::gadget::Column::Id.eq(id))
            .filter(entity::gadget::Column::Status.eq(expected_status.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
