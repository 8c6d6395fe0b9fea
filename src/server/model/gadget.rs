//! Gadget domain models and parameters.
//!
//! Provides the lifecycle status type, the gadget domain model, and the parameter types
//! passed between the controller, service and data layers for gadget operations.

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use crate::model::gadget::{CreateGadgetDto, GadgetDto, UpdateGadgetDto};

/// Lifecycle status of a gadget.
///
/// `Decommissioned` and `Destroyed` are terminal. Any other string is kept verbatim as a
/// `Custom` status; matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GadgetStatus {
    Available,
    Decommissioned,
    Destroyed,
    Custom(String),
}

impl GadgetStatus {
    /// Returns the stored string form of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "Available",
            Self::Decommissioned => "Decommissioned",
            Self::Destroyed => "Destroyed",
            Self::Custom(status) => status,
        }
    }

    /// Whether no further status change is allowed from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Decommissioned | Self::Destroyed)
    }
}

impl From<String> for GadgetStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Available" => Self::Available,
            "Decommissioned" => Self::Decommissioned,
            "Destroyed" => Self::Destroyed,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for GadgetStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for GadgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gadget with full data from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Gadget {
    pub id: Uuid,
    pub name: String,
    /// Assigned once at creation, never changes.
    pub codename: String,
    pub status: GadgetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set exactly when the gadget is decommissioned.
    pub decommissioned_at: Option<DateTime<Utc>>,
    /// Set exactly when the gadget self-destructs.
    pub destroyed_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
}

impl Gadget {
    /// Converts the gadget domain model to a DTO for API responses.
    pub fn into_dto(self) -> GadgetDto {
        GadgetDto {
            id: self.id,
            name: self.name,
            codename: self.codename,
            status: self.status.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            decommissioned_at: self.decommissioned_at,
            destroyed_at: self.destroyed_at,
            created_by: self.created_by,
            updated_by: self.updated_by,
        }
    }

    /// Converts an entity model to a gadget domain model.
    ///
    /// This conversion happens at the data layer boundary so entity models never leak
    /// into service or controller layers.
    pub fn from_entity(entity: entity::gadget::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            codename: entity.codename,
            status: GadgetStatus::from(entity.status),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            decommissioned_at: entity.decommissioned_at,
            destroyed_at: entity.destroyed_at,
            created_by: entity.created_by,
            updated_by: entity.updated_by,
        }
    }
}

/// Parameters for creating a gadget, as received from the API.
///
/// Fields stay optional here; the service decides what is missing or blank.
#[derive(Debug, Clone)]
pub struct CreateGadgetParam {
    pub name: Option<String>,
    pub status: Option<String>,
    /// Principal recorded as creator and last updater.
    pub actor: Uuid,
}

impl CreateGadgetParam {
    pub fn from_dto(dto: CreateGadgetDto, actor: Uuid) -> Self {
        Self {
            name: dto.name,
            status: dto.status,
            actor,
        }
    }
}

/// Parameters for a partial gadget update, as received from the API.
#[derive(Debug, Clone)]
pub struct UpdateGadgetParam {
    pub id: Uuid,
    pub name: Option<String>,
    pub status: Option<String>,
    pub actor: Uuid,
}

impl UpdateGadgetParam {
    pub fn from_dto(id: Uuid, dto: UpdateGadgetDto, actor: Uuid) -> Self {
        Self {
            id,
            name: dto.name,
            status: dto.status,
            actor,
        }
    }
}

/// Validated gadget row to insert.
#[derive(Debug, Clone)]
pub struct NewGadget {
    pub name: String,
    pub codename: String,
    pub status: GadgetStatus,
    pub actor: Uuid,
}

/// Column changes applied by a single update.
///
/// `None` leaves a column untouched. `updated_by` and `updated_at` are always written.
#[derive(Debug, Clone)]
pub struct GadgetChanges {
    pub name: Option<String>,
    pub status: Option<GadgetStatus>,
    pub decommissioned_at: Option<DateTime<Utc>>,
    pub destroyed_at: Option<DateTime<Utc>>,
    pub updated_by: Uuid,
}

impl GadgetChanges {
    /// Changes that only touch the audit columns.
    pub fn by(actor: Uuid) -> Self {
        Self {
            name: None,
            status: None,
            decommissioned_at: None,
            destroyed_at: None,
            updated_by: actor,
        }
    }
}
