use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GadgetDto {
    pub id: Uuid,
    pub name: String,
    pub codename: String,
    /// `Available`, `Decommissioned`, `Destroyed` or a custom status.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
    pub destroyed_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
}

/// Gadget as returned by read endpoints, with a freshly rolled mission estimate.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissionGadgetDto {
    #[serde(flatten)]
    pub gadget: GadgetDto,
    /// e.g. `"87% success probability"`
    pub mission_success_probability: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct CreateGadgetDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateGadgetDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct SelfDestructDto {
    #[serde(default)]
    pub confirmation: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct GadgetActionDto {
    pub message: String,
    pub gadget: GadgetDto,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationCodeDto {
    pub message: String,
    pub confirmation_code: String,
    /// Human readable lifetime, e.g. `"5 minutes"`.
    pub expires_in: String,
}
