use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{error::error_response, model::gadget::GadgetStatus};

/// Failures of gadget lifecycle operations.
///
/// Every variant maps to a client error; storage faults travel as `AppError::DbErr`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GadgetError {
    /// No gadget with the requested id exists (or the id is not a UUID).
    #[error("Gadget not found")]
    NotFound,

    /// Create request without a name, or with a blank one.
    #[error("Name is required")]
    NameRequired,

    /// Update request that would blank out the name.
    #[error("Name cannot be empty")]
    EmptyName,

    /// Create or update tried to set a terminal status directly.
    #[error("Status '{0}' can only be set by decommissioning or self-destructing the gadget")]
    ReservedStatus(GadgetStatus),

    /// Update of a gadget that already reached a terminal status.
    #[error("Cannot update a {} gadget", .0.as_str().to_lowercase())]
    Terminal(GadgetStatus),

    #[error("Gadget is already decommissioned")]
    AlreadyDecommissioned,

    #[error("Cannot decommission a destroyed gadget")]
    DecommissionDestroyed,

    /// Confirmation code requested for a gadget in a terminal status.
    #[error("Cannot self-destruct a {} gadget", .0.as_str().to_lowercase())]
    SelfDestructUnavailable(GadgetStatus),

    #[error("Confirmation code is required")]
    ConfirmationRequired,

    /// Code absent, mismatched or expired. The cause is deliberately not reported.
    #[error("Invalid or expired confirmation code")]
    InvalidConfirmation,

    #[error("Gadget is already destroyed")]
    AlreadyDestroyed,

    #[error("Cannot destroy a decommissioned gadget")]
    DestroyDecommissioned,

    /// The gadget status changed between read and write.
    #[error("Gadget was modified by another request, please retry")]
    Conflict,

    /// Every codename in the pool is assigned.
    #[error("No codenames available")]
    CodenamesExhausted,
}

/// Converts gadget errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - 503 Service Unavailable - For `CodenamesExhausted`
/// - 400 Bad Request - For validation, confirmation and lifecycle violations
impl IntoResponse for GadgetError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::CodenamesExhausted => {
                tracing::warn!("Codename pool exhausted");
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::BAD_REQUEST,
        };

        error_response(status, self.to_string())
    }
}
