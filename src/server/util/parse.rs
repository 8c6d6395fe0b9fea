use axum::{extract::rejection::JsonRejection, Json};
use uuid::Uuid;

use crate::server::error::{gadget::GadgetError, AppError};

/// Parses a gadget id from a path segment.
///
/// An id that is not a UUID cannot name any gadget, so it is reported the same way as an
/// unknown one.
///
/// # Arguments
/// - `value` - The path segment to parse
///
/// # Returns
/// - `Ok(Uuid)` - Successfully parsed id
/// - `Err(AppError::GadgetErr(NotFound))` - Not a UUID
pub fn parse_gadget_id(value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| GadgetError::NotFound.into())
}

/// Unwraps a JSON body extractor result.
///
/// # Returns
/// - `Ok(T)` - Deserialized body
/// - `Err(AppError::BadRequest)` - Missing content type, malformed JSON, or wrong shape
pub fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Like [`parse_json`], but a request sent without a JSON body yields `T::default()`.
pub fn parse_optional_json<T: Default>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    match payload {
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        payload => parse_json(payload),
    }
}
