use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        gadget::{
            ConfirmationCodeDto, CreateGadgetDto, GadgetActionDto, GadgetDto, MissionGadgetDto,
            SelfDestructDto, UpdateGadgetDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::gadget::{CreateGadgetParam, UpdateGadgetParam},
        service::{gadget::GadgetService, mission},
        state::AppState,
        util::parse::{parse_gadget_id, parse_optional_json},
    },
};

/// Tag for grouping gadget endpoints in OpenAPI documentation
pub static GADGET_TAG: &str = "gadget";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GadgetFilter {
    /// Exact status to match, e.g. `Available`.
    pub status: Option<String>,
}

/// List gadgets.
///
/// Returns every gadget in creation order, optionally filtered by exact status. Each
/// gadget carries a freshly rolled mission success estimate.
///
/// # Returns
/// - `200 OK` - List of gadgets
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/gadgets",
    tag = GADGET_TAG,
    params(GadgetFilter),
    responses(
        (status = 200, description = "Successfully retrieved gadgets", body = Vec<MissionGadgetDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_gadgets(
    State(state): State<AppState>,
    Query(filter): Query<GadgetFilter>,
) -> Result<impl IntoResponse, AppError> {
    let service = GadgetService::new(&state.db, &state.confirmation_codes, &state.codenames);

    let gadgets = service.list(filter.status.as_deref()).await?;

    let dtos: Vec<MissionGadgetDto> = gadgets.into_iter().map(mission::annotate).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create a gadget.
///
/// Assigns a unique codename from the pool and records the caller as creator.
///
/// # Returns
/// - `201 Created` - Successfully created gadget
/// - `400 Bad Request` - Name missing or terminal status requested
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `503 Service Unavailable` - Codename pool exhausted
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/gadgets",
    tag = GADGET_TAG,
    request_body = CreateGadgetDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Successfully created gadget", body = GadgetDto),
        (status = 400, description = "Invalid gadget data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 503, description = "No codenames available", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_gadget(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateGadgetDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require(&headers)
        .await?;
    let payload = parse_optional_json(payload)?;

    let service = GadgetService::new(&state.db, &state.confirmation_codes, &state.codenames);

    let gadget = service
        .create(CreateGadgetParam::from_dto(payload, user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(gadget.into_dto())))
}

/// Get a gadget by id.
///
/// # Returns
/// - `200 OK` - Gadget with a mission success estimate
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `404 Not Found` - No gadget with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/gadgets/{id}",
    tag = GADGET_TAG,
    params(("id" = String, Path, description = "Gadget id (UUID)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully retrieved gadget", body = MissionGadgetDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Gadget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_gadget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens)
        .require(&headers)
        .await?;
    let id = parse_gadget_id(&id)?;

    let service = GadgetService::new(&state.db, &state.confirmation_codes, &state.codenames);

    let gadget = service.get(id).await?;

    Ok((StatusCode::OK, Json(mission::annotate(gadget))))
}

/// Update a gadget.
///
/// Partial update: only the provided fields change. A request without a body only records
/// the caller as updater. Decommissioned and destroyed gadgets cannot be updated, and those
/// statuses cannot be set here.
///
/// # Returns
/// - `200 OK` - Updated gadget
/// - `400 Bad Request` - Blank name, reserved status, or gadget in a terminal state
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `404 Not Found` - No gadget with this id
/// - `409 Conflict` - Gadget status changed concurrently
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    patch,
    path = "/gadgets/{id}",
    tag = GADGET_TAG,
    params(("id" = String, Path, description = "Gadget id (UUID)")),
    request_body = UpdateGadgetDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully updated gadget", body = GadgetDto),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Gadget not found", body = ErrorDto),
        (status = 409, description = "Gadget was modified concurrently", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_gadget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<UpdateGadgetDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require(&headers)
        .await?;
    let id = parse_gadget_id(&id)?;
    let payload = parse_optional_json(payload)?;

    let service = GadgetService::new(&state.db, &state.confirmation_codes, &state.codenames);

    let gadget = service
        .update(UpdateGadgetParam::from_dto(id, payload, user.id))
        .await?;

    Ok((StatusCode::OK, Json(gadget.into_dto())))
}

/// Decommission a gadget.
///
/// # Returns
/// - `200 OK` - Gadget decommissioned
/// - `400 Bad Request` - Gadget already decommissioned or destroyed
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `404 Not Found` - No gadget with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/gadgets/{id}",
    tag = GADGET_TAG,
    params(("id" = String, Path, description = "Gadget id (UUID)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Gadget decommissioned", body = GadgetActionDto),
        (status = 400, description = "Gadget is in a terminal state", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Gadget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn decommission_gadget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require(&headers)
        .await?;
    let id = parse_gadget_id(&id)?;

    let service = GadgetService::new(&state.db, &state.confirmation_codes, &state.codenames);

    let gadget = service.decommission(id, user.id).await?;

    Ok((
        StatusCode::OK,
        Json(GadgetActionDto {
            message: "Gadget decommissioned".to_string(),
            gadget: gadget.into_dto(),
        }),
    ))
}

/// Generate a self-destruct confirmation code.
///
/// The code is valid for 5 minutes and replaces any earlier code for the gadget.
///
/// # Returns
/// - `200 OK` - Code generated
/// - `400 Bad Request` - Gadget is decommissioned or destroyed
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `404 Not Found` - No gadget with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/gadgets/{id}/generate-confirmation",
    tag = GADGET_TAG,
    params(("id" = String, Path, description = "Gadget id (UUID)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Confirmation code generated", body = ConfirmationCodeDto),
        (status = 400, description = "Gadget is in a terminal state", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Gadget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_confirmation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens)
        .require(&headers)
        .await?;
    let id = parse_gadget_id(&id)?;

    let service = GadgetService::new(&state.db, &state.confirmation_codes, &state.codenames);

    let issued = service.generate_confirmation(id).await?;

    Ok((
        StatusCode::OK,
        Json(ConfirmationCodeDto {
            message: "Confirmation code generated".to_string(),
            expires_in: issued.expires_in_label(),
            confirmation_code: issued.code,
        }),
    ))
}

/// Self-destruct a gadget.
///
/// Requires the confirmation code from `generate-confirmation`. The code works once.
///
/// # Returns
/// - `200 OK` - Gadget destroyed
/// - `400 Bad Request` - Missing, invalid or expired code, or gadget in a terminal state
/// - `401 Unauthorized` - Missing, expired or invalid token
/// - `404 Not Found` - No gadget with this id
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/gadgets/{id}/self-destruct",
    tag = GADGET_TAG,
    params(("id" = String, Path, description = "Gadget id (UUID)")),
    request_body = SelfDestructDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Self-destruct sequence initiated", body = GadgetActionDto),
        (status = 400, description = "Invalid confirmation or terminal state", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Gadget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn self_destruct(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<SelfDestructDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens)
        .require(&headers)
        .await?;
    let id = parse_gadget_id(&id)?;
    let payload = parse_optional_json(payload)?;

    let service = GadgetService::new(&state.db, &state.confirmation_codes, &state.codenames);

    let gadget = service
        .self_destruct(id, payload.confirmation.as_deref(), user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(GadgetActionDto {
            message: "Gadget self-destruct sequence initiated successfully".to_string(),
            gadget: gadget.into_dto(),
        }),
    ))
}
