use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        auth::{CredentialsDto, RefreshTokenDto, TokenPairDto, UserDto},
    },
    server::{
        error::AppError, service::auth::AuthService, state::AppState, util::parse::parse_json,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register an account.
///
/// # Returns
/// - `201 Created` - Account created
/// - `400 Bad Request` - Username or password missing
/// - `409 Conflict` - Username already taken
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = AUTH_TAG,
    request_body = CredentialsDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Username or password missing", body = ErrorDto),
        (status = 409, description = "Username already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = parse_json(payload)?;
    let auth_service = AuthService::new(&state.db, &state.tokens);

    let user = auth_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Log in with username and password.
///
/// Returns a 1 hour access token and a 7 day refresh token.
///
/// # Returns
/// - `200 OK` - Token pair issued
/// - `400 Bad Request` - Username or password missing
/// - `401 Unauthorized` - Invalid credentials
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = CredentialsDto,
    responses(
        (status = 200, description = "Logged in", body = TokenPairDto),
        (status = 400, description = "Username or password missing", body = ErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = parse_json(payload)?;
    let auth_service = AuthService::new(&state.db, &state.tokens);

    let pair = auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(pair.into_dto())))
}

/// Exchange a refresh token for a new access token.
///
/// # Returns
/// - `200 OK` - New access token, same refresh token
/// - `401 Unauthorized` - Refresh token missing, expired or invalid
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "Access token refreshed", body = TokenPairDto),
        (status = 401, description = "Invalid refresh token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = parse_json(payload)?;
    let auth_service = AuthService::new(&state.db, &state.tokens);

    let pair = auth_service.refresh(&payload.refresh_token).await?;

    Ok((StatusCode::OK, Json(pair.into_dto())))
}
