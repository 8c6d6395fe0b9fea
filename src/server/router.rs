use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, gadget, health},
    error::AppError,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IMF Gadget API",
        description = "Inventory and lifecycle management for IMF field gadgets"
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "gadget", description = "Gadget inventory and self-destruct protocol"),
        (name = "auth", description = "Accounts and tokens"),
        (name = "health", description = "Operational endpoints")
    )
)]
struct ApiDoc;

/// Registers the bearer JWT scheme referenced by protected endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the application router with API docs, CORS and request tracing.
///
/// Swagger UI is served at `/docs`, the OpenAPI document at `/docs.json`. Unknown
/// routes answer 404 with the standard error body.
pub fn router(state: AppState) -> Router {
    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(gadget::get_gadgets, gadget::create_gadget))
        .routes(routes!(
            gadget::get_gadget,
            gadget::update_gadget,
            gadget::decommission_gadget
        ))
        .routes(routes!(gadget::generate_confirmation))
        .routes(routes!(gadget::self_destruct))
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::refresh))
        .routes(routes!(health::health))
        .split_for_parts();

    routes
        .merge(SwaggerUi::new("/docs").url("/docs.json", api))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
