mod model;
mod server;

use crate::server::{
    config::Config,
    error::AppError,
    router,
    service::{
        codename::CodenameGenerator, confirmation::ConfirmationCodeService, token::TokenService,
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let tokens = TokenService::new(&config.jwt_secret);

    startup::ensure_default_admin(&db, &config, &tokens).await?;

    let state = AppState::new(
        db,
        tokens,
        ConfirmationCodeService::new(),
        CodenameGenerator::new(),
        config.environment.clone(),
    );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!("Backend running on port {}", config.port);
    tracing::info!("API docs at http://localhost:{}/docs", config.port);

    axum::serve(listener, router::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutting down");
}
