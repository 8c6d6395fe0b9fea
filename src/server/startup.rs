use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    service::{auth::AuthService, token::TokenService},
};

const DEFAULT_LOG_FILTER: &str = "info,imf_gadgets=debug";

/// Installs the global tracing subscriber.
///
/// Honours `RUST_LOG` when set, otherwise logs at info level with debug output for this
/// crate.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the configured admin account if it does not exist yet.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Application configuration with the admin credentials
/// - `tokens` - Token service (required by `AuthService`, unused for seeding)
///
/// # Returns
/// - `Ok(())` - Admin account exists
/// - `Err(AppError)` - Failed to hash the password or write the user
pub async fn ensure_default_admin(
    db: &DatabaseConnection,
    config: &Config,
    tokens: &TokenService,
) -> Result<(), AppError> {
    let auth_service = AuthService::new(db, tokens);

    let created = auth_service
        .ensure_user(&config.admin_username, &config.admin_password)
        .await?;

    if created {
        tracing::info!("Created default admin user '{}'", config.admin_username);
    } else {
        tracing::debug!("Admin user '{}' already exists", config.admin_username);
    }

    Ok(())
}
