use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "12345";

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    /// Deployment label reported by the health endpoint.
    pub environment: String,

    /// Account created at startup when missing.
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                name: "JWT_SECRET".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "PORT".to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret,
            port,
            environment: optional("APP_ENV", DEFAULT_ENVIRONMENT),
            admin_username: optional("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
            admin_password: optional("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
