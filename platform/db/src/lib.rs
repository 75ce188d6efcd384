//! Database primitives shared by the server binary and the importer.

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Shared connection handle alias.
pub type DbPool = DatabaseConnection;

/// Connection settings, composed from environment parts or a full
/// `DATABASE_URL` override.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub url_override: Option<String>,
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        Self {
            host: env_or("DB_HOST", "localhost"),
            port: std::env::var("POSTGRES_CONNECTION_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(5432),
            user: env_or("POSTGRES_USER", "postgres"),
            password: env_or("POSTGRES_PASSWORD", "postgres"),
            database: env_or("POSTGRES_DB", "hr_pulse"),
            url_override: std::env::var("DATABASE_URL").ok(),
        }
    }

    pub fn dsn(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.database
            ),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

pub async fn connect(settings: &DatabaseSettings) -> Result<DbPool, DbErr> {
    Database::connect(settings.dsn()).await
}
