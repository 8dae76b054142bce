use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Create a Postgres connection pool from the configured database URL.
///
/// Returns a `sqlx::PgPool` or an error if the pool cannot be created.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Entry point used by the server binary.
pub struct Database;

impl Database {
    /// Connects the pool and brings the schema up to date.
    pub async fn new(config: &Config) -> anyhow::Result<PgPool> {
        let pool = create_pool(config).await?;
        info!(
            "Connected to database (max {} connections)",
            config.max_connections
        );

        run_migrations(&pool).await?;
        info!("Database migrations applied");

        Ok(pool)
    }
}
