use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::{AppConfig, DatabaseConfig};

pub type DbPool = PgPool;
pub type OrmConn = DatabaseConnection;

fn connect_options(database: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options = match database {
        DatabaseConfig::Url(url) => url.parse::<PgConnectOptions>()?,
        DatabaseConfig::Parts {
            host,
            port,
            user,
            password,
            name,
        } => PgConnectOptions::new()
            .host(host)
            .port(*port)
            .username(user)
            .password(password)
            .database(name),
    };
    Ok(options)
}

/// Create the shared Postgres pool.
pub async fn create_pool(config: &AppConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(connect_options(&config.database)?)
        .await?;
    Ok(pool)
}

/// Wrap the sqlx pool in a SeaORM connection so both share the same connections.
pub fn create_orm_conn(pool: &DbPool) -> OrmConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone())
}

/// Apply the SQL files in `migrations/` that have not run yet.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
