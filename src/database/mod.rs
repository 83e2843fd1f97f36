use sqlx::{postgres::PgPoolOptions, PgPool};

pub mod chirps;
pub mod models;
pub mod refresh_tokens;
pub mod users;

/// Build the connection pool. Connections are established lazily so the
/// process can boot before the database is reachable; the first query pays
/// the connection cost instead.
pub fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(database_url)
}

/// Apply pending schema migrations. Failure is surfaced to the caller; at
/// startup we log and continue so a missing database degrades the service
/// instead of killing it.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
