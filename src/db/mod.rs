use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;

/// Open the connection pool and verify the database answers.
///
/// Pool sizing is modest: catalog pages issue at most a handful of
/// concurrent queries per request. Raw SQL statements are echoed to the
/// log in development only.
///
/// # Errors
///
/// Returns an error when the database is unreachable or refuses the
/// connection.
pub async fn connect(config: &Config) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(&config.database_url);
    opts.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(config.environment.is_development());

    let db = Database::connect(opts).await?;
    db.ping().await?;
    Ok(db)
}
