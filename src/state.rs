use sea_orm::DatabaseConnection;

use crate::config::Config;

/// State shared by every request handler through axum's `State` extractor.
///
/// Cloning is cheap: the connection is a pooled handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    #[must_use]
    pub const fn new(db: DatabaseConnection, config: Config) -> Self {
        Self { db, config }
    }
}
