pub mod models;
pub mod test_utils;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config::AppConfig;

/// Opens the connection pool described by `DATABASE_PATH`.
///
/// A value that is already a DSN is used as-is; anything else is treated as a SQLite
/// file path whose parent directory is created on demand.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let config = AppConfig::global().clone();
    if let Some(path) = config.sqlite_file() {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(path).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    let url = config.database_url();

    tracing::info!(url = %url, "Connecting to database");

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    Database::connect(opts).await
}
