use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

/// Fresh, fully migrated in-memory database.
///
/// The pool is pinned to a single connection so the in-memory database lives exactly as
/// long as the returned handle.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.min_connections(1)
        .max_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
