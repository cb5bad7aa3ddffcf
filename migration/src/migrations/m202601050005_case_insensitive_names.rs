use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050005_case_insensitive_names"
    }
}

/// Unique indexes on `LOWER(name)` so the database enforces the same ASCII
/// case-insensitive uniqueness the model lookups assume.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_name_lower \
             ON categories (LOWER(name))",
        )
        .await?;
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_topics_name_lower_period \
             ON topics (LOWER(name), period)",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_topics_name_lower_period")
                    .table(Alias::new("topics"))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_categories_name_lower")
                    .table(Alias::new("categories"))
                    .to_owned(),
            )
            .await
    }
}
