use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050002_create_tutor_periods"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("tutor_periods"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("tutor_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("period")).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("tutor_periods"), Alias::new("tutor_id"))
                            .to(Alias::new("tutors"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tutor_periods_tutor_period")
                    .table(Alias::new("tutor_periods"))
                    .col(Alias::new("tutor_id"))
                    .col(Alias::new("period"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("tutor_periods")).to_owned())
            .await
    }
}
