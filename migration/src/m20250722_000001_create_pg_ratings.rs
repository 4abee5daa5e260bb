use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PgRatings::Table)
                    .if_not_exists()
                    .col(pk_auto(PgRatings::Id))
                    .col(string_len(PgRatings::Code, 10).unique_key())
                    .col(string_len(PgRatings::Name, 50))
                    .col(text_null(PgRatings::Description))
                    .col(big_integer(PgRatings::CreatedAt))
                    .col(big_integer(PgRatings::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PgRatings::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PgRatings {
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}
