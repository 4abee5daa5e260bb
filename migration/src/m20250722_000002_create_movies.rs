use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_len(Movies::Title, 255).unique_key())
                    .col(text(Movies::Description))
                    .col(integer(Movies::PgRatingId))
                    .col(big_integer(Movies::CreatedAt))
                    .col(big_integer(Movies::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_pg_rating_id")
                            .from(Movies::Table, Movies::PgRatingId)
                            .to(PgRatings::Table, PgRatings::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_pg_rating_id")
                    .table(Movies::Table)
                    .col(Movies::PgRatingId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    Description,
    PgRatingId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PgRatings {
    Table,
    Id,
}
