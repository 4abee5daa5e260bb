use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{entities::pg_rating, models::PgRating};

/// Read-only access to the seeded PG ratings.
#[derive(Clone)]
pub struct RatingCatalog {
    db: DatabaseConnection,
}

impl RatingCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<PgRating>, DbErr> {
        let ratings = pg_rating::Entity::find()
            .order_by_asc(pg_rating::Column::Id)
            .all(&self.db)
            .await?;
        Ok(ratings.into_iter().map(PgRating::from).collect())
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(pg_rating::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }
}
