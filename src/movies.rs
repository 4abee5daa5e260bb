use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::debug;

use crate::{
    db::now_sec,
    entities::{movie, pg_rating},
    error::{FieldErrors, ServiceError},
    models::{Movie, MovieRecord},
    validation::{RATING_INVALID, TITLE_TAKEN},
};

type ServiceResult<T> = Result<T, ServiceError>;

/// CRUD over the `movies` table. Every read joins the movie's rating.
#[derive(Clone)]
pub struct MovieService {
    db: DatabaseConnection,
}

impl MovieService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, pg_rating_id: Option<i32>) -> ServiceResult<Vec<Movie>> {
        let mut query = movie::Entity::find().order_by_asc(movie::Column::Id);
        if let Some(pg_rating_id) = pg_rating_id {
            query = query.filter(movie::Column::PgRatingId.eq(pg_rating_id));
        }

        let rows = query.find_also_related(pg_rating::Entity).all(&self.db).await?;
        debug!(count = rows.len(), pg_rating_id = ?pg_rating_id, "listed movies");

        Ok(rows.into_iter().map(|(movie, rating)| Movie::joined(movie, rating)).collect())
    }

    pub async fn get(&self, id: i32) -> ServiceResult<Movie> {
        let (movie, rating) = movie::Entity::find_by_id(id)
            .find_also_related(pg_rating::Entity)
            .one(&self.db)
            .await?
            .ok_or(ServiceError::NotFound)?;
        Ok(Movie::joined(movie, rating))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(movie::Entity::find_by_id(id).count(&self.db).await? > 0)
    }

    /// Whether another movie already uses `title`. `ignore_id` excludes the
    /// movie being updated so it can keep its own title.
    pub async fn title_taken(&self, title: &str, ignore_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = movie::Entity::find().filter(movie::Column::Title.eq(title));
        if let Some(id) = ignore_id {
            query = query.filter(movie::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    pub async fn create(&self, record: MovieRecord) -> ServiceResult<Movie> {
        let now = now_sec();
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(record.title),
            description: Set(record.description),
            pg_rating_id: Set(record.pg_rating_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let movie = model.insert(&self.db).await.map_err(constraint_error)?;
        debug!(movie_id = movie.id, pg_rating_id = movie.pg_rating_id, "created movie");

        self.with_rating(movie).await
    }

    pub async fn update(&self, id: i32, record: MovieRecord) -> ServiceResult<Movie> {
        let existing =
            movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(ServiceError::NotFound)?;

        let mut model: movie::ActiveModel = existing.into();
        model.title = Set(record.title);
        model.description = Set(record.description);
        model.pg_rating_id = Set(record.pg_rating_id);
        model.updated_at = Set(now_sec());

        let movie = model.update(&self.db).await.map_err(constraint_error)?;
        debug!(movie_id = movie.id, pg_rating_id = movie.pg_rating_id, "updated movie");

        self.with_rating(movie).await
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound);
        }
        debug!(movie_id = id, "deleted movie");
        Ok(())
    }

    async fn with_rating(&self, movie: movie::Model) -> ServiceResult<Movie> {
        let rating = pg_rating::Entity::find_by_id(movie.pg_rating_id).one(&self.db).await?;
        Ok(Movie::joined(movie, rating))
    }
}

/// Storage constraints are the final word on uniqueness and rating
/// references; report their violations as the matching field errors.
fn constraint_error(err: DbErr) -> ServiceError {
    let (field, message) = match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ("title", TITLE_TAKEN),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ("pg_rating_id", RATING_INVALID),
        _ => return ServiceError::Database(err),
    };
    let mut errors = FieldErrors::new();
    errors.insert(field, message.to_string());
    ServiceError::Invalid(errors)
}
