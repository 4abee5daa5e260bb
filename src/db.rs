use std::collections::HashMap;

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set,
    sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous},
};

use crate::entities::{movie, pg_rating};

const PG_RATINGS: [(&str, &str, &str); 4] = [
    (
        "G",
        "General Audiences",
        "All ages admitted. Nothing that would offend parents for viewing by children.",
    ),
    ("PG", "Parental Guidance Suggested", "Some material may not be suitable for children."),
    ("PG-13", "Parents Strongly Cautioned", "Some material may be inappropriate for children under 13."),
    ("R", "Restricted", "Under 17 requires accompanying parent or adult guardian."),
];

const DEMO_MOVIES: [(&str, &str, &str); 5] = [
    (
        "Inception",
        "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea into the mind of a CEO.",
        "PG-13",
    ),
    (
        "The Godfather",
        "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
        "R",
    ),
    (
        "The Dark Knight",
        "When the menace known as The Joker emerges, Batman must accept one of the greatest psychological and physical tests.",
        "PG-13",
    ),
    (
        "Pulp Fiction",
        "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine in four tales of violence and redemption.",
        "R",
    ),
    (
        "Forrest Gump",
        "The presidencies of Kennedy and Johnson, the Vietnam War, the Watergate scandal and other historical events unfold through the perspective of an Alabama man with an IQ of 75.",
        "PG-13",
    ),
];

pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(database_url);
    // Every pooled connection to `:memory:` would get its own empty database.
    if database_url.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    }
    // Applied by sqlx to every connection the pool opens.
    opts.map_sqlx_sqlite_opts(|sqlite| {
        sqlite.journal_mode(SqliteJournalMode::Wal).synchronous(SqliteSynchronous::Normal)
    });
    let db = Database::connect(opts).await?;

    Migrator::up(&db, None).await?;
    seed_pg_ratings(&db).await?;
    Ok(db)
}

/// Inserts the four PG ratings, unless the catalog already holds any.
pub async fn seed_pg_ratings(db: &DatabaseConnection) -> Result<(), DbErr> {
    if pg_rating::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let now = now_sec();
    let rows = PG_RATINGS.iter().map(|(code, name, description)| pg_rating::ActiveModel {
        id: Default::default(),
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        description: Set(Some(description.to_string())),
        created_at: Set(now),
        updated_at: Set(now),
    });
    pg_rating::Entity::insert_many(rows).exec(db).await?;

    tracing::info!(count = PG_RATINGS.len(), "seeded pg ratings");
    Ok(())
}

/// Inserts the demo movies into an empty movies table.
pub async fn seed_demo_movies(db: &DatabaseConnection) -> Result<(), DbErr> {
    if movie::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let ratings: HashMap<String, i32> = pg_rating::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.code, r.id))
        .collect();

    let now = now_sec();
    let rows: Vec<movie::ActiveModel> = DEMO_MOVIES
        .iter()
        .filter_map(|(title, description, code)| {
            let Some(&pg_rating_id) = ratings.get(*code) else {
                tracing::warn!(code = %code, title = %title, "demo movie rating missing, skipping");
                return None;
            };
            Some(movie::ActiveModel {
                id: Default::default(),
                title: Set(title.to_string()),
                description: Set(description.to_string()),
                pg_rating_id: Set(pg_rating_id),
                created_at: Set(now),
                updated_at: Set(now),
            })
        })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }
    let count = rows.len();
    movie::Entity::insert_many(rows).exec(db).await?;

    tracing::info!(count, "seeded demo movies");
    Ok(())
}

pub fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
