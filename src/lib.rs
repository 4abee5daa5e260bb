pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod movies;
pub mod routes;
pub mod templates;
pub mod ui;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware::map_response,
    routing::get,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    catalog::RatingCatalog,
    config::Config,
    error::ServiceError,
    models::{Movie, MovieInput},
    movies::MovieService,
    validation::MovieValidator,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MovieService,
    pub catalog: RatingCatalog,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: DatabaseConnection) -> Self {
        Self { config, movies: MovieService::new(db.clone()), catalog: RatingCatalog::new(db) }
    }

    /// Validates `input` and stores it as a new movie.
    pub async fn store_movie(&self, input: &MovieInput) -> Result<Movie, ServiceError> {
        let record = MovieValidator::new(&self.movies, &self.catalog).validate(input).await?;
        self.movies.create(record).await
    }

    /// Overwrites movie `id` with `input`. A missing movie is reported before
    /// the payload is looked at.
    pub async fn update_movie(&self, id: i32, input: &MovieInput) -> Result<Movie, ServiceError> {
        if !self.movies.exists(id).await? {
            return Err(ServiceError::NotFound);
        }
        let record =
            MovieValidator::new(&self.movies, &self.catalog).ignoring(id).validate(input).await?;
        self.movies.update(id, record).await
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/", get(ui::home))
        .route("/health", get(routes::health))
        .route("/movies", get(routes::list_movies).post(routes::store_movie))
        .route(
            "/movies/{id}",
            get(routes::show_movie).put(routes::update_movie).delete(routes::destroy_movie),
        )
        .route("/pg-ratings", get(routes::list_pg_ratings))
        .nest("/ui", ui::router())
        .with_state(state)
        .layer(cors)
        .layer(map_response(routes::cors_headers))
        .layer(TraceLayer::new_for_http())
}
