use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, State},
    http::{
        HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    response::Response,
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppResult, ServiceError, ServiceResultExt},
    models::{Movie, MovieFilter, MovieInput, PgRating},
};

const MOVIE: &str = "Movie";
const PG_RATING: &str = "PG rating";

/// `axum::Json` with rejections rendered in the API error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with rejections rendered in the API error envelope.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<MovieFilter>,
) -> AppResult<Json<Vec<Movie>>> {
    let pg_rating_id = match filter.pg_rating() {
        None => None,
        Some(Some(id)) => Some(id),
        Some(None) => return Ok(Json(Vec::new())),
    };

    let movies = state.movies.list(pg_rating_id).await.during(MOVIE, "retrieve movies")?;
    Ok(Json(movies))
}

pub async fn show_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    let id = movie_id(&id)?;
    let movie = state.movies.get(id).await.during(MOVIE, "retrieve movie")?;
    Ok(Json(movie))
}

pub async fn store_movie(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let input = movie_input(body)?;
    let movie = state.store_movie(&input).await.during(MOVIE, "create movie")?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<Json<Movie>> {
    let id = movie_id(&id)?;
    let input = movie_input(body)?;
    let movie = state.update_movie(id, &input).await.during(MOVIE, "update movie")?;
    Ok(Json(movie))
}

pub async fn destroy_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = movie_id(&id)?;
    state.movies.delete(id).await.during(MOVIE, "delete movie")?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_pg_ratings(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<PgRating>>> {
    let ratings = state
        .catalog
        .list()
        .await
        .map_err(ServiceError::from)
        .during(PG_RATING, "retrieve PG ratings")?;
    Ok(Json(ratings))
}

/// Stamps the permissive cross-origin headers onto every response.
pub async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

fn movie_input(body: Value) -> AppResult<MovieInput> {
    let Value::Object(fields) = body else {
        return Err(AppError::Malformed("The request body must be a JSON object.".into()));
    };
    MovieInput::from_object(fields).map_err(|err| AppError::Malformed(err.to_string()))
}

/// Ids that are not integers can never resolve to a movie.
fn movie_id(raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| AppError::NotFound { resource: MOVIE })
}

