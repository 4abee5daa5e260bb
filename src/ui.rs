//! Server-rendered movie pages over the validator and resource service.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    AppState,
    error::{FieldErrors, ServiceError},
    models::{Movie, MovieFilter, MovieInput},
    templates,
    validation::TITLE_MAX_CHARS,
};

/// Form field name to the message shown under it.
pub type FormErrors = BTreeMap<&'static str, String>;

/// Key for messages that belong to the form as a whole.
pub const GENERAL: &str = "general";

const LIST_PATH: &str = "/ui/movies";
const SAVE_FAILED: &str = "Failed to save movie. Please try again.";
const LOAD_FAILED: &str = "Failed to fetch movies. Please try again.";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies_page))
        .route("/movies/list", get(movies_fragment))
        .route("/movies/create", get(create_form).post(create_submit))
        .route("/movies/{id}/edit", get(edit_form).post(edit_submit))
        .route("/movies/{id}/delete", get(confirm_delete).post(delete_submit))
}

pub async fn home() -> Redirect {
    Redirect::to(LIST_PATH)
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: String,
}

impl MovieForm {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            description: movie.description.clone(),
            rating: movie.pg_rating_id.to_string(),
        }
    }

    /// Cheap local checks that save a round trip to the validator.
    pub fn precheck(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert("title", "Title is required".to_string());
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.insert("title", "Title must be less than 255 characters".to_string());
        }

        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required".to_string());
        }

        if self.rating.trim().is_empty() {
            errors.insert("rating", "PG Rating is required".to_string());
        }

        errors
    }

    fn to_input(&self) -> MovieInput {
        MovieInput {
            title: Some(Value::from(self.title.trim())),
            description: Some(Value::from(self.description.trim())),
            pg_rating_id: Some(Value::from(self.rating.trim())),
        }
    }
}

/// Maps validator field names onto this form's field names.
pub fn form_errors(server: &FieldErrors) -> FormErrors {
    let mut errors = FormErrors::new();
    for (field, message) in server {
        let local = match *field {
            "title" => "title",
            "description" => "description",
            "pg_rating_id" => "rating",
            _ => continue,
        };
        errors.insert(local, message.clone());
    }
    if errors.is_empty() {
        errors.insert(GENERAL, "Validation failed. Please check your input.".to_string());
    }
    errors
}

async fn movies_page(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> Response {
    match state.catalog.list().await {
        Ok(ratings) => {
            Html(templates::movies_page(&ratings, filter.value())).into_response()
        },
        Err(err) => failure("retrieve PG ratings", err),
    }
}

async fn movies_fragment(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> Response {
    let body = match filter.pg_rating() {
        Some(None) => templates::movie_list_fragment(&[], true),
        pg_rating => match state.movies.list(pg_rating.flatten()).await {
            Ok(movies) => templates::movie_list_fragment(&movies, pg_rating.is_some()),
            Err(err) => {
                error!(error = %err, "failed to list movies");
                templates::error_fragment(LOAD_FAILED)
            },
        },
    };

    let mut resp = Html(body).into_response();
    resp.headers_mut().insert("datastar-selector", HeaderValue::from_static("#content"));
    resp.headers_mut().insert("datastar-mode", HeaderValue::from_static("outer"));
    resp
}

async fn create_form(State(state): State<Arc<AppState>>) -> Response {
    render_form(&state, None, &MovieForm::default(), &FormErrors::new(), StatusCode::OK).await
}

async fn create_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MovieForm>,
) -> Response {
    submit(&state, None, form).await
}

async fn edit_form(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let movie = match load_movie(&state, &id).await {
        Ok(movie) => movie,
        Err(resp) => return resp,
    };
    let form = MovieForm::from_movie(&movie);
    render_form(&state, Some(&movie), &form, &FormErrors::new(), StatusCode::OK).await
}

async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Response {
    let movie = match load_movie(&state, &id).await {
        Ok(movie) => movie,
        Err(resp) => return resp,
    };
    submit(&state, Some(&movie), form).await
}

async fn confirm_delete(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match load_movie(&state, &id).await {
        Ok(movie) => Html(templates::confirm_delete_page(&movie)).into_response(),
        Err(resp) => resp,
    }
}

async fn delete_submit(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<i32>() else {
        return not_found();
    };
    match state.movies.delete(id).await {
        Ok(()) => {
            info!(movie_id = id, "movie deleted from ui");
            Redirect::to(LIST_PATH).into_response()
        },
        Err(ServiceError::NotFound) => not_found(),
        Err(err) => failure("delete movie", err),
    }
}

async fn submit(state: &AppState, existing: Option<&Movie>, form: MovieForm) -> Response {
    let mut errors = form.precheck();
    if !errors.is_empty() {
        return render_form(state, existing, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY).await;
    }

    let input = form.to_input();
    let outcome = match existing {
        Some(movie) => state.update_movie(movie.id, &input).await,
        None => state.store_movie(&input).await,
    };

    let status = match outcome {
        Ok(movie) => {
            info!(movie_id = movie.id, "movie saved from ui");
            return Redirect::to(LIST_PATH).into_response();
        },
        Err(ServiceError::Invalid(server)) => {
            errors = form_errors(&server);
            StatusCode::UNPROCESSABLE_ENTITY
        },
        Err(ServiceError::NotFound) => return not_found(),
        Err(ServiceError::Database(err)) => {
            error!(error = %err, "failed to save movie");
            errors.insert(GENERAL, SAVE_FAILED.to_string());
            StatusCode::INTERNAL_SERVER_ERROR
        },
    };

    render_form(state, existing, &form, &errors, status).await
}

async fn render_form(
    state: &AppState,
    existing: Option<&Movie>,
    form: &MovieForm,
    errors: &FormErrors,
    status: StatusCode,
) -> Response {
    match state.catalog.list().await {
        Ok(ratings) => {
            (status, Html(templates::movie_form_page(existing, form, &ratings, errors)))
                .into_response()
        },
        Err(err) => failure("retrieve PG ratings", err),
    }
}

async fn load_movie(state: &AppState, raw_id: &str) -> Result<Movie, Response> {
    let Ok(id) = raw_id.parse::<i32>() else {
        return Err(not_found());
    };
    match state.movies.get(id).await {
        Ok(movie) => Ok(movie),
        Err(ServiceError::NotFound) => Err(not_found()),
        Err(err) => Err(failure("retrieve movie", err)),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(templates::not_found_page("Movie"))).into_response()
}

fn failure(action: &str, err: impl std::fmt::Display) -> Response {
    error!(action = %action, error = %err, "ui request failed");
    let message = format!("Failed to {action}. Please try again.");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(templates::error_page(&message))).into_response()
}
