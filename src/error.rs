use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;

use crate::validation;

/// Field name to the first rule message that field failed.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Outcome of a validator or resource service call that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Invalid(FieldErrors),

    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Error returned by the JSON handlers, rendered as `{message, errors}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", summarize(.0))]
    Validation(FieldErrors),

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Failed to {action}")]
    Internal {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0}")]
    Malformed(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let empty = FieldErrors::new();
        let (status, errors) = match &self {
            AppError::Validation(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, &empty),
            AppError::Malformed(_) => (StatusCode::UNPROCESSABLE_ENTITY, &empty),
            AppError::Internal { action, source } => {
                tracing::error!(action = %action, error = ?source, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, &empty)
            },
        };

        let body = json!({
            "message": self.to_string(),
            "errors": errors,
        });

        (status, Json(body)).into_response()
    }
}

/// Attaches the resource name and the attempted action to a service outcome.
pub trait ServiceResultExt<T> {
    fn during(self, resource: &'static str, action: &'static str) -> AppResult<T>;
}

impl<T> ServiceResultExt<T> for Result<T, ServiceError> {
    fn during(self, resource: &'static str, action: &'static str) -> AppResult<T> {
        self.map_err(|err| match err {
            ServiceError::Invalid(errors) => AppError::Validation(errors),
            ServiceError::NotFound => AppError::NotFound { resource },
            ServiceError::Database(source) => AppError::Internal { action, source: source.into() },
        })
    }
}

/// Leads with the message of the first failing field in rule order.
fn summarize(errors: &FieldErrors) -> String {
    let Some((_, first)) = errors.iter().min_by_key(|(field, _)| validation::field_rank(field))
    else {
        return "The given data was invalid.".to_string();
    };
    match errors.len() - 1 {
        0 => first.clone(),
        1 => format!("{first} (and 1 more error)"),
        n => format!("{first} (and {n} more errors)"),
    }
}
