use sea_orm::DbErr;
use serde_json::Value;

use crate::{
    catalog::RatingCatalog,
    error::{FieldErrors, ServiceError},
    models::{MovieInput, MovieRecord},
    movies::MovieService,
};

pub const TITLE_REQUIRED: &str = "The movie title is required.";
pub const TITLE_TAKEN: &str = "A movie with this title already exists.";
pub const TITLE_TOO_LONG: &str = "The movie title must not exceed 255 characters.";
pub const DESCRIPTION_REQUIRED: &str = "The description field is required.";
pub const RATING_REQUIRED: &str = "Please select a PG rating.";
pub const RATING_INVALID: &str = "The selected PG rating is invalid.";

pub const TITLE_MAX_CHARS: usize = 255;

#[derive(Clone, Copy, Debug)]
enum Rule {
    Required,
    Text,
    MaxChars(usize),
    Integer,
    UniqueTitle,
    ExistingRating,
}

/// Rules per field, checked in order. Only the first failure of a field is reported.
const MOVIE_RULES: [(&str, &[(Rule, &str)]); 3] = [
    (
        "title",
        &[
            (Rule::Required, TITLE_REQUIRED),
            (Rule::Text, "The movie title must be a string."),
            (Rule::MaxChars(TITLE_MAX_CHARS), TITLE_TOO_LONG),
            (Rule::UniqueTitle, TITLE_TAKEN),
        ],
    ),
    (
        "description",
        &[
            (Rule::Required, DESCRIPTION_REQUIRED),
            (Rule::Text, "The description must be a string."),
        ],
    ),
    (
        "pg_rating_id",
        &[
            (Rule::Required, RATING_REQUIRED),
            (Rule::Integer, RATING_INVALID),
            (Rule::ExistingRating, RATING_INVALID),
        ],
    ),
];

/// Position of `field` in the rule table. Unknown fields sort last.
pub fn field_rank(field: &str) -> usize {
    MOVIE_RULES.iter().position(|(name, _)| *name == field).unwrap_or(MOVIE_RULES.len())
}

/// Checks a create or update payload before anything is written.
pub struct MovieValidator<'a> {
    movies: &'a MovieService,
    catalog: &'a RatingCatalog,
    ignore_id: Option<i32>,
}

impl<'a> MovieValidator<'a> {
    pub fn new(movies: &'a MovieService, catalog: &'a RatingCatalog) -> Self {
        Self { movies, catalog, ignore_id: None }
    }

    /// Lets the movie `id` keep its current title.
    pub fn ignoring(mut self, id: i32) -> Self {
        self.ignore_id = Some(id);
        self
    }

    pub async fn validate(&self, input: &MovieInput) -> Result<MovieRecord, ServiceError> {
        let mut errors = FieldErrors::new();

        for (field, rules) in MOVIE_RULES {
            let value = input.field(field);
            for &(rule, message) in rules {
                if !self.passes(rule, value).await? {
                    errors.insert(field, message.to_string());
                    break;
                }
            }
        }

        let title = input.title.as_ref().and_then(text);
        let description = input.description.as_ref().and_then(text);
        let pg_rating_id = input.pg_rating_id.as_ref().and_then(integer);

        match (title, description, pg_rating_id) {
            (Some(title), Some(description), Some(pg_rating_id)) if errors.is_empty() => {
                Ok(MovieRecord { title, description, pg_rating_id })
            },
            _ => Err(ServiceError::Invalid(errors)),
        }
    }

    async fn passes(&self, rule: Rule, value: Option<&Value>) -> Result<bool, DbErr> {
        let Some(value) = value else {
            return Ok(false);
        };

        let ok = match rule {
            Rule::Required => match value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                Value::Array(items) => !items.is_empty(),
                _ => true,
            },
            Rule::Text => value.is_string(),
            Rule::MaxChars(max) => text(value).is_some_and(|s| s.chars().count() <= max),
            Rule::Integer => integer(value).is_some(),
            Rule::UniqueTitle => match text(value) {
                Some(title) => !self.movies.title_taken(&title, self.ignore_id).await?,
                None => false,
            },
            Rule::ExistingRating => match integer(value) {
                Some(id) => self.catalog.exists(id).await?,
                None => false,
            },
        };
        Ok(ok)
    }
}

fn text(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// JSON integers and numeric strings both count as integers.
fn integer(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::db;

    async fn services() -> (MovieService, RatingCatalog) {
        let conn = db::connect_and_migrate("sqlite::memory:").await.unwrap();
        (MovieService::new(conn.clone()), RatingCatalog::new(conn))
    }

    fn input(value: serde_json::Value) -> MovieInput {
        serde_json::from_value(value).unwrap()
    }

    async fn errors_for(value: serde_json::Value) -> FieldErrors {
        let (movies, catalog) = services().await;
        let result = MovieValidator::new(&movies, &catalog).validate(&input(value)).await;
        match result {
            Err(ServiceError::Invalid(errors)) => errors,
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn fields_rank_in_rule_order() {
        assert!(field_rank("title") < field_rank("description"));
        assert!(field_rank("description") < field_rank("pg_rating_id"));
        assert_eq!(field_rank("runtime"), MOVIE_RULES.len());
    }

    #[tokio::test]
    async fn accepts_and_trims_a_valid_payload() {
        let (movies, catalog) = services().await;
        let record = MovieValidator::new(&movies, &catalog)
            .validate(&input(json!({
                "title": "  Dune ",
                "description": "Desert planet",
                "pg_rating_id": "3",
            })))
            .await
            .unwrap();

        assert_eq!(
            record,
            MovieRecord {
                title: "Dune".into(),
                description: "Desert planet".into(),
                pg_rating_id: 3,
            }
        );
    }

    #[tokio::test]
    async fn reports_every_missing_field() {
        let errors = errors_for(json!({})).await;

        assert_eq!(errors["title"], TITLE_REQUIRED);
        assert_eq!(errors["description"], DESCRIPTION_REQUIRED);
        assert_eq!(errors["pg_rating_id"], RATING_REQUIRED);
    }

    #[tokio::test]
    async fn blank_strings_count_as_missing() {
        let errors = errors_for(json!({
            "title": "   ",
            "description": "",
            "pg_rating_id": null,
        }))
        .await;

        assert_eq!(errors["title"], TITLE_REQUIRED);
        assert_eq!(errors["description"], DESCRIPTION_REQUIRED);
        assert_eq!(errors["pg_rating_id"], RATING_REQUIRED);
    }

    #[tokio::test]
    async fn only_first_failing_rule_is_reported() {
        let errors = errors_for(json!({
            "title": "x".repeat(256),
            "description": 42,
            "pg_rating_id": "not-a-number",
        }))
        .await;

        assert_eq!(errors["title"], TITLE_TOO_LONG);
        assert_eq!(errors["description"], "The description must be a string.");
        assert_eq!(errors["pg_rating_id"], RATING_INVALID);
    }

    #[tokio::test]
    async fn title_length_counts_characters_not_bytes() {
        let (movies, catalog) = services().await;
        let result = MovieValidator::new(&movies, &catalog)
            .validate(&input(json!({
                "title": "é".repeat(255),
                "description": "Accents",
                "pg_rating_id": 1,
            })))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_rating_is_invalid() {
        let errors = errors_for(json!({
            "title": "Dune",
            "description": "Desert planet",
            "pg_rating_id": 99,
        }))
        .await;

        assert_eq!(errors.len(), 1);
        assert_eq!(errors["pg_rating_id"], RATING_INVALID);
    }

    #[tokio::test]
    async fn duplicate_title_is_rejected_except_for_itself() {
        let (movies, catalog) = services().await;
        let payload = input(json!({
            "title": "Dune",
            "description": "Desert planet",
            "pg_rating_id": 3,
        }));

        let record = MovieValidator::new(&movies, &catalog).validate(&payload).await.unwrap();
        let created = movies.create(record).await.unwrap();

        let duplicate = MovieValidator::new(&movies, &catalog).validate(&payload).await;
        assert_matches!(duplicate, Err(ServiceError::Invalid(errors)) => {
            assert_eq!(errors["title"], TITLE_TAKEN);
        });

        let own_title =
            MovieValidator::new(&movies, &catalog).ignoring(created.id).validate(&payload).await;
        assert!(own_title.is_ok());
    }
}
