use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::{movie, pg_rating};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PgRating {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<pg_rating::Model> for PgRating {
    fn from(model: pg_rating::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            description: model.description,
            created_at: timestamp(model.created_at),
            updated_at: timestamp(model.updated_at),
        }
    }
}

/// A movie with its rating joined in, as served by the API.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub pg_rating_id: i32,
    pub pg_rating: Option<PgRating>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Movie {
    pub fn joined(movie: movie::Model, rating: Option<pg_rating::Model>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            pg_rating_id: movie.pg_rating_id,
            pg_rating: rating.map(PgRating::from),
            created_at: timestamp(movie.created_at),
            updated_at: timestamp(movie.updated_at),
        }
    }
}

/// Raw create/update payload. Fields stay untyped so that type mistakes are
/// reported per field instead of rejecting the whole body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieInput {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default, alias = "rating_reference")]
    pub pg_rating_id: Option<Value>,
}

impl MovieInput {
    /// Reads the payload from a JSON object. Arrays and scalars never reach
    /// here, so fields cannot be filled by position.
    pub fn from_object(fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(fields))
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "title" => self.title.as_ref(),
            "description" => self.description.as_ref(),
            "pg_rating_id" => self.pg_rating_id.as_ref(),
            _ => None,
        }
    }
}

/// A payload that passed validation: trimmed strings and a resolved rating id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub description: String,
    pub pg_rating_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieFilter {
    #[serde(default, alias = "rating_reference")]
    pub pg_rating_id: Option<String>,
}

impl MovieFilter {
    /// The trimmed filter value, `None` when it is absent or blank.
    pub fn value(&self) -> Option<&str> {
        self.pg_rating_id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// `None` when no filter was given. A value that is not an integer can
    /// never match a rating id and comes back as `Some(None)`.
    pub fn pg_rating(&self) -> Option<Option<i32>> {
        Some(self.value()?.parse().ok())
    }
}

fn timestamp(seconds: i64) -> Timestamp {
    Timestamp::from_second(seconds).unwrap_or(Timestamp::UNIX_EPOCH)
}
