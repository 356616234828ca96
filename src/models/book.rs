//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Borrowed" => Ok(BookStatus::Borrowed),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

// SQLx conversion for BookStatus (stored as text)
impl sqlx::Type<Postgres> for BookStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub published_date: Option<NaiveDate>,
    pub author_id: i32,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Substring search on title or ISBN
    pub search: Option<String>,
    pub page: Option<i64>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title is required and must be at most 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    pub published_date: Option<NaiveDate>,
    pub author_id: i32,
    pub status: BookStatus,
}

/// Update book request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title is required and must be at most 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub author_id: Option<i32>,
    pub status: Option<BookStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!("Available".parse::<BookStatus>().unwrap(), BookStatus::Available);
        assert_eq!("Borrowed".parse::<BookStatus>().unwrap(), BookStatus::Borrowed);
        assert_eq!(BookStatus::Available.to_string(), "Available");
        assert_eq!(BookStatus::Borrowed.to_string(), "Borrowed");
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("available".parse::<BookStatus>().is_err());
        assert!("Lost".parse::<BookStatus>().is_err());
    }
}
