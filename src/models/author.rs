//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AuthorQuery {
    /// Substring search on name or bio
    pub search: Option<String>,
    pub page: Option<i64>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 255, message = "Name is required and must be at most 255 characters"))]
    pub name: String,
    pub bio: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

/// Update author request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 255, message = "Name is required and must be at most 255 characters"))]
    pub name: Option<String>,
    pub bio: Option<String>,
    pub birthdate: Option<NaiveDate>,
}
