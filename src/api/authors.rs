//! Author management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
    repository::PAGE_SIZE,
};

use super::{AuthenticatedUser, PaginatedResponse};

/// Mutation response with a status message
#[derive(Serialize, ToSchema)]
pub struct AuthorResponse {
    pub message: String,
    pub author: Author,
}

/// Deletion response
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// List authors with search and pagination
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Substring search on name or bio"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "List of authors", body = PaginatedResponse<Author>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Json<PaginatedResponse<Author>>> {
    let (authors, total) = state.services.authors.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: authors,
        total,
        page: query.page.unwrap_or(1),
        per_page: PAGE_SIZE,
    }))
}

/// Get author details by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 403, description = "Admin or Librarian privileges required"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<AuthorResponse>)> {
    claims.require_staff()?;
    payload.validate()?;

    let author = state.services.authors.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthorResponse {
            message: "Author created successfully".to_string(),
            author,
        }),
    ))
}

/// Update an existing author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation failure")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAuthor>,
) -> AppResult<Json<AuthorResponse>> {
    claims.require_staff()?;
    payload.validate()?;

    let author = state.services.authors.update(id, payload).await?;

    Ok(Json(AuthorResponse {
        message: "Author updated successfully".to_string(),
        author,
    }))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author deleted", body = DeleteResponse),
        (status = 400, description = "Author has associated books"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    claims.require_staff()?;

    state.services.authors.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Author deleted successfully".to_string(),
    }))
}
