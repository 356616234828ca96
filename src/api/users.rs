//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{UpdateUser, User, UserQuery},
    repository::PAGE_SIZE,
};

use super::{authors::DeleteResponse, AuthenticatedUser, PaginatedResponse};

/// Mutation response with a status message
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

/// List users with pagination (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "List of users", body = PaginatedResponse<User>),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<PaginatedResponse<User>>> {
    claims.require_admin()?;

    let (users, total) = state.services.users.list(&query).await?;

    Ok(Json(PaginatedResponse {
        items: users,
        total,
        page: query.page.unwrap_or(1),
        per_page: PAGE_SIZE,
    }))
}

/// Get user details by ID (self or admin)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    claims.require_self_or_admin(id)?;

    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user))
}

/// Update a user (self or admin). Role cannot be changed here.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation failure or duplicate email")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    claims.require_self_or_admin(id)?;
    payload.validate()?;

    let user = state.services.users.update(id, payload).await?;

    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    claims.require_admin()?;

    state.services.users.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
    }))
}
