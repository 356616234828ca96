//! Borrow record reporting endpoints (read-only)

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::borrow_record::{BorrowRecordDetails, BorrowRecordQuery},
    repository::PAGE_SIZE,
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List borrow records with search and pagination
#[utoipa::path(
    get,
    path = "/borrow-records",
    tag = "borrow-records",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Substring search on book title or user name"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "List of borrow records", body = PaginatedResponse<BorrowRecordDetails>),
        (status = 403, description = "Admin or Librarian privileges required")
    )
)]
pub async fn list_borrow_records(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BorrowRecordQuery>,
) -> AppResult<Json<PaginatedResponse<BorrowRecordDetails>>> {
    claims.require_staff()?;

    let (records, total) = state.services.borrows.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: records,
        total,
        page: query.page.unwrap_or(1),
        per_page: PAGE_SIZE,
    }))
}

/// Get borrow record details by ID
#[utoipa::path(
    get,
    path = "/borrow-records/{id}",
    tag = "borrow-records",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Borrow record details", body = BorrowRecordDetails),
        (status = 403, description = "Admin or Librarian privileges required"),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn get_borrow_record(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowRecordDetails>> {
    claims.require_staff()?;

    let record = state.services.borrows.get_by_id(id).await?;
    Ok(Json(record))
}
