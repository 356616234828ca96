//! Book catalog and borrow/return endpoints

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
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        borrow_record::BorrowRecord,
    },
    repository::PAGE_SIZE,
};

use super::{authors::DeleteResponse, AuthenticatedUser, PaginatedResponse};

/// Mutation response with a status message
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

/// Borrow/return response carrying the affected record
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub message: String,
    pub borrow_record: BorrowRecord,
}

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("search" = Option<String>, Query, description = "Substring search on title or ISBN"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<Book>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<Book>>> {
    let (books, total) = state.services.catalog.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: books,
        total,
        page: query.page.unwrap_or(1),
        per_page: PAGE_SIZE,
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 403, description = "Admin or Librarian privileges required"),
        (status = 422, description = "Validation failure or duplicate ISBN")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    claims.require_staff()?;
    payload.validate()?;

    let book = state.services.catalog.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Book created successfully".to_string(),
            book,
        }),
    ))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Validation failure or duplicate ISBN")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    claims.require_staff()?;
    payload.validate()?;

    let book = state.services.catalog.update(id, payload).await?;

    Ok(Json(BookResponse {
        message: "Book updated successfully".to_string(),
        book,
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 400, description = "Book is currently borrowed"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    claims.require_staff()?;

    state.services.catalog.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Book deleted successfully".to_string(),
    }))
}

/// Borrow a book as the current user
#[utoipa::path(
    post,
    path = "/books/{id}/borrow",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book borrowed", body = BorrowResponse),
        (status = 400, description = "Book is currently unavailable"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowResponse>> {
    let record = state.services.borrows.borrow(id, claims.user_id).await?;

    Ok(Json(BorrowResponse {
        message: "Book borrowed successfully".to_string(),
        borrow_record: record,
    }))
}

/// Return a book borrowed by the current user
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = BorrowResponse),
        (status = 400, description = "No active borrow record for this book"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowResponse>> {
    let record = state.services.borrows.return_book(id, claims.user_id).await?;

    Ok(Json(BorrowResponse {
        message: "Book returned successfully".to_string(),
        borrow_record: record,
    }))
}
