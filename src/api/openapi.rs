//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, borrow_records, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Lending System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::borrow_book,
        books::return_book,
        // Borrow records
        borrow_records::list_borrow_records,
        borrow_records::get_borrow_record,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            // Auth
            auth::RegisterResponse,
            auth::LoginResponse,
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            authors::AuthorResponse,
            authors::DeleteResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookResponse,
            books::BorrowResponse,
            // Borrow records
            crate::models::borrow_record::BorrowRecord,
            crate::models::borrow_record::BorrowRecordDetails,
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::UpdateUser,
            users::UserResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book catalog and lending"),
        (name = "borrow-records", description = "Borrow record reporting"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
