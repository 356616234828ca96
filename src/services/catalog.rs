//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookStatus, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        if self.repository.books.isbn_exists(&book.isbn, None).await? {
            return Err(AppError::field_validation("isbn", "The isbn has already been taken"));
        }

        if !self.repository.authors.exists(book.author_id).await? {
            return Err(AppError::field_validation("author_id", "The selected author_id is invalid"));
        }

        self.repository.books.create(&book).await
    }

    /// Update an existing book. ISBN uniqueness excludes the current row.
    pub async fn update(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await?;

        if let Some(ref isbn) = book.isbn {
            if self.repository.books.isbn_exists(isbn, Some(id)).await? {
                return Err(AppError::field_validation("isbn", "The isbn has already been taken"));
            }
        }

        if let Some(author_id) = book.author_id {
            if !self.repository.authors.exists(author_id).await? {
                return Err(AppError::field_validation(
                    "author_id",
                    "The selected author_id is invalid",
                ));
            }
        }

        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Rejected while the book is borrowed.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let book = self.repository.books.get_by_id(id).await?;

        if book.status == BookStatus::Borrowed {
            return Err(AppError::BusinessRule("Cannot delete a borrowed book".to_string()));
        }

        self.repository.books.delete(id).await
    }
}
