//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

use super::PAGE_SIZE;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Check if an ISBN is already taken, optionally excluding one row
    pub async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND id != $2)")
                .bind(isbn)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Search books by title or ISBN with pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * PAGE_SIZE;
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let (total, books) = if let Some(ref pattern) = pattern {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM books WHERE title ILIKE $1 OR isbn ILIKE $1",
            )
            .bind(pattern)
            .fetch_one(&self.pool)
            .await?;

            let books = sqlx::query_as::<_, Book>(
                r#"
                SELECT * FROM books
                WHERE title ILIKE $1 OR isbn ILIKE $1
                ORDER BY id
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(pattern)
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, books)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
                .fetch_one(&self.pool)
                .await?;

            let books = sqlx::query_as::<_, Book>(
                "SELECT * FROM books ORDER BY id LIMIT $1 OFFSET $2",
            )
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, books)
        };

        Ok((books, total))
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, isbn, published_date, author_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.published_date)
        .bind(book.author_id)
        .bind(book.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing book. Absent fields are left unchanged.
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                isbn = COALESCE($3, isbn),
                published_date = COALESCE($4, published_date),
                author_id = COALESCE($5, author_id),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.published_date)
        .bind(book.author_id)
        .bind(book.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}
