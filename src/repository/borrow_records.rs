//! Borrow records repository for database operations
//!
//! Borrow and return run inside a single transaction with a row-level
//! lock on the book, so concurrent requests for the same book serialize
//! on the status check.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookStatus,
        borrow_record::{due_date, BorrowRecord, BorrowRecordDetails, BorrowRecordQuery},
    },
};

use super::PAGE_SIZE;

#[derive(Clone)]
pub struct BorrowRecordsRepository {
    pool: Pool<Postgres>,
}

impl BorrowRecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow record by ID, joined with book and user
    pub async fn get_details_by_id(&self, id: i32) -> AppResult<BorrowRecordDetails> {
        sqlx::query_as::<_, BorrowRecordDetails>(
            r#"
            SELECT br.id, br.user_id, u.name AS user_name,
                   br.book_id, b.title AS book_title,
                   br.borrowed_at, br.due_at, br.returned_at
            FROM borrow_records br
            JOIN books b ON br.book_id = b.id
            JOIN users u ON br.user_id = u.id
            WHERE br.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// Search borrow records by book title or user name with pagination
    pub async fn search(
        &self,
        query: &BorrowRecordQuery,
    ) -> AppResult<(Vec<BorrowRecordDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * PAGE_SIZE;
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let (total, records) = if let Some(ref pattern) = pattern {
            let total: i64 = sqlx::query_scalar(
                r#"
                SELECT COUNT(*)
                FROM borrow_records br
                JOIN books b ON br.book_id = b.id
                JOIN users u ON br.user_id = u.id
                WHERE b.title ILIKE $1 OR u.name ILIKE $1
                "#,
            )
            .bind(pattern)
            .fetch_one(&self.pool)
            .await?;

            let records = sqlx::query_as::<_, BorrowRecordDetails>(
                r#"
                SELECT br.id, br.user_id, u.name AS user_name,
                       br.book_id, b.title AS book_title,
                       br.borrowed_at, br.due_at, br.returned_at
                FROM borrow_records br
                JOIN books b ON br.book_id = b.id
                JOIN users u ON br.user_id = u.id
                WHERE b.title ILIKE $1 OR u.name ILIKE $1
                ORDER BY br.id
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(pattern)
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, records)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records")
                .fetch_one(&self.pool)
                .await?;

            let records = sqlx::query_as::<_, BorrowRecordDetails>(
                r#"
                SELECT br.id, br.user_id, u.name AS user_name,
                       br.book_id, b.title AS book_title,
                       br.borrowed_at, br.due_at, br.returned_at
                FROM borrow_records br
                JOIN books b ON br.book_id = b.id
                JOIN users u ON br.user_id = u.id
                ORDER BY br.id
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, records)
        };

        Ok((records, total))
    }

    /// Borrow a book for a user.
    ///
    /// Locks the book row, re-checks availability, inserts the borrow
    /// record and flips the status, all in one transaction. At most one
    /// active record per book can exist.
    pub async fn borrow(&self, book_id: i32, user_id: i32) -> AppResult<BorrowRecord> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let status: BookStatus =
            sqlx::query_scalar("SELECT status FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if status != BookStatus::Available {
            return Err(AppError::BusinessRule("Book is currently unavailable".to_string()));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (user_id, book_id, borrowed_at, due_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(now)
        .bind(due_date(now))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(BookStatus::Borrowed)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Return a book borrowed by a user.
    ///
    /// Locks the book row, stamps the active record for (book, user)
    /// and flips the status back, all in one transaction.
    pub async fn return_book(&self, book_id: i32, user_id: i32) -> AppResult<BorrowRecord> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, i32>("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrow_records
            SET returned_at = $1
            WHERE book_id = $2 AND user_id = $3 AND returned_at IS NULL
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::BusinessRule("No active borrow record found for this book".to_string())
        })?;

        sqlx::query("UPDATE books SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(BookStatus::Available)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }
}
