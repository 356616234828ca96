//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
};

use super::PAGE_SIZE;

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Check if an author exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Search authors by name or bio with pagination
    pub async fn search(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * PAGE_SIZE;
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let (total, authors) = if let Some(ref pattern) = pattern {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM authors WHERE name ILIKE $1 OR bio ILIKE $1",
            )
            .bind(pattern)
            .fetch_one(&self.pool)
            .await?;

            let authors = sqlx::query_as::<_, Author>(
                r#"
                SELECT * FROM authors
                WHERE name ILIKE $1 OR bio ILIKE $1
                ORDER BY id
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(pattern)
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, authors)
        } else {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
                .fetch_one(&self.pool)
                .await?;

            let authors = sqlx::query_as::<_, Author>(
                "SELECT * FROM authors ORDER BY id LIMIT $1 OFFSET $2",
            )
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, authors)
        };

        Ok((authors, total))
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, bio, birthdate)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&author.name)
        .bind(&author.bio)
        .bind(author.birthdate)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing author. Absent fields are left unchanged.
    pub async fn update(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                birthdate = COALESCE($4, birthdate),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&author.name)
        .bind(&author.bio)
        .bind(author.birthdate)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Check if any book references this author
    pub async fn has_books(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE author_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Delete an author
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }

        Ok(())
    }
}
