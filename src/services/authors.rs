//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search authors with pagination
    pub async fn search(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.search(query).await
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create a new author
    pub async fn create(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    /// Update an existing author
    pub async fn update(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    /// Delete an author. Rejected while any book references the author.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.get_by_id(id).await?;

        if self.repository.authors.has_books(id).await? {
            return Err(AppError::BusinessRule(
                "Cannot delete author with associated books".to_string(),
            ));
        }

        self.repository.authors.delete(id).await
    }
}
