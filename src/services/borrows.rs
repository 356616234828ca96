//! Borrow and return workflow service

use crate::{
    error::AppResult,
    models::borrow_record::{BorrowRecord, BorrowRecordDetails, BorrowRecordQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book as the given user
    pub async fn borrow(&self, book_id: i32, user_id: i32) -> AppResult<BorrowRecord> {
        self.repository.borrow_records.borrow(book_id, user_id).await
    }

    /// Return a book borrowed by the given user
    pub async fn return_book(&self, book_id: i32, user_id: i32) -> AppResult<BorrowRecord> {
        self.repository.borrow_records.return_book(book_id, user_id).await
    }

    /// Search borrow records with pagination
    pub async fn search(
        &self,
        query: &BorrowRecordQuery,
    ) -> AppResult<(Vec<BorrowRecordDetails>, i64)> {
        self.repository.borrow_records.search(query).await
    }

    /// Get borrow record details by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowRecordDetails> {
        self.repository.borrow_records.get_details_by_id(id).await
    }
}
