//! Borrow record model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Loan period applied to every new borrow
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Compute the due date for a borrow starting at `borrowed_at`
pub fn due_date(borrowed_at: DateTime<Utc>) -> DateTime<Utc> {
    borrowed_at + Duration::days(LOAN_PERIOD_DAYS)
}

/// Borrow record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    /// A record is active while the book has not been returned
    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// Borrow record joined with book and user for reporting
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecordDetails {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub book_id: i32,
    pub book_title: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// Borrow record query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BorrowRecordQuery {
    /// Substring search on book title or user name
    pub search: Option<String>,
    pub page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_date_is_fourteen_days_out() {
        let borrowed_at = Utc::now();
        assert_eq!(due_date(borrowed_at) - borrowed_at, Duration::days(14));
    }

    #[test]
    fn record_is_active_until_returned() {
        let now = Utc::now();
        let mut record = BorrowRecord {
            id: 1,
            user_id: 1,
            book_id: 1,
            borrowed_at: now,
            due_at: due_date(now),
            returned_at: None,
        };
        assert!(record.is_active());

        record.returned_at = Some(now);
        assert!(!record.is_active());
    }
}
