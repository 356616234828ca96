//! Data models for Libris

pub mod author;
pub mod book;
pub mod borrow_record;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookStatus};
pub use borrow_record::{BorrowRecord, BorrowRecordDetails};
pub use user::{Role, User};
