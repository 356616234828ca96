//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod borrow_records;
pub mod users;

use sqlx::{Pool, Postgres};

/// Fixed page size for all listing endpoints
pub const PAGE_SIZE: i64 = 10;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub borrow_records: borrow_records::BorrowRecordsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrow_records: borrow_records::BorrowRecordsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
