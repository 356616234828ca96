//! Business logic services

pub mod authors;
pub mod borrows;
pub mod catalog;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowsService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository.clone()),
            users: users::UsersService::new(repository, auth_config),
        }
    }
}
