//! Business logic services

pub mod catalog;
pub mod loans;
pub mod photos;
pub mod subscribers;

use std::sync::Arc;

use crate::{
    config::StorageConfig,
    repository::{AuthorStore, BookStore, LoanStore, Repository, SubscriberStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub subscribers: subscribers::SubscribersService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services backed by the Postgres repositories
    pub fn new(repository: Repository, storage: &StorageConfig) -> Self {
        Self::with_stores(
            Arc::new(repository.books),
            Arc::new(repository.authors),
            Arc::new(repository.subscribers),
            Arc::new(repository.loans),
            storage,
        )
    }

    /// Create all services over arbitrary store implementations
    pub fn with_stores(
        books: Arc<dyn BookStore>,
        authors: Arc<dyn AuthorStore>,
        subscribers: Arc<dyn SubscriberStore>,
        loans: Arc<dyn LoanStore>,
        storage: &StorageConfig,
    ) -> Self {
        let photos = photos::PhotoStorage::new(storage.upload_dir.clone());
        Self {
            catalog: catalog::CatalogService::new(books, authors, photos),
            subscribers: subscribers::SubscribersService::new(subscribers),
            loans: loans::LoansService::new(loans),
        }
    }
}
