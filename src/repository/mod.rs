//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod loans;
pub mod scan;
pub mod subscribers;

use sqlx::{Pool, Postgres};

pub use authors::{AuthorStore, AuthorsRepository};
pub use books::{BookStore, BooksRepository};
pub use loans::{LoanStore, LoansRepository};
pub use subscribers::{SubscriberStore, SubscribersRepository};

/// Postgres-backed repositories sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub books: BooksRepository,
    pub authors: AuthorsRepository,
    pub subscribers: SubscribersRepository,
    pub loans: LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: BooksRepository::new(pool.clone()),
            authors: AuthorsRepository::new(pool.clone()),
            subscribers: SubscribersRepository::new(pool.clone()),
            loans: LoansRepository::new(pool),
        }
    }
}
