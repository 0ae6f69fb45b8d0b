//! Catalog service: books and authors

use std::sync::Arc;

use super::photos::{PhotoOwner, PhotoStorage};
use crate::{
    error::AppResult,
    models::{
        author::{validate_author_data, Author, AuthorBook, AuthorData, AuthorWithBooks},
        book::{validate_book_data, BookAuthorInfo, BookData},
    },
    repository::{AuthorStore, BookStore},
};

#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
    photos: PhotoStorage,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>, authors: Arc<dyn AuthorStore>, photos: PhotoStorage) -> Self {
        Self { books, authors, photos }
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    pub async fn list_books(&self) -> AppResult<Vec<BookAuthorInfo>> {
        self.books.list().await
    }

    pub async fn search_books(&self, query: &str) -> AppResult<Vec<BookAuthorInfo>> {
        self.books.search(query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookAuthorInfo> {
        self.books.get_by_id(id).await
    }

    /// Validate and insert a book, returning its id
    pub async fn create_book(&self, book: &BookData) -> AppResult<i32> {
        validate_book_data(book)?;
        let id = self.books.create(book).await?;
        tracing::info!("Created book {} ({:?})", id, book.title);
        Ok(id)
    }

    pub async fn update_book(&self, id: i32, book: &BookData) -> AppResult<()> {
        validate_book_data(book)?;
        self.books.update(id, book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.books.delete(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    /// Store a book cover and record its path; returns the path
    pub async fn upload_book_photo(&self, id: i32, content: &[u8]) -> AppResult<String> {
        // Unknown ids fail before anything touches the disk
        self.books.get_by_id(id).await?;
        let path = self.photos.path_for(PhotoOwner::Book, id);
        // The column only ever points at a file that was written
        self.photos.save(&path, content).await?;
        self.books.set_photo(id, &path).await?;
        Ok(path)
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    pub async fn search_authors(&self, query: &str) -> AppResult<Vec<Author>> {
        self.authors.search(query).await
    }

    pub async fn get_author_with_books(&self, id: i32) -> AppResult<AuthorWithBooks> {
        self.authors.get_with_books(id).await
    }

    pub async fn list_author_books(&self) -> AppResult<Vec<AuthorBook>> {
        self.authors.list_author_books().await
    }

    pub async fn create_author(&self, author: &AuthorData) -> AppResult<i32> {
        validate_author_data(author)?;
        let id = self.authors.create(author).await?;
        tracing::info!("Created author {} ({} {})", id, author.firstname, author.lastname);
        Ok(id)
    }

    pub async fn update_author(&self, id: i32, author: &AuthorData) -> AppResult<()> {
        validate_author_data(author)?;
        self.authors.update(id, author).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.authors.delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(())
    }

    pub async fn upload_author_photo(&self, id: i32, content: &[u8]) -> AppResult<String> {
        self.authors.get_by_id(id).await?;
        let path = self.photos.path_for(PhotoOwner::Author, id);
        self.photos.save(&path, content).await?;
        self.authors.set_photo(id, &path).await?;
        Ok(path)
    }
}
