//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::scan::{fetch_records, like_pattern, scan_one};
use crate::{
    error::{AppError, AppResult},
    models::book::{BookAuthorInfo, BookData},
};

/// Book persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Every book with its author, in id order
    async fn list(&self) -> AppResult<Vec<BookAuthorInfo>>;

    /// Books whose title or author name contains `query`, ignoring case
    async fn search(&self, query: &str) -> AppResult<Vec<BookAuthorInfo>>;

    async fn get_by_id(&self, id: i32) -> AppResult<BookAuthorInfo>;

    /// Insert a book and return its new id
    async fn create(&self, book: &BookData) -> AppResult<i32>;

    /// Replace every writable field of a book
    async fn update(&self, id: i32, book: &BookData) -> AppResult<()>;

    async fn set_photo(&self, id: i32, path: &str) -> AppResult<()>;

    /// Delete a book that is not currently borrowed
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn unknown_author(author_id: i32) -> AppError {
    AppError::BadRequest(format!("Author {} does not exist", author_id))
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self) -> AppResult<Vec<BookAuthorInfo>> {
        let rows = sqlx::query(
            r#"
            SELECT books.id AS book_id, books.title AS book_title, books.author_id AS author_id,
                   books.photo AS book_photo, books.is_borrowed AS is_borrowed,
                   books.details AS book_details, authors.lastname AS author_lastname,
                   authors.firstname AS author_firstname
            FROM books
            JOIN authors ON books.author_id = authors.id
            ORDER BY books.id
            "#,
        )
        .fetch(&self.pool);

        fetch_records(rows, "books").await
    }

    async fn search(&self, query: &str) -> AppResult<Vec<BookAuthorInfo>> {
        let pattern = like_pattern(query);
        let rows = sqlx::query(
            r#"
            SELECT books.id AS book_id, books.title AS book_title, books.author_id AS author_id,
                   books.photo AS book_photo, books.is_borrowed AS is_borrowed,
                   books.details AS book_details, authors.lastname AS author_lastname,
                   authors.firstname AS author_firstname
            FROM books
            JOIN authors ON books.author_id = authors.id
            WHERE books.title ILIKE $1
               OR authors.firstname ILIKE $1
               OR authors.lastname ILIKE $1
            ORDER BY books.id
            "#,
        )
        .bind(&pattern)
        .fetch(&self.pool);

        fetch_records(rows, "books").await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<BookAuthorInfo> {
        let row = sqlx::query(
            r#"
            SELECT books.title AS book_title, books.author_id AS author_id,
                   books.photo AS book_photo, books.is_borrowed AS is_borrowed,
                   books.id AS book_id, books.details AS book_details,
                   authors.lastname AS author_lastname, authors.firstname AS author_firstname
            FROM books
            JOIN authors ON books.author_id = authors.id
            WHERE books.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        scan_one(row, "books")?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn create(&self, book: &BookData) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, details, author_id, photo, is_borrowed)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.details)
        .bind(book.author_id)
        .bind(&book.photo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, || unknown_author(book.author_id)))
    }

    async fn update(&self, id: i32, book: &BookData) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE books SET title = $1, details = $2, author_id = $3, photo = $4 WHERE id = $5",
        )
        .bind(&book.title)
        .bind(&book.details)
        .bind(book.author_id)
        .bind(&book.photo)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, || unknown_author(book.author_id)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    async fn set_photo(&self, id: i32, path: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE books SET photo = $1 WHERE id = $2")
            .bind(path)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let is_borrowed: Option<bool> =
            sqlx::query_scalar("SELECT is_borrowed FROM books WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        match is_borrowed {
            None => return Err(AppError::NotFound(format!("Book {} not found", id))),
            Some(true) => {
                return Err(AppError::Conflict(
                    "Book is currently borrowed and cannot be deleted".to_string(),
                ))
            }
            Some(false) => {}
        }

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
