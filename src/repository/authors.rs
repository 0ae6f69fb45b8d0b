//! Authors repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::scan::{fetch_records, like_pattern, scan_one};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorBook, AuthorData, AuthorWithBooks},
        book::BookSummary,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Every author, ordered by last then first name
    async fn list(&self) -> AppResult<Vec<Author>>;

    /// Authors whose first or last name contains `query`, ignoring case
    async fn search(&self, query: &str) -> AppResult<Vec<Author>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Author>;

    /// Author with every book they wrote
    async fn get_with_books(&self, id: i32) -> AppResult<AuthorWithBooks>;

    /// Every author/book pair
    async fn list_author_books(&self) -> AppResult<Vec<AuthorBook>>;

    async fn create(&self, author: &AuthorData) -> AppResult<i32>;

    async fn update(&self, id: i32, author: &AuthorData) -> AppResult<()>;

    async fn set_photo(&self, id: i32, path: &str) -> AppResult<()>;

    /// Delete an author that no book refers to
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query(
            "SELECT id, lastname, firstname, photo FROM authors ORDER BY lastname, firstname",
        )
        .fetch(&self.pool);

        fetch_records(rows, "authors").await
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Author>> {
        let pattern = like_pattern(query);
        let rows = sqlx::query(
            r#"
            SELECT id, lastname, firstname, photo
            FROM authors
            WHERE firstname ILIKE $1 OR lastname ILIKE $1
            ORDER BY lastname, firstname
            "#,
        )
        .bind(&pattern)
        .fetch(&self.pool);

        fetch_records(rows, "authors").await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let row = sqlx::query("SELECT id, lastname, firstname, photo FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        scan_one(row, "authors")?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn get_with_books(&self, id: i32) -> AppResult<AuthorWithBooks> {
        let author = self.get_by_id(id).await?;

        let rows = sqlx::query(
            r#"
            SELECT id AS book_id, title AS book_title, photo AS book_photo, is_borrowed
            FROM books
            WHERE author_id = $1
            ORDER BY title
            "#,
        )
        .bind(id)
        .fetch(&self.pool);
        let books: Vec<BookSummary> = fetch_records(rows, "books").await?;

        Ok(AuthorWithBooks::new(author, books))
    }

    async fn list_author_books(&self) -> AppResult<Vec<AuthorBook>> {
        let rows = sqlx::query(
            r#"
            SELECT a.firstname AS author_firstname, a.lastname AS author_lastname,
                   b.title AS book_title, b.photo AS book_photo
            FROM authors a
            JOIN books b ON b.author_id = a.id
            ORDER BY a.lastname, a.firstname, b.title
            "#,
        )
        .fetch(&self.pool);

        fetch_records(rows, "authors").await
    }

    async fn create(&self, author: &AuthorData) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO authors (lastname, firstname, photo) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&author.lastname)
        .bind(&author.firstname)
        .bind(&author.photo)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i32, author: &AuthorData) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE authors SET lastname = $1, firstname = $2, photo = $3 WHERE id = $4",
        )
        .bind(&author.lastname)
        .bind(&author.firstname)
        .bind(&author.photo)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }

    async fn set_photo(&self, id: i32, path: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE authors SET photo = $1 WHERE id = $2")
            .bind(path)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(e, || {
                    AppError::Conflict("Author still has books and cannot be deleted".to_string())
                })
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }
}
