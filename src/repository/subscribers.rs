//! Subscribers repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::scan::{fetch_records, like_pattern};
use crate::{
    error::{AppError, AppResult},
    models::subscriber::{Subscriber, SubscriberData},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Subscriber>>;

    /// Subscribers whose name or email contains `query`, ignoring case
    async fn search(&self, query: &str) -> AppResult<Vec<Subscriber>>;

    /// Subscribers who have borrowed the book at least once
    async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<Subscriber>>;

    async fn create(&self, subscriber: &SubscriberData) -> AppResult<i32>;

    async fn update(&self, id: i32, subscriber: &SubscriberData) -> AppResult<()>;
}

#[derive(Clone)]
pub struct SubscribersRepository {
    pool: Pool<Postgres>,
}

impl SubscribersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberStore for SubscribersRepository {
    async fn list(&self) -> AppResult<Vec<Subscriber>> {
        let rows = sqlx::query(
            "SELECT id, lastname, firstname, email FROM subscribers ORDER BY lastname, firstname",
        )
        .fetch(&self.pool);

        fetch_records(rows, "subscribers").await
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Subscriber>> {
        let pattern = like_pattern(query);
        let rows = sqlx::query(
            r#"
            SELECT id, lastname, firstname, email
            FROM subscribers
            WHERE firstname ILIKE $1 OR lastname ILIKE $1 OR email ILIKE $1
            ORDER BY lastname, firstname
            "#,
        )
        .bind(&pattern)
        .fetch(&self.pool);

        fetch_records(rows, "subscribers").await
    }

    async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<Subscriber>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT s.id, s.lastname, s.firstname, s.email
            FROM subscribers s
            JOIN borrowed_books bb ON bb.subscriber_id = s.id
            WHERE bb.book_id = $1
            ORDER BY s.lastname, s.firstname, s.id, s.email
            "#,
        )
        .bind(book_id)
        .fetch(&self.pool);

        fetch_records(rows, "subscribers").await
    }

    async fn create(&self, subscriber: &SubscriberData) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO subscribers (lastname, firstname, email) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&subscriber.lastname)
        .bind(&subscriber.firstname)
        .bind(&subscriber.email)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i32, subscriber: &SubscriberData) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE subscribers SET lastname = $1, firstname = $2, email = $3 WHERE id = $4",
        )
        .bind(&subscriber.lastname)
        .bind(&subscriber.firstname)
        .bind(&subscriber.email)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Subscriber {} not found", id)));
        }
        Ok(())
    }
}
