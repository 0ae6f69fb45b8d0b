//! Loans repository: the borrow/return ledger.
//!
//! Borrow and return each run in one transaction that locks the book row
//! first, so two concurrent requests for the same book are serialized and
//! `books.is_borrowed` always matches the open row in `borrowed_books`.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};

use super::scan::scan_one;
use crate::{
    error::{AppError, AppResult},
    models::loan::BorrowedBook,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// Open a loan of `book_id` for `subscriber_id`
    async fn borrow(&self, subscriber_id: i32, book_id: i32) -> AppResult<BorrowedBook>;

    /// Close the open loan of `book_id` held by `subscriber_id`
    async fn return_book(&self, subscriber_id: i32, book_id: i32) -> AppResult<BorrowedBook>;
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Lock the book row and read its borrowed flag
async fn lock_book(tx: &mut Transaction<'_, Postgres>, book_id: i32) -> AppResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT is_borrowed FROM books WHERE id = $1 FOR UPDATE")
        .bind(book_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
}

async fn set_borrowed(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i32,
    is_borrowed: bool,
) -> AppResult<()> {
    sqlx::query("UPDATE books SET is_borrowed = $1 WHERE id = $2")
        .bind(is_borrowed)
        .bind(book_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[async_trait]
impl LoanStore for LoansRepository {
    async fn borrow(&self, subscriber_id: i32, book_id: i32) -> AppResult<BorrowedBook> {
        let mut tx = self.pool.begin().await?;

        if lock_book(&mut tx, book_id).await? {
            return Err(AppError::Conflict("Book is already borrowed".to_string()));
        }

        let subscriber_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM subscribers WHERE id = $1)")
                .bind(subscriber_id)
                .fetch_one(&mut *tx)
                .await?;
        if !subscriber_exists {
            return Err(AppError::NotFound(format!(
                "Subscriber {} not found",
                subscriber_id
            )));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO borrowed_books (subscriber_id, book_id, borrow_date)
            VALUES ($1, $2, NOW())
            RETURNING id, subscriber_id, book_id, borrow_date, return_date
            "#,
        )
        .bind(subscriber_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::from_constraint(e, || {
                AppError::Conflict("Book is already borrowed".to_string())
            })
        })?;
        let loan = scan_one::<BorrowedBook>(row, "loans")?
            .ok_or_else(|| AppError::Internal("Loan insert returned no row".to_string()))?;

        set_borrowed(&mut tx, book_id, true).await?;
        tx.commit().await?;

        Ok(loan)
    }

    async fn return_book(&self, subscriber_id: i32, book_id: i32) -> AppResult<BorrowedBook> {
        let mut tx = self.pool.begin().await?;

        if !lock_book(&mut tx, book_id).await? {
            return Err(AppError::Conflict("Book is not currently borrowed".to_string()));
        }

        let row = sqlx::query(
            r#"
            UPDATE borrowed_books SET return_date = NOW()
            WHERE subscriber_id = $1 AND book_id = $2 AND return_date IS NULL
            RETURNING id, subscriber_id, book_id, borrow_date, return_date
            "#,
        )
        .bind(subscriber_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?;
        let loan = scan_one::<BorrowedBook>(row, "loans")?.ok_or_else(|| {
            AppError::Conflict("Book is not borrowed by this subscriber".to_string())
        })?;

        set_borrowed(&mut tx, book_id, false).await?;
        tx.commit().await?;

        Ok(loan)
    }
}
