//! Loan management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::loan::{validate_loan_request, BorrowedBook, LoanRequest},
    repository::LoanStore,
};

#[derive(Clone)]
pub struct LoansService {
    loans: Arc<dyn LoanStore>,
}

impl LoansService {
    pub fn new(loans: Arc<dyn LoanStore>) -> Self {
        Self { loans }
    }

    /// Borrow a book for a subscriber
    pub async fn borrow(&self, request: LoanRequest) -> AppResult<BorrowedBook> {
        validate_loan_request(&request)?;
        let loan = self.loans.borrow(request.subscriber_id, request.book_id).await?;
        tracing::info!(
            "Book {} borrowed by subscriber {} (loan {})",
            loan.book_id,
            loan.subscriber_id,
            loan.id
        );
        Ok(loan)
    }

    /// Return a borrowed book
    pub async fn return_book(&self, request: LoanRequest) -> AppResult<BorrowedBook> {
        validate_loan_request(&request)?;
        let loan = self.loans.return_book(request.subscriber_id, request.book_id).await?;
        debug_assert!(!loan.is_open());
        tracing::info!(
            "Book {} returned by subscriber {} (loan {})",
            loan.book_id,
            loan.subscriber_id,
            loan.id
        );
        Ok(loan)
    }
}
