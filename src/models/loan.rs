//! Loan (borrow) ledger model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Row of the borrow/return ledger.
///
/// A loan is open while `return_date` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowedBook {
    pub id: i32,
    pub subscriber_id: i32,
    pub book_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowedBook {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Borrow or return request
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoanRequest {
    #[validate(range(min = 1))]
    pub subscriber_id: i32,
    #[validate(range(min = 1))]
    pub book_id: i32,
}

pub fn validate_loan_request(request: &LoanRequest) -> AppResult<()> {
    request.validate().map_err(|_| {
        AppError::Validation("subscriber_id and book_id are required fields".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_loan_request() {
        assert!(validate_loan_request(&LoanRequest { subscriber_id: 1, book_id: 1 }).is_ok());
        assert!(validate_loan_request(&LoanRequest { subscriber_id: 0, book_id: 1 }).is_err());
        assert!(validate_loan_request(&LoanRequest { subscriber_id: 1, book_id: 0 }).is_err());
        assert!(validate_loan_request(&LoanRequest::default()).is_err());
    }

    #[test]
    fn test_open_loan() {
        let mut loan = BorrowedBook {
            id: 1,
            subscriber_id: 2,
            book_id: 3,
            borrow_date: Utc::now(),
            return_date: None,
        };
        assert!(loan.is_open());
        loan.return_date = Some(Utc::now());
        assert!(!loan.is_open());
    }
}
