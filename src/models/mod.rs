//! Data models for the library

pub mod author;
pub mod book;
pub mod loan;
pub mod subscriber;

use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;

// Re-export commonly used types
pub use author::{Author, AuthorBook, AuthorData, AuthorWithBooks};
pub use book::{BookAuthorInfo, BookData, BookSummary};
pub use loan::{BorrowedBook, LoanRequest};
pub use subscriber::{Subscriber, SubscriberData};

/// Longest value accepted by the `VARCHAR(255)` name, title and email columns
pub const MAX_TEXT_LEN: usize = 255;

const TOO_LONG: &str = "too_long";

/// Reject text longer than [`MAX_TEXT_LEN`] characters
pub fn check_text_len(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::new(TOO_LONG));
    }
    Ok(())
}

/// Turn validator output into a client error.
///
/// Over-long fields are named in the message; any other failure means a
/// required field is missing and gets `required_message`.
pub(crate) fn validation_error(errors: ValidationErrors, required_message: &str) -> AppError {
    let mut too_long: Vec<String> = errors
        .field_errors()
        .iter()
        .filter(|(_, errs)| errs.iter().any(|e| e.code == TOO_LONG))
        .map(|(field, _)| field.to_string())
        .collect();

    if too_long.is_empty() {
        return AppError::Validation(required_message.to_string());
    }

    too_long.sort();
    AppError::Validation(format!("{} too long", too_long.join(", ")))
}
