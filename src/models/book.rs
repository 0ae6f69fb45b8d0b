//! Book model and read projections

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{check_text_len, validation_error};
use crate::error::AppResult;

/// Book joined with its author, as listed and fetched by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookAuthorInfo {
    pub book_id: i32,
    pub book_title: String,
    pub author_id: i32,
    pub book_photo: Option<String>,
    pub is_borrowed: bool,
    pub book_details: String,
    pub author_lastname: String,
    pub author_firstname: String,
}

/// Short book entry nested under its author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub book_id: i32,
    pub book_title: String,
    pub book_photo: Option<String>,
    pub is_borrowed: bool,
}

/// Book fields sent on create and on full update.
///
/// `is_borrowed` is not writable here: the flag follows the loan ledger and
/// is only changed by borrow and return. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookData {
    #[validate(length(min = 1), custom(function = "check_text_len"))]
    pub title: String,
    pub details: String,
    #[validate(range(min = 1))]
    pub author_id: i32,
    #[validate(length(max = 512, code = "too_long"))]
    pub photo: Option<String>,
}

/// Reject books without a title or author
pub fn validate_book_data(book: &BookData) -> AppResult<()> {
    book.validate()
        .map_err(|e| validation_error(e, "title and author_id are required fields"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, models::MAX_TEXT_LEN};

    fn book(title: &str, author_id: i32) -> BookData {
        BookData {
            title: title.to_string(),
            author_id,
            ..BookData::default()
        }
    }

    #[test]
    fn test_validate_book_data() {
        assert!(validate_book_data(&book("Valid Book Title", 1)).is_ok());

        for invalid in [book("", 1), book("Valid Book Title", 0), book("", 0), book("Title", -4)] {
            let err = validate_book_data(&invalid).unwrap_err();
            assert!(err.to_string().contains("title and author_id are required fields"));
        }
    }

    #[test]
    fn test_missing_fields_default_then_fail_validation() {
        let parsed: BookData = serde_json::from_str(r#"{"details": "no title"}"#).unwrap();
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.author_id, 0);
        assert!(matches!(validate_book_data(&parsed), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_is_borrowed_is_ignored_on_input() {
        let parsed: BookData = serde_json::from_str(
            r#"{"title": "New Book", "details": "A new book description", "author_id": 1, "is_borrowed": true}"#,
        )
        .unwrap();
        assert_eq!(parsed, BookData {
            title: "New Book".to_string(),
            details: "A new book description".to_string(),
            author_id: 1,
            photo: None,
        });
    }

    #[test]
    fn test_overlong_title_is_rejected() {
        let err = validate_book_data(&book(&"t".repeat(MAX_TEXT_LEN + 45), 1)).unwrap_err();
        assert!(matches!(&err, AppError::Validation(msg) if msg == "title too long"));

        let at_limit = book(&"t".repeat(MAX_TEXT_LEN), 1);
        assert!(validate_book_data(&at_limit).is_ok());

        // details is a TEXT column
        let long_details = BookData {
            details: "d".repeat(4 * MAX_TEXT_LEN),
            ..book("Title", 1)
        };
        assert!(validate_book_data(&long_details).is_ok());

        let long_photo = BookData {
            photo: Some("p".repeat(513)),
            ..book("Title", 1)
        };
        assert!(matches!(
            validate_book_data(&long_photo),
            Err(AppError::Validation(msg)) if msg == "photo too long"
        ));
    }
}
