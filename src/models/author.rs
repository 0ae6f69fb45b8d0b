//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::BookSummary, check_text_len, validation_error};
use crate::error::AppResult;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub lastname: String,
    pub firstname: String,
    pub photo: Option<String>,
}

/// Author fields sent on create and on full update
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct AuthorData {
    #[validate(length(min = 1), custom(function = "check_text_len"))]
    pub firstname: String,
    #[validate(length(min = 1), custom(function = "check_text_len"))]
    pub lastname: String,
    #[validate(length(max = 512, code = "too_long"))]
    pub photo: Option<String>,
}

/// One author/book pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorBook {
    pub author_firstname: String,
    pub author_lastname: String,
    pub book_title: String,
    pub book_photo: Option<String>,
}

/// Author with every book they wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorWithBooks {
    pub author_id: i32,
    pub author_firstname: String,
    pub author_lastname: String,
    pub author_photo: Option<String>,
    pub books: Vec<BookSummary>,
}

impl AuthorWithBooks {
    pub fn new(author: Author, books: Vec<BookSummary>) -> Self {
        Self {
            author_id: author.id,
            author_firstname: author.firstname,
            author_lastname: author.lastname,
            author_photo: author.photo,
            books,
        }
    }
}

/// Reject authors without both names
pub fn validate_author_data(author: &AuthorData) -> AppResult<()> {
    author
        .validate()
        .map_err(|e| validation_error(e, "firstname and lastname are required fields"))
}
