//! Borrow and return endpoints

use axum::extract::State;

use super::{
    response::{JsonReply, MessageResponse},
    JsonBody,
};
use crate::{error::AppResult, models::loan::LoanRequest, AppState};

/// Borrow a book
#[utoipa::path(
    post,
    path = "/book/borrow",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Book borrowed", body = MessageResponse),
        (status = 400, description = "Invalid JSON data or missing ids", body = String, content_type = "text/plain"),
        (status = 404, description = "Book or subscriber not found", body = String, content_type = "text/plain"),
        (status = 409, description = "Book is already borrowed", body = String, content_type = "text/plain")
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoanRequest>,
) -> AppResult<JsonReply<MessageResponse>> {
    state.services.loans.borrow(request).await?;
    Ok(JsonReply::created(MessageResponse {
        message: "Book borrowed successfully".to_string(),
    }))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/book/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book returned", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid JSON data or missing ids", body = String, content_type = "text/plain"),
        (status = 404, description = "Book not found", body = String, content_type = "text/plain"),
        (status = 409, description = "Book is not borrowed by this subscriber", body = String, content_type = "text/plain")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoanRequest>,
) -> AppResult<&'static str> {
    state.services.loans.return_book(request).await?;
    Ok("Book returned successfully")
}
