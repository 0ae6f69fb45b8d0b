//! Book endpoints

use axum::extract::State;
use axum_extra::extract::multipart::{Multipart, MultipartRejection};

use super::{
    read_file_field,
    response::{CreatedId, JsonReply},
    IdPath, JsonBody, QueryParams, SearchQuery,
};
use crate::{
    error::AppResult,
    models::book::{BookAuthorInfo, BookData},
    AppState,
};

/// List books, or search them when `query` is given
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Books with their author", body = Vec<BookAuthorInfo>),
        (status = 400, description = "Empty query parameter", body = String, content_type = "text/plain"),
        (status = 500, description = "Query or scan error", body = String, content_type = "text/plain")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> AppResult<JsonReply<Vec<BookAuthorInfo>>> {
    let books = match params.optional()? {
        Some(query) => state.services.catalog.search_books(query).await?,
        None => state.services.catalog.list_books().await?,
    };
    Ok(JsonReply::ok(books))
}

/// Search books by title or author name
#[utoipa::path(
    get,
    path = "/search_books",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookAuthorInfo>),
        (status = 400, description = "Missing query parameter", body = String, content_type = "text/plain")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> AppResult<JsonReply<Vec<BookAuthorInfo>>> {
    let books = state.services.catalog.search_books(params.required()?).await?;
    Ok(JsonReply::ok(books))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookAuthorInfo),
        (status = 400, description = "Invalid id", body = String, content_type = "text/plain"),
        (status = 404, description = "Book not found", body = String, content_type = "text/plain")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<JsonReply<BookAuthorInfo>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(JsonReply::ok(book))
}

#[utoipa::path(
    post,
    path = "/books/new",
    tag = "books",
    request_body = BookData,
    responses(
        (status = 201, description = "Book created", body = CreatedId),
        (status = 400, description = "Invalid JSON data or missing fields", body = String, content_type = "text/plain")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(book): JsonBody<BookData>,
) -> AppResult<JsonReply<CreatedId>> {
    let id = state.services.catalog.create_book(&book).await?;
    Ok(JsonReply::created(CreatedId { id }))
}

/// Replace every field of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookData,
    responses(
        (status = 200, description = "Book updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid JSON data or missing fields", body = String, content_type = "text/plain"),
        (status = 404, description = "Book not found", body = String, content_type = "text/plain")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(book): JsonBody<BookData>,
) -> AppResult<&'static str> {
    state.services.catalog.update_book(id, &book).await?;
    Ok("Book updated successfully")
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Book not found", body = String, content_type = "text/plain"),
        (status = 409, description = "Book is currently borrowed", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<&'static str> {
    state.services.catalog.delete_book(id).await?;
    Ok("Book deleted successfully")
}

/// Upload the cover photo of a book
#[utoipa::path(
    post,
    path = "/books/photo/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = super::PhotoUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored", body = String, content_type = "text/plain"),
        (status = 400, description = "No file in the form", body = String, content_type = "text/plain"),
        (status = 404, description = "Book not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Error saving file", body = String, content_type = "text/plain")
    )
)]
pub async fn upload_book_photo(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<String> {
    let content = read_file_field(multipart).await?;
    let path = state.services.catalog.upload_book_photo(id, &content).await?;
    Ok(format!("File uploaded successfully: {}", path))
}
