//! Author endpoints

use axum::extract::State;
use axum_extra::extract::multipart::{Multipart, MultipartRejection};

use super::{
    read_file_field,
    response::{CreatedId, JsonReply},
    IdPath, JsonBody, QueryParams, SearchQuery,
};
use crate::{
    error::AppResult,
    models::author::{Author, AuthorBook, AuthorData, AuthorWithBooks},
    AppState,
};

/// List authors, or search them by name when `query` is given
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(SearchQuery),
    responses(
        (status = 200, description = "Authors ordered by name", body = Vec<Author>),
        (status = 400, description = "Empty query parameter", body = String, content_type = "text/plain")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> AppResult<JsonReply<Vec<Author>>> {
    let authors = match params.optional()? {
        Some(query) => state.services.catalog.search_authors(query).await?,
        None => state.services.catalog.list_authors().await?,
    };
    Ok(JsonReply::ok(authors))
}

#[utoipa::path(
    get,
    path = "/search_authors",
    tag = "authors",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching authors", body = Vec<Author>),
        (status = 400, description = "Missing query parameter", body = String, content_type = "text/plain")
    )
)]
pub async fn search_authors(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> AppResult<JsonReply<Vec<Author>>> {
    let authors = state.services.catalog.search_authors(params.required()?).await?;
    Ok(JsonReply::ok(authors))
}

/// Get an author with all their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author and books", body = AuthorWithBooks),
        (status = 404, description = "Author not found", body = String, content_type = "text/plain")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<JsonReply<AuthorWithBooks>> {
    let author = state.services.catalog.get_author_with_books(id).await?;
    Ok(JsonReply::ok(author))
}

/// Every author/book pair
#[utoipa::path(
    get,
    path = "/authorsbooks",
    tag = "authors",
    responses(
        (status = 200, description = "Author/book pairs", body = Vec<AuthorBook>)
    )
)]
pub async fn list_author_books(State(state): State<AppState>) -> AppResult<JsonReply<Vec<AuthorBook>>> {
    let pairs = state.services.catalog.list_author_books().await?;
    Ok(JsonReply::ok(pairs))
}

#[utoipa::path(
    post,
    path = "/authors/new",
    tag = "authors",
    request_body = AuthorData,
    responses(
        (status = 201, description = "Author created", body = CreatedId),
        (status = 400, description = "Invalid JSON data or missing fields", body = String, content_type = "text/plain")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    JsonBody(author): JsonBody<AuthorData>,
) -> AppResult<JsonReply<CreatedId>> {
    let id = state.services.catalog.create_author(&author).await?;
    Ok(JsonReply::created(CreatedId { id }))
}

#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorData,
    responses(
        (status = 200, description = "Author updated", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid JSON data or missing fields", body = String, content_type = "text/plain"),
        (status = 404, description = "Author not found", body = String, content_type = "text/plain")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(author): JsonBody<AuthorData>,
) -> AppResult<&'static str> {
    state.services.catalog.update_author(id, &author).await?;
    Ok("Author updated successfully")
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Author not found", body = String, content_type = "text/plain"),
        (status = 409, description = "Author still has books", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<&'static str> {
    state.services.catalog.delete_author(id).await?;
    Ok("Author deleted successfully")
}

#[utoipa::path(
    post,
    path = "/author/photo/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body(content = super::PhotoUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored", body = String, content_type = "text/plain"),
        (status = 400, description = "No file in the form", body = String, content_type = "text/plain"),
        (status = 404, description = "Author not found", body = String, content_type = "text/plain")
    )
)]
pub async fn upload_author_photo(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<String> {
    let content = read_file_field(multipart).await?;
    let path = state.services.catalog.upload_author_photo(id, &content).await?;
    Ok(format!("File uploaded successfully: {}", path))
}
