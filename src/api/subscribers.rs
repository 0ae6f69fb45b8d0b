//! Subscriber endpoints

use axum::extract::State;

use super::{
    response::{CreatedId, JsonReply},
    IdPath, JsonBody, QueryParams, SearchQuery,
};
use crate::{
    error::AppResult,
    models::subscriber::{Subscriber, SubscriberData},
    AppState,
};

/// List subscribers, or search them by name or email when `query` is given
#[utoipa::path(
    get,
    path = "/subscribers",
    tag = "subscribers",
    params(SearchQuery),
    responses(
        (status = 200, description = "Subscribers ordered by name", body = Vec<Subscriber>),
        (status = 400, description = "Empty query parameter", body = String, content_type = "text/plain")
    )
)]
pub async fn list_subscribers(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> AppResult<JsonReply<Vec<Subscriber>>> {
    let subscribers = match params.optional()? {
        Some(query) => state.services.subscribers.search(query).await?,
        None => state.services.subscribers.list().await?,
    };
    Ok(JsonReply::ok(subscribers))
}

/// Subscribers who ever borrowed a book
#[utoipa::path(
    get,
    path = "/subscribers/{id}",
    tag = "subscribers",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Borrowers of the book", body = Vec<Subscriber>),
        (status = 400, description = "Invalid id", body = String, content_type = "text/plain")
    )
)]
pub async fn list_book_subscribers(
    State(state): State<AppState>,
    IdPath(book_id): IdPath<i32>,
) -> AppResult<JsonReply<Vec<Subscriber>>> {
    let subscribers = state.services.subscribers.list_by_book(book_id).await?;
    Ok(JsonReply::ok(subscribers))
}

#[utoipa::path(
    post,
    path = "/subscribers/new",
    tag = "subscribers",
    request_body = SubscriberData,
    responses(
        (status = 201, description = "Subscriber created", body = CreatedId),
        (status = 400, description = "Invalid JSON data or missing fields", body = String, content_type = "text/plain")
    )
)]
pub async fn create_subscriber(
    State(state): State<AppState>,
    JsonBody(subscriber): JsonBody<SubscriberData>,
) -> AppResult<JsonReply<CreatedId>> {
    let id = state.services.subscribers.create(&subscriber).await?;
    Ok(JsonReply::created(CreatedId { id }))
}

#[utoipa::path(
    put,
    path = "/subscribers/{id}",
    tag = "subscribers",
    params(("id" = i32, Path, description = "Subscriber ID")),
    request_body = SubscriberData,
    responses(
        (status = 200, description = "Subscriber updated", body = String, content_type = "text/plain"),
        (status = 404, description = "Subscriber not found", body = String, content_type = "text/plain")
    )
)]
pub async fn update_subscriber(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    JsonBody(subscriber): JsonBody<SubscriberData>,
) -> AppResult<&'static str> {
    state.services.subscribers.update(id, &subscriber).await?;
    Ok("Subscriber updated successfully")
}
