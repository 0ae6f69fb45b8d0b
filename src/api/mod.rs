//! API handlers for the library REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod response;
pub mod subscribers;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts},
    routing::{get, post},
    Router,
};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use serde::Deserialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// JSON body extractor; malformed bodies become "Invalid JSON data"
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path extractor; unparsable ids become "invalid id"
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct IdPath<T>(pub T);

/// Query string extractor
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// `?query=` parameter of the list and search endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring to look for
    pub query: Option<String>,
}

impl SearchQuery {
    /// Search text if the parameter was sent. Sent but empty is an error.
    pub fn optional(&self) -> AppResult<Option<&str>> {
        match self.query.as_deref() {
            None => Ok(None),
            Some("") => Err(query_required()),
            Some(query) => Ok(Some(query)),
        }
    }

    pub fn required(&self) -> AppResult<&str> {
        self.optional()?.ok_or_else(query_required)
    }
}

fn query_required() -> AppError {
    AppError::BadRequest("Query parameter is required".to_string())
}

/// Multipart form of the photo upload endpoints
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PhotoUpload {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Read the content of the `file` field of a multipart upload
pub async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Bytes> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Rejected multipart body: {}", rejection.body_text());
        missing_file()
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Malformed multipart body: {}", e.body_text());
        missing_file()
    })? {
        if field.name() == Some("file") {
            return field.bytes().await.map_err(|e| {
                tracing::debug!("Error reading upload: {}", e.body_text());
                missing_file()
            });
        }
    }

    Err(missing_file())
}

fn missing_file() -> AppError {
    AppError::BadRequest("Error retrieving the file".to_string())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Static pages and health
        .route("/", get(health::home))
        .route("/info", get(health::info))
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/search_books", get(books::search_books))
        .route("/books/new", post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/photo/:id", post(books::upload_book_photo))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/search_authors", get(authors::search_authors))
        .route("/authors/new", post(authors::create_author))
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .route("/author/photo/:id", post(authors::upload_author_photo))
        .route("/authorsbooks", get(authors::list_author_books))
        // Subscribers; GET takes a book id, PUT a subscriber id
        .route("/subscribers", get(subscribers::list_subscribers))
        .route("/subscribers/new", post(subscribers::create_subscriber))
        .route(
            "/subscribers/:id",
            get(subscribers::list_book_subscribers).put(subscribers::update_subscriber),
        )
        // Loans
        .route("/book/borrow", post(loans::borrow_book))
        .route("/book/return", post(loans::return_book))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
