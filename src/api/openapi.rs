//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health, loans, response, subscribers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "1.0.0",
        description = "Books, authors, subscribers and loans REST API"
    ),
    paths(
        // Health
        health::home,
        health::info,
        health::health_check,
        // Books
        books::list_books,
        books::search_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::upload_book_photo,
        // Authors
        authors::list_authors,
        authors::search_authors,
        authors::get_author,
        authors::list_author_books,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        authors::upload_author_photo,
        // Subscribers
        subscribers::list_subscribers,
        subscribers::list_book_subscribers,
        subscribers::create_subscriber,
        subscribers::update_subscriber,
        // Loans
        loans::borrow_book,
        loans::return_book,
    ),
    components(
        schemas(
            crate::models::book::BookAuthorInfo,
            crate::models::book::BookSummary,
            crate::models::book::BookData,
            crate::models::author::Author,
            crate::models::author::AuthorData,
            crate::models::author::AuthorBook,
            crate::models::author::AuthorWithBooks,
            crate::models::subscriber::Subscriber,
            crate::models::subscriber::SubscriberData,
            crate::models::loan::LoanRequest,
            crate::api::PhotoUpload,
            response::CreatedId,
            response::MessageResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Static pages and health check"),
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Authors and their books"),
        (name = "subscribers", description = "Library subscribers"),
        (name = "loans", description = "Borrow and return")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
