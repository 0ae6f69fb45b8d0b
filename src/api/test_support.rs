//! Router wiring over mocked stores for handler tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use crate::{
    config::AppConfig,
    repository::{
        authors::MockAuthorStore, books::MockBookStore, loans::MockLoanStore,
        subscribers::MockSubscriberStore,
    },
    services::Services,
    AppState,
};

pub struct MockStores {
    pub books: MockBookStore,
    pub authors: MockAuthorStore,
    pub subscribers: MockSubscriberStore,
    pub loans: MockLoanStore,
    pub config: AppConfig,
}

impl MockStores {
    pub fn new() -> Self {
        Self {
            books: MockBookStore::new(),
            authors: MockAuthorStore::new(),
            subscribers: MockSubscriberStore::new(),
            loans: MockLoanStore::new(),
            config: AppConfig::default(),
        }
    }

    pub fn into_router(self) -> Router {
        let services = Services::with_stores(
            Arc::new(self.books),
            Arc::new(self.authors),
            Arc::new(self.subscribers),
            Arc::new(self.loans),
            &self.config.storage,
        );
        super::create_router(AppState {
            config: Arc::new(self.config),
            services: Arc::new(services),
        })
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const BOUNDARY: &str = "library-test-boundary";

/// Multipart request with a single field
pub fn multipart(uri: &str, field: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"test.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n{content}\r\n--{b}--\r\n",
        b = BOUNDARY,
    );
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send `request` through `router`, returning the status and body text
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
