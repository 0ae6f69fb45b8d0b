//! API integration tests against a running server with a fresh database

use reqwest::{multipart, Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

async fn create(client: &Client, path: &str, payload: Value) -> i64 {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

async fn create_author(client: &Client, lastname: &str) -> i64 {
    create(
        client,
        "/authors/new",
        json!({ "firstname": "Integration", "lastname": lastname }),
    )
    .await
}

async fn create_book(client: &Client, author_id: i64, title: &str) -> i64 {
    create(
        client,
        "/books/new",
        json!({ "title": title, "details": "Integration details", "author_id": author_id }),
    )
    .await
}

async fn create_subscriber(client: &Client, email: &str) -> i64 {
    create(
        client,
        "/subscribers/new",
        json!({ "firstname": "Test", "lastname": "Reader", "email": email }),
    )
    .await
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_then_get_book() {
    let client = Client::new();
    let author_id = create_author(&client, "Roundtrip").await;
    let book_id = create_book(&client, author_id, "Roundtrip Book").await;
    assert!(book_id > 0);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let book: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(book["book_title"], "Roundtrip Book");
    assert_eq!(book["author_id"].as_i64(), Some(author_id));
    assert_eq!(book["author_lastname"], "Roundtrip");
    assert_eq!(book["is_borrowed"], false);

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("query", "roundtrip book")])
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(books.iter().any(|b| b["book_id"].as_i64() == Some(book_id)));
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return() {
    let client = Client::new();
    let author_id = create_author(&client, "Lender").await;
    let book_id = create_book(&client, author_id, "Borrowed Book").await;
    let subscriber_id = create_subscriber(&client, "borrow.return@example.com").await;
    let loan = json!({ "subscriber_id": subscriber_id, "book_id": book_id });

    let response = client
        .post(format!("{}/book/borrow", BASE_URL))
        .json(&loan)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{}/book/borrow", BASE_URL))
        .json(&loan)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Borrowed books cannot be deleted
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .get(format!("{}/subscribers/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let borrowers: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(borrowers.len(), 1);
    assert_eq!(borrowers[0]["id"].as_i64(), Some(subscriber_id));

    let response = client
        .post(format!("{}/book/return", BASE_URL))
        .json(&loan)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Book returned successfully");

    let response = client
        .post(format!("{}/book/return", BASE_URL))
        .json(&loan)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["is_borrowed"], false);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_lend_once() {
    const BORROWERS: usize = 8;

    let client = Client::new();
    let author_id = create_author(&client, "Contended").await;
    let book_id = create_book(&client, author_id, "Contended Book").await;

    let mut subscriber_ids = Vec::with_capacity(BORROWERS);
    for i in 0..BORROWERS {
        let email = format!("contended.{}.{}@example.com", book_id, i);
        subscriber_ids.push(create_subscriber(&client, &email).await);
    }

    let mut borrows = tokio::task::JoinSet::new();
    for subscriber_id in subscriber_ids {
        let client = client.clone();
        borrows.spawn(async move {
            let response = client
                .post(format!("{}/book/borrow", BASE_URL))
                .json(&json!({ "subscriber_id": subscriber_id, "book_id": book_id }))
                .send()
                .await
                .expect("Failed to send request");
            (subscriber_id, response.status())
        });
    }

    let mut lent_to = Vec::new();
    let mut conflicts = 0;
    while let Some(result) = borrows.join_next().await {
        let (subscriber_id, status) = result.expect("Borrow task panicked");
        match status {
            StatusCode::CREATED => lent_to.push(subscriber_id),
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("Unexpected status {}", other),
        }
    }
    assert_eq!(lent_to.len(), 1);
    assert_eq!(conflicts, BORROWERS - 1);

    let response = client
        .post(format!("{}/book/return", BASE_URL))
        .json(&json!({ "subscriber_id": lent_to[0], "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_malformed_json() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books/new", BASE_URL))
        .header("Content-Type", "application/json")
        .body("invalid json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Invalid JSON data");
}

#[tokio::test]
#[ignore]
async fn test_upload_author_photo() {
    let client = Client::new();
    let author_id = create_author(&client, "Photographed").await;

    let part = multipart::Part::bytes(b"test image content".to_vec()).file_name("test.jpg");
    let form = multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/author/photo/{}", BASE_URL, author_id))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.starts_with("File uploaded successfully: "));
    assert!(body.ends_with(&format!("/{}/fullsize.jpg", author_id)));
}
