//! Subscriber management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::subscriber::{validate_subscriber_data, Subscriber, SubscriberData},
    repository::SubscriberStore,
};

#[derive(Clone)]
pub struct SubscribersService {
    subscribers: Arc<dyn SubscriberStore>,
}

impl SubscribersService {
    pub fn new(subscribers: Arc<dyn SubscriberStore>) -> Self {
        Self { subscribers }
    }

    pub async fn list(&self) -> AppResult<Vec<Subscriber>> {
        self.subscribers.list().await
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<Subscriber>> {
        self.subscribers.search(query).await
    }

    /// Subscribers who have borrowed the given book, returned or not
    pub async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<Subscriber>> {
        self.subscribers.list_by_book(book_id).await
    }

    pub async fn create(&self, subscriber: &SubscriberData) -> AppResult<i32> {
        validate_subscriber_data(subscriber)?;
        let id = self.subscribers.create(subscriber).await?;
        tracing::info!("Created subscriber {}", id);
        Ok(id)
    }

    pub async fn update(&self, id: i32, subscriber: &SubscriberData) -> AppResult<()> {
        validate_subscriber_data(subscriber)?;
        self.subscribers.update(id, subscriber).await
    }
}
