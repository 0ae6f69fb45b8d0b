//! Subscriber model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{check_text_len, validation_error};
use crate::error::AppResult;

/// Library subscriber (borrower)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subscriber {
    pub id: i32,
    pub lastname: String,
    pub firstname: String,
    pub email: String,
}

/// Subscriber fields sent on create and on full update.
///
/// The email is only required to be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct SubscriberData {
    #[validate(length(min = 1), custom(function = "check_text_len"))]
    pub firstname: String,
    #[validate(length(min = 1), custom(function = "check_text_len"))]
    pub lastname: String,
    #[validate(length(min = 1), custom(function = "check_text_len"))]
    pub email: String,
}

pub fn validate_subscriber_data(subscriber: &SubscriberData) -> AppResult<()> {
    subscriber
        .validate()
        .map_err(|e| validation_error(e, "firstname, lastname and email are required fields"))
}
