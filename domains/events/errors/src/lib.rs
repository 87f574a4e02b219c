use std::{collections::BTreeMap, fmt};

use common_errors::AppError;
use events_models::InvalidCategory;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Database error: {0}")]
    Database(#[from] sql_connection::PgError),
    #[error("Connection error: {0}")]
    Connection(#[from] sql_connection::PoolError),
    #[error("Event not found: {event_id}")]
    NotFound { event_id: i64 },
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Storage error: {0}")]
    Storage(#[from] file_storage::StorageError),
    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategory),
    #[error("invalid date filter: {0}")]
    InvalidDate(String),
}

/// Messages collected per input field. Fields keep insertion-independent
/// alphabetical order; messages keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn has(&self, field: &str) -> bool { self.0.contains_key(field) }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> { self.0 }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { event_id } => {
                AppError::not_found(
                    "EVENT_NOT_FOUND",
                    &format!("Event {event_id} not found"),
                )
            }
            EventError::Validation(errors) => {
                AppError::validation(errors.into_inner())
            }
            EventError::InvalidCategory(err) => {
                AppError::bad_request("INVALID_CATEGORY", &err.to_string())
            }
            EventError::InvalidDate(value) => {
                AppError::bad_request_with_details(
                    "INVALID_DATE",
                    "Date filter must be formatted as YYYY-MM-DD",
                    &value,
                )
            }
            EventError::Database(_)
            | EventError::Connection(_)
            | EventError::Storage(_) => {
                tracing::error!(error = %err, "Event operation failed");
                AppError::internal_server_error(&err.to_string())
            }
        }
    }
}
