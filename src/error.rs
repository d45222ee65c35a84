//! Error kinds surfaced to the user.

use thiserror::Error;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load events. Please try again later.";
pub const NOT_FOUND_MESSAGE: &str =
    "This event doesn't exist or you don't have permission to view it.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

/// Failures of the event source.
#[derive(Error, Debug)]
pub enum APIError {
    #[error("Failed to fetch events: {source}")]
    Network {
        status: Option<u16>,
        #[source]
        source: reqwest::Error,
    },

    #[error("Received invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl APIError {
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for APIError {
    fn from(err: reqwest::Error) -> Self {
        APIError::Network {
            status: err.status().map(|status| status.as_u16()),
            source: err,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Event {id} not found")]
pub struct NotFoundError {
    pub id: u64,
}

impl NotFoundError {
    pub fn user_message(&self) -> &'static str {
        NOT_FOUND_MESSAGE
    }
}
