//! Team registry errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("IAM authentication failed: {0}")]
    Auth(String),

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
