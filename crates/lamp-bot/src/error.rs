//! Error types for the lamp bot.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Handler pipeline errors.
///
/// Apart from authentication and malformed requests, every failure is
/// reported with the same status and the raw error text in the body.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Invalid verification token")]
    AuthRejected,

    #[error("{0}")]
    CommandParse(String),

    #[error("Lamp unreachable: {0}")]
    DeviceUnreachable(String),

    #[error("team not found: {0}")]
    TeamNotFound(String),

    #[error("User lookup failed: {0}")]
    UserLookupFailed(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl BotError {
    /// Machine readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            BotError::AuthRejected => "AUTH_REJECTED",
            BotError::CommandParse(_) => "COMMAND_PARSE_ERROR",
            BotError::DeviceUnreachable(_) => "DEVICE_UNREACHABLE",
            BotError::TeamNotFound(_) => "TEAM_NOT_FOUND",
            BotError::UserLookupFailed(_) => "USER_LOOKUP_FAILED",
            BotError::Registry(_) => "REGISTRY_ERROR",
            BotError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let status = match &self {
            BotError::AuthRejected => return StatusCode::UNAUTHORIZED.into_response(),
            BotError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<team_registry::RegistryError> for BotError {
    fn from(e: team_registry::RegistryError) -> Self {
        BotError::Registry(e.to_string())
    }
}

impl From<slack_client::SlackError> for BotError {
    fn from(e: slack_client::SlackError) -> Self {
        BotError::UserLookupFailed(e.to_string())
    }
}
