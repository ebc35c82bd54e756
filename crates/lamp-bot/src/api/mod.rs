//! HTTP API exposing the Slack webhooks.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::handlers::{InteractiveHandler, SlashCommandHandler};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use lamp_client::LampTransport;
use secrecy::SecretString;
use slack_client::UserDirectory;
use std::sync::Arc;
use team_registry::TeamDirectory;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Slash command pipeline
    pub slash: Arc<SlashCommandHandler>,
    /// Interactive message pipeline
    pub interactive: Arc<InteractiveHandler>,
}

impl AppState {
    /// Create new application state from the external capabilities.
    pub fn new(
        verification_token: SecretString,
        lamp_name: impl Into<String>,
        lamp: Arc<dyn LampTransport>,
        teams: Arc<dyn TeamDirectory>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            slash: Arc::new(SlashCommandHandler::new(
                verification_token.clone(),
                lamp_name,
                lamp.clone(),
                teams,
                users,
            )),
            interactive: Arc::new(InteractiveHandler::new(verification_token, lamp)),
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/slack/command", post(handlers::slack_command))
        .route("/slack/interactive", post(handlers::slack_interactive))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
