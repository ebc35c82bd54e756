//! HTTP request handlers.

use super::types::HealthResponse;
use super::AppState;
use crate::error::BotError;
use crate::handlers::InteractiveReply;
use axum::{
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use slack_client::{InteractiveRequest, SlashCommand};

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Slash command webhook. Replies with plain text shown to the user.
pub async fn slack_command(
    State(state): State<AppState>,
    Form(request): Form<SlashCommand>,
) -> Result<String, BotError> {
    state.slash.handle(&request).await
}

/// Interactive message webhook.
///
/// Accepts Slack's form-encoded `payload` as well as a JSON body, which is
/// how the URL verification handshake is delivered.
pub async fn slack_interactive(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, BotError> {
    let is_json = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let body = if is_json {
        Json::<InteractiveRequest>::from_request(request, &state)
            .await
            .map(|Json(body)| body)
            .map_err(|e| BotError::BadRequest(e.body_text()))?
    } else {
        Form::<InteractiveRequest>::from_request(request, &state)
            .await
            .map(|Form(body)| body)
            .map_err(|e| BotError::BadRequest(e.body_text()))?
    };

    let response = match state.interactive.handle(&body).await? {
        InteractiveReply::Challenge(encoded) => (
            [(header::CONTENT_TYPE, "application/json")],
            encoded,
        )
            .into_response(),
        InteractiveReply::Sent => StatusCode::OK.into_response(),
    };

    Ok(response)
}
