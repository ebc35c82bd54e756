//! Slack webhook pipelines.

mod interactive;
mod slash;

pub use interactive::{InteractiveHandler, InteractiveReply};
pub use slash::{action_message, SlashCommandHandler};

use crate::error::BotError;
use lamp_client::{LampCommand, LampTransport};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

/// Reject requests whose token doesn't match the configured secret.
fn verify_token(expected: &SecretString, provided: &str) -> Result<(), BotError> {
    if provided.is_empty() || provided != expected.expose_secret() {
        warn!("Rejected request with invalid verification token");
        return Err(BotError::AuthRejected);
    }
    Ok(())
}

async fn send_to_lamp(lamp: &dyn LampTransport, command: &LampCommand) -> Result<(), BotError> {
    lamp.send(command)
        .await
        .map_err(|e| BotError::DeviceUnreachable(e.to_string()))
}
