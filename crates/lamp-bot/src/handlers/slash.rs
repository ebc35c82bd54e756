//! Slash command pipeline: authenticate, drive the lamp, greet the user.

use super::{send_to_lamp, verify_token};
use crate::error::BotError;
use lamp_client::{LampCommand, LampTransport};
use secrecy::SecretString;
use slack_client::{SlashCommand, UserDirectory};
use std::sync::Arc;
use team_registry::TeamDirectory;
use tracing::{info, instrument};

/// Handles `/lamp`, `/shine`, `/pulse`, `/disco` and `/wave`.
pub struct SlashCommandHandler {
    verification_token: SecretString,
    lamp_name: String,
    lamp: Arc<dyn LampTransport>,
    teams: Arc<dyn TeamDirectory>,
    users: Arc<dyn UserDirectory>,
}

impl SlashCommandHandler {
    pub fn new(
        verification_token: SecretString,
        lamp_name: impl Into<String>,
        lamp: Arc<dyn LampTransport>,
        teams: Arc<dyn TeamDirectory>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            verification_token,
            lamp_name: lamp_name.into(),
            lamp,
            teams,
            users,
        }
    }

    /// Run the pipeline and return the reply text for Slack.
    #[instrument(
        skip(self, request),
        fields(team_id = %request.team_id, user_id = %request.user_id, command = %request.command)
    )]
    pub async fn handle(&self, request: &SlashCommand) -> Result<String, BotError> {
        verify_token(&self.verification_token, &request.token)?;

        info!(text = %request.text, "Processing slash command");
        let command = LampCommand::from_slash(&request.command, &request.text)
            .map_err(|e| BotError::CommandParse(e.to_string()))?;

        send_to_lamp(self.lamp.as_ref(), &command).await?;

        info!("Looking up bot registration for team");
        let registration = self
            .teams
            .find_team(&request.team_id)
            .await?
            .ok_or_else(|| BotError::TeamNotFound(request.team_id.clone()))?;

        info!("Looking up user info");
        let user = self
            .users
            .user_info(registration.bot_access_token(), &request.user_id)
            .await?;

        Ok(format!(
            "Hey {}, {}",
            user.display_name(),
            action_message(&request.command, &request.text, &self.lamp_name)
        ))
    }
}

/// Phrase describing what the user made the lamp do.
pub fn action_message(command: &str, text: &str, lamp_name: &str) -> String {
    let text = text.trim();
    match command.trim() {
        "/lamp" => format!("you turned the lamp {} 💡", text),
        "/wave" => format!("you made {} wave! 💪", lamp_name),
        other => {
            let verb = other.trim_start_matches('/');
            if text.is_empty() {
                format!("you made the light {}! 💡", verb)
            } else {
                format!("you made the light {} {}! 💡", verb, text)
            }
        }
    }
}
