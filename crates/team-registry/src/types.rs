//! Registration documents stored per team.

use serde::{Deserialize, Serialize};

/// OAuth registration saved when a team installs the bot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamRegistration {
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    pub bot: BotRegistration,
}

impl TeamRegistration {
    /// Token the bot uses to call the Slack Web API for this team.
    pub fn bot_access_token(&self) -> &str {
        &self.bot.bot_access_token
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotRegistration {
    pub bot_access_token: String,
    #[serde(default)]
    pub bot_user_id: Option<String>,
}

/// Stored document wrapping a registration.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegistrationDocument {
    pub registration: TeamRegistration,
}

/// Response of a view query with `include_docs=true`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ViewResponse {
    #[serde(default)]
    pub rows: Vec<ViewRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ViewRow {
    #[serde(default)]
    pub doc: Option<RegistrationDocument>,
}
