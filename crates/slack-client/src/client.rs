//! Slack Web API client.

use crate::error::SlackError;
use crate::types::{SlackUser, UsersInfoResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Slack Web API base URL.
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Looks up Slack users on behalf of a bot.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user's details using the given bot access token.
    async fn user_info(&self, access_token: &str, user_id: &str) -> Result<SlackUser, SlackError>;
}

/// Slack Web API client.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    base_url: String,
}

impl SlackClient {
    /// Create a new Slack client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SlackError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl UserDirectory for SlackClient {
    #[instrument(skip(self, access_token))]
    async fn user_info(&self, access_token: &str, user_id: &str) -> Result<SlackUser, SlackError> {
        let response = self
            .client
            .post(format!("{}/users.info", self.base_url))
            .form(&[("token", access_token), ("user", user_id)])
            .send()
            .await?;

        let status = response.status();
        let body: UsersInfoResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = %status, "Unparseable users.info response: {}", e);
                return Err(SlackError::UnknownResponse);
            }
        };

        match body {
            UsersInfoResponse {
                ok: true,
                user: Some(user),
                ..
            } => {
                debug!(user_name = %user.name, "Fetched user info");
                Ok(user)
            }
            UsersInfoResponse {
                ok: false,
                error: Some(error),
                ..
            } => {
                warn!(error = %error, "users.info returned an error");
                Err(SlackError::Api(error))
            }
            _ => Err(SlackError::UnknownResponse),
        }
    }
}
