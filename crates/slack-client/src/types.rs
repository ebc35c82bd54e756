//! Slack webhook and Web API types.

use serde::{Deserialize, Serialize};

/// Event type Slack uses for the one-time endpoint ownership check.
pub const URL_VERIFICATION: &str = "url_verification";

/// Form-encoded body of a slash command invocation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SlashCommand {
    pub token: String,
    pub team_id: String,
    pub team_domain: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    /// Command keyword including the leading slash (e.g. `/shine`).
    pub command: String,
    /// Free text after the command.
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

/// Body delivered to the interactive endpoint.
///
/// Button clicks arrive form-encoded with a JSON `payload` field. The URL
/// verification handshake arrives as top-level `token`, `type` and
/// `challenge` fields instead.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractiveRequest {
    pub payload: Option<String>,
    pub token: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub challenge: Option<String>,
}

impl InteractiveRequest {
    /// Parse the embedded JSON payload, if any.
    pub fn parse_payload(&self) -> Result<Option<InteractivePayload>, serde_json::Error> {
        self.payload
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }

    /// Whether this is the URL verification handshake.
    pub fn is_url_verification(&self) -> bool {
        self.kind.as_deref() == Some(URL_VERIFICATION)
    }
}

/// Parsed interactive message payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractivePayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
    pub callback_id: String,
    pub actions: Vec<Action>,
    pub team: Option<Reference>,
    pub user: Option<Reference>,
    pub channel: Option<Reference>,
    pub response_url: Option<String>,
}

impl InteractivePayload {
    /// Value of the first selected action.
    pub fn first_action_value(&self) -> Option<&str> {
        self.actions.first().and_then(|a| a.value.as_deref())
    }
}

/// A button or menu action inside an interactive payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Action {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<String>,
}

/// Team, user or channel reference in a payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Reference {
    pub id: String,
    #[serde(alias = "domain")]
    pub name: Option<String>,
}

/// Response of the `users.info` Web API method.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersInfoResponse {
    pub ok: bool,
    pub user: Option<SlackUser>,
    pub error: Option<String>,
}

/// A Slack user.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SlackUser {
    pub id: String,
    pub name: String,
    pub real_name: Option<String>,
    pub profile: UserProfile,
}

impl SlackUser {
    /// Display name, falling back to the real name and then the handle.
    pub fn display_name(&self) -> &str {
        [
            self.profile.display_name.as_str(),
            self.profile.real_name.as_str(),
            self.name.as_str(),
        ]
        .into_iter()
        .find(|n| !n.is_empty())
        .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserProfile {
    pub display_name: String,
    pub real_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[test]
    fn test_interactive_payload_parsing() {
        let request = InteractiveRequest {
            payload: Some(
                r#"{
                    "type": "interactive_message",
                    "token": "secret",
                    "callback_id": "lamp",
                    "actions": [{"name": "color", "type": "button", "value": "blue-pulse"}],
                    "team": {"id": "T1", "domain": "acme"},
                    "user": {"id": "U1", "name": "ada"}
                }"#
                .into(),
            ),
            ..Default::default()
        };

        let payload = request.parse_payload().unwrap().unwrap();
        assert_eq!(payload.token, "secret");
        assert_eq!(payload.first_action_value(), Some("blue-pulse"));
        assert_eq!(payload.team.unwrap().name.as_deref(), Some("acme"));
    }

    #[test]
    fn test_missing_payload() {
        let request = InteractiveRequest::default();
        assert!(request.parse_payload().unwrap().is_none());
    }

    #[test]
    fn test_invalid_payload() {
        let request = InteractiveRequest {
            payload: Some("not json".into()),
            ..Default::default()
        };
        assert_err!(request.parse_payload());
    }

    #[test]
    fn test_url_verification_detection() {
        let request: InteractiveRequest = serde_json::from_str(
            r#"{"token": "secret", "type": "url_verification", "challenge": "abc"}"#,
        )
        .unwrap();
        assert!(request.is_url_verification());
        assert_eq!(request.challenge.as_deref(), Some("abc"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = SlackUser {
            name: "ada".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ada");

        user.profile.real_name = "Ada Lovelace".into();
        assert_eq!(user.display_name(), "Ada Lovelace");

        user.profile.display_name = "Countess".into();
        assert_eq!(user.display_name(), "Countess");
    }
}
