//! Interactive message pipeline: button clicks and the URL verification handshake.

use super::{send_to_lamp, verify_token};
use crate::error::BotError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lamp_client::{LampCommand, LampTransport};
use secrecy::SecretString;
use slack_client::InteractiveRequest;
use std::sync::Arc;
use tracing::{info, instrument};

/// Outcome of an interactive request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveReply {
    /// Answer to the URL verification handshake: `{"challenge": ...}` as
    /// base64-encoded JSON.
    Challenge(String),
    /// The selected action was sent to the lamp.
    Sent,
}

/// Handles button clicks on lamp messages.
pub struct InteractiveHandler {
    verification_token: SecretString,
    lamp: Arc<dyn LampTransport>,
}

impl InteractiveHandler {
    pub fn new(verification_token: SecretString, lamp: Arc<dyn LampTransport>) -> Self {
        Self {
            verification_token,
            lamp,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn handle(&self, request: &InteractiveRequest) -> Result<InteractiveReply, BotError> {
        let payload = request
            .parse_payload()
            .map_err(|e| BotError::BadRequest(format!("Invalid payload: {}", e)))?;

        // Button clicks carry the token inside the payload, the handshake at top level
        let provided = payload
            .as_ref()
            .map(|p| p.token.as_str())
            .or(request.token.as_deref())
            .unwrap_or_default();
        verify_token(&self.verification_token, provided)?;

        if request.is_url_verification() {
            if let Some(challenge) = request.challenge.as_deref() {
                verify_token(
                    &self.verification_token,
                    request.token.as_deref().unwrap_or_default(),
                )?;
                info!("URL verification from Slack");
                return Ok(InteractiveReply::Challenge(encode_challenge(challenge)));
            }
        }

        let payload = payload.ok_or_else(|| BotError::BadRequest("Missing payload".into()))?;
        let value = payload
            .first_action_value()
            .ok_or_else(|| BotError::CommandParse("No action selected".into()))?;

        info!(action = %value, "Processing interactive action");
        let command =
            LampCommand::from_action(value).map_err(|e| BotError::CommandParse(e.to_string()))?;

        send_to_lamp(self.lamp.as_ref(), &command).await?;
        Ok(InteractiveReply::Sent)
    }
}

fn encode_challenge(challenge: &str) -> String {
    let body = serde_json::json!({ "challenge": challenge }).to_string();
    BASE64.encode(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lamp_client::LampError;
    use std::sync::Mutex;

    /// Lamp fake recording every command it receives.
    #[derive(Default)]
    struct RecordingLamp {
        sent: Mutex<Vec<LampCommand>>,
    }

    #[async_trait]
    impl LampTransport for RecordingLamp {
        async fn send(&self, command: &LampCommand) -> Result<(), LampError> {
            self.sent.lock().unwrap().push(command.clone());
            Ok(())
        }
    }

    fn handler() -> (InteractiveHandler, Arc<RecordingLamp>) {
        let lamp = Arc::new(RecordingLamp::default());
        let handler = InteractiveHandler::new(SecretString::new("secret".into()), lamp.clone());
        (handler, lamp)
    }

    fn click(token: &str, value: &str) -> InteractiveRequest {
        InteractiveRequest {
            payload: Some(
                serde_json::json!({
                    "type": "interactive_message",
                    "token": token,
                    "actions": [{"name": "lamp", "type": "button", "value": value}]
                })
                .to_string(),
            ),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_button_click_drives_lamp() {
        let (handler, lamp) = handler();

        let reply = handler.handle(&click("secret", "blue-pulse")).await.unwrap();
        assert_eq!(reply, InteractiveReply::Sent);
        assert_eq!(*lamp.sent.lock().unwrap(), vec![LampCommand::pulse("blue")]);
    }

    #[tokio::test]
    async fn test_bad_token_rejected() {
        let (handler, lamp) = handler();

        let result = handler.handle(&click("wrong", "on")).await;
        assert!(matches!(result, Err(BotError::AuthRejected)));
        assert!(lamp.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_url_verification() {
        let (handler, lamp) = handler();
        let request = InteractiveRequest {
            token: Some("secret".into()),
            kind: Some("url_verification".into()),
            challenge: Some("3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P".into()),
            ..Default::default()
        };

        let reply = handler.handle(&request).await.unwrap();
        let InteractiveReply::Challenge(body) = reply else {
            panic!("expected challenge reply");
        };
        let decoded: serde_json::Value =
            serde_json::from_slice(&BASE64.decode(body).unwrap()).unwrap();
        assert_eq!(
            decoded["challenge"],
            "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"
        );
        assert!(lamp.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_url_verification_with_wrong_token() {
        let (handler, _) = handler();
        let request = InteractiveRequest {
            token: Some("wrong".into()),
            kind: Some("url_verification".into()),
            challenge: Some("abc".into()),
            ..Default::default()
        };

        assert!(matches!(handler.handle(&request).await, Err(BotError::AuthRejected)));
    }

    #[tokio::test]
    async fn test_payload_without_actions() {
        let (handler, lamp) = handler();
        let request = InteractiveRequest {
            payload: Some(r#"{"token": "secret", "actions": []}"#.into()),
            ..Default::default()
        };

        let result = handler.handle(&request).await;
        assert!(matches!(result, Err(BotError::CommandParse(_))));
        assert!(lamp.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let (handler, _) = handler();
        let request = InteractiveRequest {
            payload: Some("{not json".into()),
            ..Default::default()
        };

        assert!(matches!(handler.handle(&request).await, Err(BotError::BadRequest(_))));
    }
}
