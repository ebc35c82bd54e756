//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lamp_bot::api::{create_router, AppState};
use lamp_client::{LampCommand, LampError, LampTransport};
use secrecy::SecretString;
use slack_client::{SlackError, SlackUser, UserDirectory, UserProfile};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use team_registry::{BotRegistration, RegistryError, TeamDirectory, TeamRegistration};

pub const TOKEN: &str = "verification-secret";

/// Lamp fake recording every command it is asked to send.
#[derive(Default)]
pub struct RecordingLamp {
    pub sent: Mutex<Vec<LampCommand>>,
    pub unreachable: bool,
}

impl RecordingLamp {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<LampCommand> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl LampTransport for RecordingLamp {
    async fn send(&self, command: &LampCommand) -> Result<(), LampError> {
        self.sent.lock().unwrap().push(command.clone());
        if self.unreachable {
            return Err(LampError::Timeout("connecting to the lamp"));
        }
        Ok(())
    }
}

/// Registry fake backed by a map of team id to bot token.
#[derive(Default)]
pub struct FakeTeams {
    pub tokens: HashMap<String, String>,
    pub lookups: AtomicUsize,
}

impl FakeTeams {
    pub fn with_team(team_id: &str, token: &str) -> Self {
        Self {
            tokens: HashMap::from([(team_id.to_string(), token.to_string())]),
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TeamDirectory for FakeTeams {
    async fn find_team(&self, team_id: &str) -> Result<Option<TeamRegistration>, RegistryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokens.get(team_id).map(|token| TeamRegistration {
            team_id: Some(team_id.to_string()),
            team_name: None,
            bot: BotRegistration {
                bot_access_token: token.clone(),
                bot_user_id: None,
            },
        }))
    }
}

/// User directory fake returning users keyed by (token, user id).
#[derive(Default)]
pub struct FakeUsers {
    pub users: HashMap<(String, String), String>,
    pub lookups: AtomicUsize,
}

impl FakeUsers {
    pub fn with_user(token: &str, user_id: &str, display_name: &str) -> Self {
        Self {
            users: HashMap::from([(
                (token.to_string(), user_id.to_string()),
                display_name.to_string(),
            )]),
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for FakeUsers {
    async fn user_info(&self, access_token: &str, user_id: &str) -> Result<SlackUser, SlackError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let display_name = self
            .users
            .get(&(access_token.to_string(), user_id.to_string()))
            .ok_or_else(|| SlackError::Api("user_not_found".into()))?;

        Ok(SlackUser {
            id: user_id.to_string(),
            name: display_name.to_lowercase(),
            profile: UserProfile {
                display_name: display_name.clone(),
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

/// Fakes wired into a router.
pub struct TestApp {
    pub router: axum::Router,
    pub lamp: Arc<RecordingLamp>,
    pub teams: Arc<FakeTeams>,
    pub users: Arc<FakeUsers>,
}

pub fn test_app(lamp: RecordingLamp, teams: FakeTeams, users: FakeUsers) -> TestApp {
    let lamp = Arc::new(lamp);
    let teams = Arc::new(teams);
    let users = Arc::new(users);

    let state = AppState::new(
        SecretString::new(TOKEN.into()),
        "tjlamp",
        lamp.clone(),
        teams.clone(),
        users.clone(),
    );

    TestApp {
        router: create_router(state),
        lamp,
        teams,
        users,
    }
}

/// Encode key/value pairs as an `application/x-www-form-urlencoded` body.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
