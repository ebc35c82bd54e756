//! Configuration for the lamp bot, loaded from environment variables.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;
use team_registry::Credentials;

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Slack configuration
    pub slack: SlackConfig,

    /// Lamp endpoint configuration
    #[serde(default)]
    pub lamp: LampConfig,

    /// Team registry (Cloudant) configuration
    pub registry: RegistryConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    /// Shared verification token Slack sends with every request
    pub verification_token: SecretString,

    /// Web API base URL
    #[serde(default = "default_slack_api_url")]
    pub api_url: String,

    /// Web API request timeout
    #[serde(default = "default_http_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LampConfig {
    /// WebSocket endpoint of the lamp
    #[serde(default = "default_lamp_url")]
    pub url: String,

    /// Name the lamp goes by in replies
    #[serde(default = "default_lamp_name")]
    pub name: String,

    #[serde(default = "default_lamp_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    #[serde(default = "default_lamp_timeout", with = "humantime_serde")]
    pub send_timeout: Duration,

    /// Budget for the closing handshake after a send
    #[serde(default = "default_lamp_close_timeout", with = "humantime_serde")]
    pub close_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Database server URL
    pub url: String,

    /// Database holding the team registrations
    pub database: String,

    #[serde(default = "default_design_doc")]
    pub design_doc: String,

    #[serde(default = "default_view")]
    pub view: String,

    /// IAM API key; takes precedence over basic credentials
    #[serde(default)]
    pub iam_api_key: Option<SecretString>,

    #[serde(default = "default_iam_url")]
    pub iam_url: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<SecretString>,

    #[serde(default = "default_http_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl RegistryConfig {
    /// Credentials to use for database requests.
    pub fn credentials(&self) -> Credentials {
        if let Some(api_key) = &self.iam_api_key {
            return Credentials::Iam {
                token_url: self.iam_url.clone(),
                api_key: api_key.clone(),
            };
        }

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Credentials::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            _ => Credentials::None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for LampConfig {
    fn default() -> Self {
        Self {
            url: default_lamp_url(),
            name: default_lamp_name(),
            connect_timeout: default_lamp_timeout(),
            send_timeout: default_lamp_timeout(),
            close_timeout: default_lamp_close_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_slack_api_url() -> String {
    slack_client::DEFAULT_API_URL.into()
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_lamp_url() -> String {
    "ws://tjlamp.mybluemix.net:80/lamp".into()
}

fn default_lamp_name() -> String {
    "tjlamp".into()
}

fn default_lamp_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_lamp_close_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_design_doc() -> String {
    team_registry::DEFAULT_DESIGN_DOC.into()
}

fn default_view() -> String {
    team_registry::DEFAULT_VIEW.into()
}

fn default_iam_url() -> String {
    team_registry::DEFAULT_IAM_URL.into()
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Tokens are opaque strings; never coerce them to numbers
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        Self::from_source(config)
    }

    /// Deserialize from an already built configuration source.
    pub fn from_source(source: config::Config) -> Result<Self> {
        source
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
