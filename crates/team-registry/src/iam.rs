//! IBM Cloud IAM API key exchange for Cloudant bearer tokens.

use crate::error::RegistryError;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Default IAM token endpoint.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    token: SecretString,
    expires_at: Instant,
}

/// Exchanges an API key for bearer tokens and caches them until expiry.
pub struct IamTokenProvider {
    client: Client,
    token_url: String,
    api_key: SecretString,
    cached: RwLock<Option<CachedToken>>,
}

impl IamTokenProvider {
    pub fn new(client: Client, token_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            api_key,
            cached: RwLock::new(None),
        }
    }

    /// Get a valid bearer token, exchanging the API key if needed.
    #[instrument(skip(self), fields(token_url = %self.token_url))]
    pub async fn token(&self) -> Result<SecretString, RegistryError> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        if let Some(existing) = cached.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < existing.expires_at {
                return Ok(existing.token.clone());
            }
        }

        debug!("Exchanging API key for IAM token");

        let response = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("apikey", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Auth(format!("{} - {}", status, body)));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::Auth(format!("Failed to parse token response: {}", e)))?;

        let token = SecretString::new(body.access_token);
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + Duration::from_secs(body.expires_in),
        });

        Ok(token)
    }
}
