//! Cloudant / CouchDB view client for team registrations.

use crate::error::RegistryError;
use crate::iam::IamTokenProvider;
use crate::types::{TeamRegistration, ViewResponse};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Design document and view indexing registrations by team id.
pub const DEFAULT_DESIGN_DOC: &str = "bots";
pub const DEFAULT_VIEW: &str = "by_team_id";

/// Resolves the bot registration for a Slack team.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Find the registration for a team, or `None` if the team is unknown.
    async fn find_team(&self, team_id: &str) -> Result<Option<TeamRegistration>, RegistryError>;
}

/// How requests to the database are authenticated.
pub enum Credentials {
    None,
    Basic {
        username: String,
        password: SecretString,
    },
    Iam {
        token_url: String,
        api_key: SecretString,
    },
}

enum Auth {
    None,
    Basic {
        username: String,
        password: SecretString,
    },
    Iam(IamTokenProvider),
}

/// Registry client querying a view keyed by team id.
pub struct RegistryClient {
    client: Client,
    view_url: Url,
    auth: Auth,
}

impl RegistryClient {
    /// Create a client for `database` on the server at `base_url`, querying
    /// the given design document view.
    pub fn new(
        base_url: &str,
        database: &str,
        design_doc: &str,
        view: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder().timeout(timeout).build()?;

        let mut view_url =
            Url::parse(base_url).map_err(|e| RegistryError::InvalidUrl(e.to_string()))?;
        view_url
            .path_segments_mut()
            .map_err(|_| RegistryError::InvalidUrl(base_url.to_string()))?
            .pop_if_empty()
            .extend([database, "_design", design_doc, "_view", view]);

        let auth = match credentials {
            Credentials::None => Auth::None,
            Credentials::Basic { username, password } => Auth::Basic { username, password },
            Credentials::Iam { token_url, api_key } => {
                Auth::Iam(IamTokenProvider::new(client.clone(), token_url, api_key))
            }
        };

        Ok(Self {
            client,
            view_url,
            auth,
        })
    }

    /// Full URL of the queried view.
    pub fn view_url(&self) -> &Url {
        &self.view_url
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, RegistryError> {
        Ok(match &self.auth {
            Auth::None => request,
            Auth::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            Auth::Iam(provider) => {
                let token = provider.token().await?;
                request.bearer_auth(token.expose_secret())
            }
        })
    }
}

#[async_trait]
impl TeamDirectory for RegistryClient {
    #[instrument(skip(self))]
    async fn find_team(&self, team_id: &str) -> Result<Option<TeamRegistration>, RegistryError> {
        let keys = serde_json::to_string(&[team_id])?;

        let request = self.client.get(self.view_url.clone()).query(&[
            ("keys", keys.as_str()),
            ("limit", "1"),
            ("include_docs", "true"),
        ]);
        let response = self.authorize(request).await?.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Registry view query failed");
            return Err(RegistryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let view: ViewResponse = response.json().await?;
        let registration = view
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.doc)
            .map(|doc| doc.registration);

        debug!(found = registration.is_some(), "Registry lookup complete");
        Ok(registration)
    }
}
