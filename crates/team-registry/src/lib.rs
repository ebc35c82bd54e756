//! Team registration lookup against a Cloudant / CouchDB view.
//!
//! Each team that installs the bot has a document holding its OAuth
//! registration. The registry client resolves a team id to that registration
//! so the bot can call the Slack Web API with the team's own token.

mod client;
mod error;
mod iam;
mod types;

pub use client::{Credentials, RegistryClient, TeamDirectory, DEFAULT_DESIGN_DOC, DEFAULT_VIEW};
pub use error::RegistryError;
pub use iam::{IamTokenProvider, DEFAULT_IAM_URL};
pub use types::{BotRegistration, TeamRegistration};
