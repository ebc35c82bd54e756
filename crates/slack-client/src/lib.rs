//! Slack webhook payload types and a minimal Web API client.

mod client;
mod error;
mod types;

pub use client::{SlackClient, UserDirectory, DEFAULT_API_URL};
pub use error::SlackError;
pub use types::*;
