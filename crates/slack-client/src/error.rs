//! Slack client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error string reported by Slack in a `{"ok": false}` response.
    #[error("{0}")]
    Api(String),

    #[error("unknown response")]
    UnknownResponse,
}
