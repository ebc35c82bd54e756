//! Lamp client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LampError {
    #[error("Unable to parse command \"{0}\"")]
    UnrecognizedCommand(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Timed out while {0}")]
    Timeout(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
