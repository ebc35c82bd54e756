//! WebSocket transport to the lamp.

use crate::command::LampCommand;
use crate::error::LampError;
use async_trait::async_trait;
use futures_util::SinkExt;
use std::time::Duration;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, instrument, warn};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Something that can deliver a command to the lamp.
#[async_trait]
pub trait LampTransport: Send + Sync {
    /// Deliver a single command.
    async fn send(&self, command: &LampCommand) -> Result<(), LampError>;
}

/// Lamp client that opens one WebSocket connection per command.
///
/// Every call connects, sends a single text frame and closes with a normal
/// closure (1000). The close is attempted even when the send fails and is
/// bounded by its own timeout. The socket is dropped on every return path.
#[derive(Debug, Clone)]
pub struct LampClient {
    url: String,
    connect_timeout: Duration,
    send_timeout: Duration,
    close_timeout: Duration,
}

impl LampClient {
    /// Create a new lamp client for the given `ws://` or `wss://` endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            send_timeout: DEFAULT_SEND_TIMEOUT,
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        }
    }

    /// Override the connect and send timeouts.
    pub fn with_timeouts(mut self, connect_timeout: Duration, send_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.send_timeout = send_timeout;
        self
    }

    /// Override how long the closing handshake may take.
    pub fn with_close_timeout(mut self, close_timeout: Duration) -> Self {
        self.close_timeout = close_timeout;
        self
    }

    /// Get the configured endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LampTransport for LampClient {
    #[instrument(skip(self, command), fields(url = %self.url, cmd = %command.cmd))]
    async fn send(&self, command: &LampCommand) -> Result<(), LampError> {
        let payload = command.to_json()?;

        let (mut ws, _) = timeout(self.connect_timeout, connect_async(self.url.as_str()))
            .await
            .map_err(|_| LampError::Timeout("connecting to the lamp"))??;

        debug!(payload = %payload, "Connected, sending command");

        let sent = match timeout(self.send_timeout, ws.send(Message::text(payload))).await {
            Ok(result) => result.map_err(LampError::from),
            Err(_) => Err(LampError::Timeout("sending to the lamp")),
        };

        let close = CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        };
        match timeout(self.close_timeout, ws.close(Some(close))).await {
            Ok(Ok(())) => debug!("Connection closed"),
            Ok(Err(e)) => warn!("Failed to close lamp connection: {}", e),
            Err(_) => warn!("Timed out closing lamp connection"),
        }

        sent?;
        info!("Command sent successfully");
        Ok(())
    }
}
