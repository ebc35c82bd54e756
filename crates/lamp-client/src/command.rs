//! Lamp command messages and the mapping from Slack input to them.

use crate::color::random_color;
use crate::error::LampError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color keyword replaced by a freshly generated color before dispatch.
pub const RANDOM_COLOR: &str = "random";

/// Color keyword understood by the lamp firmware as a cycling effect.
pub const DISCO_COLOR: &str = "disco";

/// What the lamp should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LampAction {
    On,
    Off,
    Shine,
    Pulse,
    Wave,
}

impl fmt::Display for LampAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LampAction::On => "on",
            LampAction::Off => "off",
            LampAction::Shine => "shine",
            LampAction::Pulse => "pulse",
            LampAction::Wave => "wave",
        };
        f.write_str(name)
    }
}

/// Message sent to the lamp over the WebSocket.
///
/// Serializes as `{"cmd": "shine", "color": "red"}`; `color` is omitted for
/// actions that don't take one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LampCommand {
    pub cmd: LampAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LampCommand {
    pub fn on() -> Self {
        Self::plain(LampAction::On)
    }

    pub fn off() -> Self {
        Self::plain(LampAction::Off)
    }

    pub fn wave() -> Self {
        Self::plain(LampAction::Wave)
    }

    pub fn shine(color: impl Into<String>) -> Self {
        Self::colored(LampAction::Shine, color)
    }

    pub fn pulse(color: impl Into<String>) -> Self {
        Self::colored(LampAction::Pulse, color)
    }

    fn plain(cmd: LampAction) -> Self {
        Self { cmd, color: None }
    }

    fn colored(cmd: LampAction, color: impl Into<String>) -> Self {
        Self {
            cmd,
            color: Some(color.into()),
        }
    }

    /// Map a slash command and its argument text to a lamp command.
    ///
    /// | command   | text       | result                 |
    /// |-----------|------------|------------------------|
    /// | `/lamp`   | `on`/`off` | on / off               |
    /// | `/shine`  | color      | shine with color       |
    /// | `/pulse`  | color      | pulse with color       |
    /// | `/disco`  | ignored    | shine with `disco`     |
    /// | `/wave`   | ignored    | wave                   |
    pub fn from_slash(command: &str, text: &str) -> Result<Self, LampError> {
        let text = text.trim();
        let unrecognized =
            || LampError::UnrecognizedCommand(format!("{} {}", command, text).trim().to_string());

        let parsed = match command.trim() {
            "/lamp" => match text {
                "on" => Self::on(),
                "off" => Self::off(),
                _ => return Err(unrecognized()),
            },
            "/shine" if !text.is_empty() => Self::shine(text),
            "/pulse" if !text.is_empty() => Self::pulse(text),
            "/disco" => Self::shine(DISCO_COLOR),
            "/wave" => Self::wave(),
            _ => return Err(unrecognized()),
        };

        Ok(parsed.resolve_random())
    }

    /// Map an interactive button value (`<color>-<mode>`) to a lamp command.
    ///
    /// The exact keywords `on`, `off` and `wave` win over any dash split.
    /// Otherwise a `pulse` mode selects pulse and anything else shines the
    /// leading color segment.
    pub fn from_action(value: &str) -> Result<Self, LampError> {
        let value = value.trim();

        let parsed = match value {
            "on" => Self::on(),
            "off" => Self::off(),
            "wave" => Self::wave(),
            _ => {
                let mut parts = value.split('-');
                let color = parts.next().unwrap_or_default();
                if color.is_empty() {
                    return Err(LampError::UnrecognizedCommand(value.to_string()));
                }
                match parts.next() {
                    Some("pulse") => Self::pulse(color),
                    _ => Self::shine(color),
                }
            }
        };

        Ok(parsed.resolve_random())
    }

    /// Replace the `random` color keyword with a generated color.
    pub fn resolve_random(mut self) -> Self {
        if self.color.as_deref() == Some(RANDOM_COLOR) {
            let color = random_color();
            tracing::debug!(color = %color, "Chose random color");
            self.color = Some(color);
        }
        self
    }

    /// Encode as the JSON text frame sent to the lamp.
    pub fn to_json(&self) -> Result<String, LampError> {
        Ok(serde_json::to_string(self)?)
    }
}
