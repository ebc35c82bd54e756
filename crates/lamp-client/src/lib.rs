//! Lamp control: command mapping, random colors and the WebSocket transport.

mod client;
pub mod color;
mod command;
mod error;

pub use client::{LampClient, LampTransport};
pub use command::{LampAction, LampCommand, DISCO_COLOR, RANDOM_COLOR};
pub use error::LampError;
