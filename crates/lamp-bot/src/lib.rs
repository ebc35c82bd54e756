//! Lamp Bot - Slack webhooks driving a WebSocket-connected lamp.
//!
//! Two webhooks are served:
//! - slash commands (`/lamp`, `/shine`, `/pulse`, `/disco`, `/wave`) send a
//!   command to the lamp and greet the user by name
//! - interactive buttons send the clicked command to the lamp

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;

pub use config::Config;
pub use error::BotError;
pub use handlers::{InteractiveHandler, InteractiveReply, SlashCommandHandler};
