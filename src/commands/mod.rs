//! Bot command parsing and execution.
//!
//! This module turns Matrix messages starting with the command prefix into
//! replies sent back into the originating room.
//!
//! # Overview
//!
//! 1. **Parsing** - [`Commander::parse`] strips the prefix and builds a [`command::Command`]
//! 2. **Execution** - [`Commander::execute`] routes the command to its handler
//! 3. **Response** - The handler returns Markdown replies that are sent to the room
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← parse() + execute()
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────────────┐      ┌──────────────────────┐
//! │ Action Handlers     │ ───▶ │ ChatActions          │
//! │  - handle_echo      │      │  join / leave room   │
//! │  - handle_help      │      └──────────────────────┘
//! │  - handle_invite    │      ┌──────────────────────┐
//! │  - handle_lab       │ ───▶ │ lab::Requester       │
//! └─────────────────────┘      │  sensor HTTP GET     │
//!      │                       └──────────────────────┘
//!      ▼
//! ┌────────────────────┐
//! │  CommandResult     │ ──▶ ChatActions::send_text
//! └────────────────────┘
//! ```
//!
//! # Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `echo` | `<text>` | Repeat the text |
//! | `help` | `[rules\|commands]` | Display help |
//! | `invite` | `join\|leave <room>` | Make the bot join or leave a room |
//! | `lab` | `[light\|wifi]` | Tell whether someone is in the lab |
//!
//! Any other verb gets an "Unknown command" reply.
//!
//! # Error Handling
//!
//! Messages that are not commands produce a [`CommandParseError`] and must be
//! ignored. Failures while executing a command (room join failure, sensor
//! error) are turned into replies; missing arguments are silently ignored.
//!
//! # Module Organization
//!
//! - [`commander`] - Main orchestrator for parsing and executing commands
//! - [`command`] - Command enum definitions and parsing logic
//! - [`actions`] - Individual command handler implementations
//! - [`markdown_response`] - Response formatting utilities

use mockall::automock;

mod actions;
mod command;
mod commander;
mod markdown_response;

pub use crate::commands::commander::Commander;

/// Chat operations a command may perform.
///
/// Implemented by the Matrix client, mocked in tests.
#[automock]
pub trait ChatActions {
    /// Sends a Markdown text message into a room.
    ///
    /// Failures are logged by the implementation.
    async fn send_text(&self, room_id: &str, body: &str);
    /// Joins a room given its id or alias.
    async fn join_room(&self, room: &str) -> Result<(), anyhow::Error>;
    /// Leaves a room given its id or alias.
    async fn leave_room(&self, room: &str) -> Result<(), anyhow::Error>;
}

/// Result of command execution.
///
/// Handlers don't send messages themselves, they return the replies and the
/// [`Commander`] sends them in order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Markdown-formatted replies, sent in order
    pub responses: Vec<String>,
}

impl CommandResult {
    /// A result with a single reply.
    pub fn reply(response: String) -> Self {
        CommandResult {
            responses: vec![response],
        }
    }

    /// A result without any reply.
    pub fn silent() -> Self {
        CommandResult::default()
    }
}

/// Errors that can occur during command parsing.
///
/// Both variants mean the message must be ignored without reply.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParseError {
    /// Message does not start with the command prefix
    NotForBot,
    /// Message is only the command prefix
    MissingVerb,
}
