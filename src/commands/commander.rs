//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing bot commands. It coordinates command parsing and execution, routing
//! commands to their appropriate handlers and sending the replies.
//!
//! # Flow
//!
//! ```text
//! Matrix Message → parse() → Command → execute() → replies sent to the room
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # use dankbot::commands::Commander;
//! # async fn example(matrix_client: dankbot::matrix::MatrixClient, lab: dankbot::lab::LabRequester) {
//! let commander = Commander::new("!c ");
//!
//! if let Ok(command) = commander.parse("!c echo hello") {
//!     commander
//!         .execute(&command, "!room:example.com", &matrix_client, &lab)
//!         .await;
//! }
//! # }
//! ```

use log::debug;

use crate::{
    commands::{
        ChatActions, CommandParseError, CommandResult,
        actions::{handle_echo, handle_help, handle_invite, handle_lab},
        command::Command,
        markdown_response::format_unknown_command,
    },
    lab::Requester,
};

/// Command orchestrator for parsing and executing bot commands.
///
/// # Command Prefix
///
/// All commands must start with the configured prefix. Messages without this
/// prefix are silently ignored (returning [`CommandParseError::NotForBot`]).
///
/// # Supported Commands
///
/// - `echo <text>` - Repeat the text
/// - `help [topic]` - Display help information
/// - `invite join|leave <room>` - Join or leave a room
/// - `lab [light|wifi]` - Read the lab sensors
pub struct Commander {
    /// Prefix a message must start with to be a command
    prefix: String,
}

impl Commander {
    /// Creates a new Commander recognizing messages starting with `prefix`.
    pub fn new(prefix: &str) -> Self {
        Commander {
            prefix: prefix.to_owned(),
        }
    }

    /// Parses a Matrix message body into a structured command.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - The message is a command, possibly an unknown one
    /// * `Err(CommandParseError)` - The message must be ignored
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.prefix, body)
    }

    /// Executes a parsed command and sends its replies into the room.
    ///
    /// # Arguments
    ///
    /// * `command` - The parsed command to execute
    /// * `room_id` - The room the command was sent in, replies go there
    /// * `chat` - Chat operations used to join/leave rooms and send replies
    /// * `lab` - Lab sensor client
    ///
    /// # Returns
    ///
    /// The replies that were sent, in order.
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Echo`] → [`handle_echo`]
    /// - [`Command::Help`] → [`handle_help`]
    /// - [`Command::Invite`] → [`handle_invite`]
    /// - [`Command::Lab`] → [`handle_lab`]
    /// - [`Command::Unknown`] → [`format_unknown_command`]
    pub async fn execute<C, R>(
        &self,
        command: &Command,
        room_id: &str,
        chat: &C,
        lab: &R,
    ) -> CommandResult
    where
        C: ChatActions,
        R: Requester,
    {
        let result = match command {
            Command::Echo(args) => handle_echo(args),
            Command::Help(topic) => handle_help(topic.as_deref()),
            Command::Invite(args) => handle_invite(chat, args).await,
            Command::Lab(sensor) => handle_lab(lab, sensor.as_deref()).await,
            Command::Unknown(text) => CommandResult::reply(format_unknown_command(text)),
        };

        debug!("command result {:?}", result);

        for response in &result.responses {
            chat.send_text(room_id, response).await;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use mockall::{Sequence, predicate::eq};

    use super::*;
    use crate::{
        commands::MockChatActions,
        lab::{MockRequester, SensorKind},
    };

    const ROOM_ID: &str = "!room:example.com";

    async fn run(commander: &Commander, body: &str, chat: &MockChatActions) -> CommandResult {
        let lab = MockRequester::new();
        let command = commander.parse(body).unwrap();
        commander.execute(&command, ROOM_ID, chat, &lab).await
    }

    #[test]
    fn test_parse_valid_command() {
        let commander = Commander::new("!c ");
        let result = commander.parse("!c help");
        assert!(matches!(result, Ok(Command::Help(None))));
    }

    #[test]
    fn test_parse_not_for_bot() {
        let commander = Commander::new("!c ");
        let result = commander.parse("This is just a regular message");
        assert_eq!(result, Err(CommandParseError::NotForBot));
    }

    #[tokio::test]
    async fn test_execute_echo() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        chat.expect_send_text()
            .with(eq(ROOM_ID), eq("a b"))
            .times(1)
            .returning(|_, _| ());

        let result = run(&commander, "!c echo a b", &chat).await;

        assert_eq!(result.responses, vec!["a b"]);
    }

    #[tokio::test]
    async fn test_execute_echo_without_text_sends_nothing() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        chat.expect_send_text().never();

        let result = run(&commander, "!c echo", &chat).await;

        assert!(result.responses.is_empty());
    }

    #[tokio::test]
    async fn test_execute_help() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        chat.expect_send_text()
            .withf(|room_id, body| room_id == ROOM_ID && body.contains("help commands"))
            .times(1)
            .returning(|_, _| ());

        run(&commander, "!c help", &chat).await;
    }

    #[tokio::test]
    async fn test_execute_invite_join() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        let mut seq = Sequence::new();
        chat.expect_join_room()
            .with(eq("#room:server"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        chat.expect_send_text()
            .with(eq(ROOM_ID), eq("Successfully joined given room."))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());

        run(&commander, "!c invite join #room:server", &chat).await;
    }

    #[tokio::test]
    async fn test_execute_invite_join_failure() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        chat.expect_join_room()
            .returning(|_| Err(anyhow::anyhow!("forbidden")));
        chat.expect_send_text()
            .with(eq(ROOM_ID), eq("Joining to room failed, forbidden"))
            .times(1)
            .returning(|_, _| ());

        run(&commander, "!c invite join #private:server", &chat).await;
    }

    #[tokio::test]
    async fn test_execute_invite_missing_room_is_silent() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        chat.expect_leave_room().never();
        chat.expect_send_text().never();

        run(&commander, "!c invite leave", &chat).await;
    }

    #[tokio::test]
    async fn test_execute_unknown_command() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        chat.expect_send_text()
            .withf(|_, body| body.starts_with("Unknown command"))
            .times(1)
            .returning(|_, _| ());

        let result = run(&commander, "!c dance now", &chat).await;

        assert_eq!(
            result.responses,
            vec!["Unknown command 'dance now'. Try the 'help' command for more information."]
        );
    }

    #[tokio::test]
    async fn test_execute_lab_sends_both_sub_replies() {
        let commander = Commander::new("!c ");
        let mut chat = MockChatActions::new();
        let mut lab = MockRequester::new();
        lab.expect_get_status()
            .with(eq(SensorKind::Light))
            .times(1)
            .returning(|_| Ok(false));
        lab.expect_get_status()
            .with(eq(SensorKind::Wifi))
            .times(1)
            .returning(|_| Ok(true));

        let mut seq = Sequence::new();
        chat.expect_send_text()
            .with(eq(ROOM_ID), eq("Lab lights are off."))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        chat.expect_send_text()
            .with(eq(ROOM_ID), eq("Someone is connected to the lab wifi."))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());

        let command = commander.parse("!c lab").unwrap();
        let result = commander.execute(&command, ROOM_ID, &chat, &lab).await;

        assert_eq!(result.responses.len(), 2);
    }
}
