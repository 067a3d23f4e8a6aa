//! Command parsing.
//!
//! This module converts the body of a Matrix message into a structured
//! [`Command`]. A message is a command when it starts with the configured
//! prefix; the first whitespace-delimited word after the prefix is the verb and
//! the following words are its arguments.

use log::debug;

use crate::commands::CommandParseError;

/// Represents a parsed bot command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Echo the arguments back into the room
    Echo(Vec<String>),
    /// Display help, optionally about a topic
    Help(Option<String>),
    /// Join or leave a room
    ///
    /// The arguments are kept raw: `join|leave <room>` is validated by the handler.
    Invite(Vec<String>),
    /// Query the lab sensors, optionally a single one
    Lab(Option<String>),
    /// Unknown verb, holds the whole command text
    Unknown(String),
}

impl Command {
    /// Parses a message body into a Command.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The prefix a message must start with to be a command
    /// * `body` - The message text to parse
    ///
    /// # Errors
    ///
    /// - [`CommandParseError::NotForBot`] if the body does not start with the prefix
    /// - [`CommandParseError::MissingVerb`] if nothing follows the prefix
    ///
    /// # Examples
    ///
    /// ```
    /// # use dankbot::commands::command::Command;
    /// let command = Command::parse("!c ", "!c echo hello").unwrap();
    /// assert_eq!(command, Command::Echo(vec!["hello".to_string()]));
    /// ```
    pub fn parse(prefix: &str, body: &str) -> Result<Self, CommandParseError> {
        let Some(text) = body.strip_prefix(prefix) else {
            return Err(CommandParseError::NotForBot);
        };
        let text = text.trim();

        let mut words = text.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandParseError::MissingVerb);
        };
        let mut args: Vec<String> = words.map(str::to_owned).collect();

        debug!("parsing command verb: {}, args: {:?}", verb, args);

        let command = match verb {
            "echo" => Command::Echo(args),
            "help" => Command::Help(first(&mut args)),
            "invite" => Command::Invite(args),
            "lab" => Command::Lab(first(&mut args)),
            _ => Command::Unknown(text.to_owned()),
        };

        Ok(command)
    }
}

fn first(args: &mut Vec<String>) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "!c ";

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_echo() {
        let result = Command::parse(PREFIX, "!c echo a b");
        assert_eq!(result.unwrap(), Command::Echo(args(&["a", "b"])));
    }

    #[test]
    fn test_parse_echo_collapses_whitespace() {
        let result = Command::parse(PREFIX, "!c   echo  a \t b  ");
        assert_eq!(result.unwrap(), Command::Echo(args(&["a", "b"])));
    }

    #[test]
    fn test_parse_echo_no_args() {
        let result = Command::parse(PREFIX, "!c echo");
        assert_eq!(result.unwrap(), Command::Echo(vec![]));
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(Command::parse(PREFIX, "!c help").unwrap(), Command::Help(None));
        assert_eq!(
            Command::parse(PREFIX, "!c help rules").unwrap(),
            Command::Help(Some("rules".to_owned()))
        );
    }

    #[test]
    fn test_parse_help_ignores_extra_args() {
        assert_eq!(
            Command::parse(PREFIX, "!c help commands please").unwrap(),
            Command::Help(Some("commands".to_owned()))
        );
    }

    #[test]
    fn test_parse_invite() {
        let result = Command::parse(PREFIX, "!c invite join #room:server");
        assert_eq!(
            result.unwrap(),
            Command::Invite(args(&["join", "#room:server"]))
        );
    }

    #[test]
    fn test_parse_lab() {
        assert_eq!(Command::parse(PREFIX, "!c lab").unwrap(), Command::Lab(None));
        assert_eq!(
            Command::parse(PREFIX, "!c lab wifi").unwrap(),
            Command::Lab(Some("wifi".to_owned()))
        );
    }

    #[test]
    fn test_parse_unknown_keeps_command_text() {
        let result = Command::parse(PREFIX, "!c dance  now ");
        assert_eq!(result.unwrap(), Command::Unknown("dance  now".to_owned()));
    }

    #[test]
    fn test_parse_verb_must_match_whole_word() {
        let result = Command::parse(PREFIX, "!c echoes a");
        assert_eq!(result.unwrap(), Command::Unknown("echoes a".to_owned()));
    }

    #[test]
    fn test_parse_verbs_are_case_sensitive() {
        let result = Command::parse(PREFIX, "!c Echo a");
        assert_eq!(result.unwrap(), Command::Unknown("Echo a".to_owned()));
    }

    #[test]
    fn test_parse_not_for_bot() {
        assert!(matches!(
            Command::parse(PREFIX, "echo a b"),
            Err(CommandParseError::NotForBot)
        ));
        assert!(matches!(
            Command::parse(PREFIX, "hello !c echo"),
            Err(CommandParseError::NotForBot)
        ));
    }

    #[test]
    fn test_parse_prefix_only() {
        assert!(matches!(
            Command::parse(PREFIX, "!c    "),
            Err(CommandParseError::MissingVerb)
        ));
    }

    #[test]
    fn test_parse_custom_prefix() {
        let result = Command::parse("dank:", "dank:lab light");
        assert_eq!(result.unwrap(), Command::Lab(Some("light".to_owned())));
    }
}
