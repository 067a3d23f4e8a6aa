//! Help command handler.
//!
//! Without topic, greets the user and points at `help commands`. The known
//! topics are `rules` and `commands`.
//!
//! This is a stateless command that always returns the same message for a topic.

use log::debug;

use crate::commands::{
    CommandResult,
    markdown_response::{
        format_help, format_help_commands, format_help_rules, format_unknown_help_topic,
    },
};

/// Returns the help text for an optional topic.
pub fn handle_help(topic: Option<&str>) -> CommandResult {
    debug!("handling help command, topic: {:?}", topic);

    let response = match topic {
        None => format_help(),
        Some("rules") => format_help_rules(),
        Some("commands") => format_help_commands(),
        Some(_) => format_unknown_help_topic(),
    };

    CommandResult::reply(response)
}
