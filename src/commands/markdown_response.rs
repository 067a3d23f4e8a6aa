//! Markdown response formatters for bot commands.
//!
//! This module provides functions to format bot responses in Markdown format
//! for display in Matrix chat rooms.

use crate::lab::{LabError, SensorKind};

/// Formats the greeting shown by `help` without topic.
///
/// # Examples
///
/// ```
/// # use dankbot::commands::markdown_response::format_help;
/// let help = format_help();
/// assert!(help.contains("help commands"));
/// ```
pub fn format_help() -> String {
    "Hello, I am a bot made with matrix-sdk! Use `help commands` to view available commands."
        .to_owned()
}

/// Formats the `help rules` topic.
pub fn format_help_rules() -> String {
    "These are the rules!".to_owned()
}

/// Formats the `help commands` topic listing all available commands.
pub fn format_help_commands() -> String {
    "Available commands:\n\
        - `echo <text>`: repeat the text\n\
        - `help [rules|commands]`: show help\n\
        - `invite join <room>`: make me join a room\n\
        - `invite leave <room>`: make me leave a room\n\
        - `lab [light|wifi]`: tell whether someone is in the lab"
        .to_owned()
}

/// Formats the response for an unknown `help` topic.
pub fn format_unknown_help_topic() -> String {
    "Unknown help topic!".to_owned()
}

/// Formats the response for an unknown command.
///
/// # Arguments
///
/// * `command` - The command text as typed after the prefix
///
/// # Examples
///
/// ```
/// # use dankbot::commands::markdown_response::format_unknown_command;
/// let msg = format_unknown_command("dance");
/// assert!(msg.starts_with("Unknown command"));
/// ```
pub fn format_unknown_command(command: &str) -> String {
    format!("Unknown command '{command}'. Try the 'help' command for more information.")
}

/// Formats the response for an `invite` without arguments.
pub fn format_missing_invite() -> String {
    "You did not give me an invite.".to_owned()
}

/// Formats the response after joining a room.
pub fn format_successful_join() -> String {
    "Successfully joined given room.".to_owned()
}

/// Formats the response when joining a room failed.
pub fn format_join_failed(error: &anyhow::Error) -> String {
    format!("Joining to room failed, {error}")
}

/// Formats the response after leaving a room.
pub fn format_successful_leave() -> String {
    "Successfully left given room.".to_owned()
}

/// Formats the response when leaving a room failed.
pub fn format_leave_failed(error: &anyhow::Error) -> String {
    format!("Leaving room failed, {error}")
}

/// Formats the sub-reply of a lab sensor.
///
/// # Arguments
///
/// * `sensor` - The sensor that was read
/// * `status` - The sensor reading, `Ok(true)` when the lab looks occupied
pub fn format_lab_status(sensor: SensorKind, status: &Result<bool, LabError>) -> String {
    match (sensor, status) {
        (SensorKind::Light, Ok(true)) => "Lab lights are on, someone is probably there.".to_owned(),
        (SensorKind::Light, Ok(false)) => "Lab lights are off.".to_owned(),
        (SensorKind::Wifi, Ok(true)) => "Someone is connected to the lab wifi.".to_owned(),
        (SensorKind::Wifi, Ok(false)) => "Nobody is connected to the lab wifi.".to_owned(),
        (sensor, Err(_)) => format!("Could not read the lab {sensor} sensor."),
    }
}

/// Formats the response for an unknown `lab` argument.
pub fn format_unknown_lab_sensor(arg: &str) -> String {
    format!("Unknown lab sensor '{arg}'. Use `lab light` or `lab wifi`.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_help() {
        assert!(format_help().contains("`help commands`"));
    }

    #[test]
    fn test_format_help_commands_lists_all_verbs() {
        let help = format_help_commands();
        for verb in ["echo", "help", "invite join", "invite leave", "lab"] {
            assert!(help.contains(verb), "missing {verb}");
        }
    }

    #[test]
    fn test_format_unknown_command() {
        assert_eq!(
            format_unknown_command("dance now"),
            "Unknown command 'dance now'. Try the 'help' command for more information."
        );
    }

    #[test]
    fn test_format_join_failed() {
        let error = anyhow::anyhow!("room not found");
        assert_eq!(
            format_join_failed(&error),
            "Joining to room failed, room not found"
        );
    }

    #[test]
    fn test_format_leave_failed() {
        let error = anyhow::anyhow!("not a member");
        assert_eq!(format_leave_failed(&error), "Leaving room failed, not a member");
    }

    #[test]
    fn test_format_lab_status() {
        assert_eq!(
            format_lab_status(SensorKind::Light, &Ok(true)),
            "Lab lights are on, someone is probably there."
        );
        assert_eq!(
            format_lab_status(SensorKind::Light, &Ok(false)),
            "Lab lights are off."
        );
        assert_eq!(
            format_lab_status(SensorKind::Wifi, &Ok(true)),
            "Someone is connected to the lab wifi."
        );
        assert_eq!(
            format_lab_status(SensorKind::Wifi, &Ok(false)),
            "Nobody is connected to the lab wifi."
        );
    }

    #[test]
    fn test_format_lab_status_error() {
        let status = Err(LabError::Malformed("missing field `state`".to_owned()));
        assert_eq!(
            format_lab_status(SensorKind::Wifi, &status),
            "Could not read the lab wifi sensor."
        );
    }

    #[test]
    fn test_format_unknown_lab_sensor() {
        assert_eq!(
            format_unknown_lab_sensor("door"),
            "Unknown lab sensor 'door'. Use `lab light` or `lab wifi`."
        );
    }
}
