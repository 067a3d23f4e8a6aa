//! Echo command handler.

use log::debug;

use crate::commands::CommandResult;

/// Repeats the arguments joined by a single space.
///
/// Nothing is sent back when there is nothing to repeat.
pub fn handle_echo(args: &[String]) -> CommandResult {
    debug!("handling echo command");

    if args.is_empty() {
        return CommandResult::silent();
    }

    CommandResult::reply(args.join(" "))
}
