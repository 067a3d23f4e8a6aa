//! Invite command handler.
//!
//! Makes the bot join or leave a room:
//!
//! - `invite join <room>` - join the room, given its id or alias
//! - `invite leave <room>` - leave the room
//!
//! # Behavior
//!
//! - Without any argument, the user is told an invite is missing
//! - A missing room or an unknown sub-command is ignored without reply
//! - A join or leave failure is reported with the error

use log::{debug, info, warn};

use crate::commands::{
    ChatActions, CommandResult,
    markdown_response::{
        format_join_failed, format_leave_failed, format_missing_invite, format_successful_join,
        format_successful_leave,
    },
};

/// Joins or leaves the room named in the arguments.
pub async fn handle_invite<C: ChatActions>(chat: &C, args: &[String]) -> CommandResult {
    debug!("handling invite command: {:?}", args);

    let Some(action) = args.first() else {
        return CommandResult::reply(format_missing_invite());
    };
    let Some(room) = args.get(1) else {
        debug!("invite {} without room, ignoring", action);
        return CommandResult::silent();
    };

    let response = match action.as_str() {
        "join" => match chat.join_room(room).await {
            Ok(()) => {
                info!("joined room {}", room);
                format_successful_join()
            }
            Err(e) => {
                warn!("failed to join room {}: {:?}", room, e);
                format_join_failed(&e)
            }
        },
        "leave" => match chat.leave_room(room).await {
            Ok(()) => {
                info!("left room {}", room);
                format_successful_leave()
            }
            Err(e) => {
                warn!("failed to leave room {}: {:?}", room, e);
                format_leave_failed(&e)
            }
        },
        _ => {
            debug!("unknown invite action {}, ignoring", action);
            return CommandResult::silent();
        }
    };

    CommandResult::reply(response)
}
