//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler processes
//! its arguments, performs at most one kind of external call and returns a
//! [`CommandResult`](crate::commands::CommandResult) holding the replies.
//!
//! # Available Handlers
//!
//! - [`handle_echo`] - Repeat the arguments
//! - [`handle_help`] - Display help information
//! - [`handle_invite`] - Join or leave a room
//! - [`handle_lab`] - Read the lab sensors
//!
//! Handlers don't send messages directly, the
//! [`Commander`](crate::commands::Commander) sends the returned replies.

mod echo;
mod help;
mod invite;
mod lab;

pub use crate::commands::actions::{
    echo::handle_echo, help::handle_help, invite::handle_invite, lab::handle_lab,
};
