//! Matrix protocol integration for the bot.
//!
//! This module provides the Matrix side of the bot:
//! - Login or session restoration with end-to-end encryption
//! - Real-time event synchronization with auto-join on invite
//! - The [`ChatActions`](crate::commands::ChatActions) used by commands:
//!   sending text, joining and leaving rooms
//!
//! # Architecture
//!
//! - **client**: [`MatrixClient`], the entry point used by the bot
//! - **encryption**: cross-signing and recovery setup on login
//! - **session**: session and sync token persistence on disk
//! - **sync**: sync loop and message filtering
//!
//! # Examples
//!
//! ```no_run
//! use dankbot::matrix::{MatrixClient, UserCredentials};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = UserCredentials {
//!     user_id: "@dankbot:example.org".to_string(),
//!     password: "password".to_string(),
//!     passphrase: "recovery_phrase".to_string(),
//! };
//!
//! let client = MatrixClient::new(&credentials, "./data/session").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod encryption;
mod session;
mod sync;

pub use crate::matrix::client::MatrixClient;

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
    /// Passphrase to recover the matrix account secrets
    pub passphrase: String,
}
