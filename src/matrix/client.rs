//! Matrix client wrapper for bot messaging and room membership.
//!
//! This module provides a high-level [`MatrixClient`] interface that wraps the
//! Matrix SDK client. It implements [`ChatActions`] so commands can send
//! replies and join or leave rooms.

use anyhow::anyhow;
use log::{debug, error, info};
use matrix_sdk::{
    Client,
    ruma::{RoomAliasId, RoomId, RoomOrAliasId, events::room::message::RoomMessageEventContent},
};

use crate::{
    commands::ChatActions,
    matrix::{UserCredentials, encryption::setup_client, session::MatrixSession, sync::MatrixSync},
};

/// Display name of the bot account.
const DISPLAY_NAME: &str = "Dankbot";

/// High-level Matrix client for bot messaging operations.
pub struct MatrixClient {
    /// Synchronization service for handling real-time events
    matrix_sync: MatrixSync,
    /// Underlying Matrix SDK client
    client: Client,
}

impl MatrixClient {
    /// Creates and initializes a new Matrix client.
    ///
    /// Restores the session found in `session_path`, or logs in and sets up
    /// encryption when there is none, then sets the bot display name.
    ///
    /// # Arguments
    ///
    /// * `user_credentials` - User credentials containing user ID, password, and passphrase
    /// * `session_path` - Directory path for storing session data and SQLite database
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read, if the login or the
    /// encryption setup fails, or if the display name cannot be set.
    pub async fn new(
        user_credentials: &UserCredentials,
        session_path: &str,
    ) -> Result<Self, anyhow::Error> {
        let matrix_session = MatrixSession::load(session_path).await?;

        let client = setup_client(user_credentials, &matrix_session)
            .await
            .inspect_err(|e| error!("failed to setup matrix client: {:?}", e))?;

        client.account().set_display_name(Some(DISPLAY_NAME)).await?;

        let matrix_sync = MatrixSync::new(&client, &matrix_session);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Starts the Matrix synchronization loop.
    ///
    /// `on_message` is invoked with `(body, room_id)` for each text message
    /// sent by someone else in a joined room. Runs until the sync fails.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the sync loop.
    pub async fn sync<F>(&self, on_message: F) -> Result<(), anyhow::Error>
    where
        F: Fn(String, String) + Send + Sync + 'static + Clone,
    {
        self.matrix_sync
            .sync(on_message)
            .await
            .inspect_err(|e| error!("matrix sync ended with error: {:?}", e))?;

        info!("matrix sync ended successfully");
        Ok(())
    }
}

impl ChatActions for MatrixClient {
    /// Sends a Markdown message into a room the bot is part of.
    async fn send_text(&self, room_id: &str, body: &str) {
        let room_id = match RoomId::parse(room_id) {
            Ok(room_id) => room_id,
            Err(e) => {
                error!("invalid room id {}: {:?}", room_id, e);
                return;
            }
        };

        let Some(room) = self.client.get_room(&room_id) else {
            error!("failed to send message: unknown room {}", room_id);
            return;
        };

        let content = RoomMessageEventContent::text_markdown(body);
        if let Err(e) = room.send(content).await {
            error!("failed to send message: {:?}", e);
        }
    }

    /// Joins a room given its id (`!id:server`) or alias (`#alias:server`).
    async fn join_room(&self, room: &str) -> Result<(), anyhow::Error> {
        let room_or_alias = RoomOrAliasId::parse(room)?;
        debug!("joining room {}", room_or_alias);

        self.client
            .join_room_by_id_or_alias(&room_or_alias, &[])
            .await?;

        Ok(())
    }

    /// Leaves a room given its id or alias. Aliases are resolved first.
    async fn leave_room(&self, room: &str) -> Result<(), anyhow::Error> {
        let room_id = if room.starts_with('#') {
            let alias = RoomAliasId::parse(room)?;
            self.client.resolve_room_alias(&alias).await?.room_id
        } else {
            RoomId::parse(room)?
        };
        debug!("leaving room {}", room_id);

        let joined_room = self
            .client
            .get_room(&room_id)
            .ok_or_else(|| anyhow!("I am not in room {room}"))?;
        joined_room.leave().await?;

        Ok(())
    }
}
