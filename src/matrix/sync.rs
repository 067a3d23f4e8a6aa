//! Matrix client synchronization and event handling.
//!
//! [`MatrixSync::sync`]:
//! 1. Registers the auto-join handler for room invitations
//! 2. Performs an initial sync to catch up on offline events, retrying until it succeeds
//! 3. Registers the message handler, so only messages sent after start up are handled
//! 4. Enters the sync loop, persisting the sync token after each sync

use anyhow::Result;
use std::sync::Arc;

use log::{error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        api::client::filter::FilterDefinition,
        events::room::{
            member::StrippedRoomMemberEvent,
            message::{MessageType, OriginalSyncRoomMessageEvent},
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::session::MatrixSession;

/// Seconds to wait before retrying a failed initial sync.
const INITIAL_SYNC_RETRY_SECS: u64 = 5;

/// Upper bound in seconds of the auto-join retry delay.
const MAX_JOIN_RETRY_SECS: u64 = 3600;

/// Manages Matrix client synchronization and event processing.
pub struct MatrixSync {
    /// The matrix client
    client: Client,
    /// The matrix session, used to persist the sync token
    session: MatrixSession,
}

impl MatrixSync {
    /// Creates a new MatrixSync instance. Call [`MatrixSync::sync`] to start syncing.
    pub fn new(client: &Client, session: &MatrixSession) -> Self {
        MatrixSync {
            client: client.to_owned(),
            session: session.to_owned(),
        }
    }

    /// Starts the synchronization process and enters an infinite loop.
    ///
    /// # Arguments
    ///
    /// * `on_message` - Callback invoked with `(body, room_id)` for each text
    ///   message sent by another user in a joined room
    ///
    /// # Errors
    ///
    /// Returns an error if the sync loop encounters a fatal error. Sync token
    /// persistence errors are logged only.
    pub async fn sync<F>(&self, on_message: F) -> Result<()>
    where
        F: Fn(String, String) + Send + Sync + 'static + Clone,
    {
        info!("start syncing");

        self.client.add_event_handler(auto_join_rooms);

        // Enable room members lazy-loading
        // See <https://spec.matrix.org/v1.6/client-server-api/#lazy-loading-room-members>.
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());

        if let Some(sync_token) = self.session.sync_token() {
            sync_settings = sync_settings.token(sync_token);
        }

        // Catch up with what happened while the bot was offline, invites included
        loop {
            match self.client.sync_once(sync_settings.clone()).await {
                Ok(response) => {
                    sync_settings = sync_settings.token(response.next_batch.clone());
                    if let Err(err) = self.session.save_sync_token(response.next_batch).await {
                        error!("failed to persist sync token: {:?}", err);
                    }
                    break;
                }
                Err(error) => {
                    error!("an error occurred during initial sync: {error}");
                    warn!("retrying in {INITIAL_SYNC_RETRY_SECS}s");
                    sleep(Duration::from_secs(INITIAL_SYNC_RETRY_SECS)).await;
                }
            }
        }

        let on_message = Arc::new(on_message);

        // Registered after the initial sync: old messages are not replayed as commands
        self.client.add_event_handler(
            move |event: OriginalSyncRoomMessageEvent, room: Room, client: Client| {
                let on_message = Arc::clone(&on_message);
                async move { on_room_message(event, room, client, &on_message).await }
            },
        );

        self.client
            .sync_with_result_callback(sync_settings, |sync_result| async move {
                let response = sync_result?;

                if let Err(err) = self.session.save_sync_token(response.next_batch).await {
                    error!("failed to persist sync token: {:?}", err);
                }

                Ok(LoopCtrl::Continue)
            })
            .await?;

        Ok(())
    }
}

/// Automatically joins rooms when the bot receives an invitation.
///
/// Joining is retried with an exponential delay because Synapse may send the
/// invite before the invited user is allowed to join, see
/// <https://github.com/matrix-org/synapse/issues/4345>.
async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        while let Err(err) = room.join().await {
            error!(
                "failed to join room {} ({err:?}), retrying in {delay}s",
                room.room_id()
            );

            sleep(Duration::from_secs(delay)).await;
            delay *= 2;

            if delay > MAX_JOIN_RETRY_SECS {
                error!("can't join room {} ({err:?})", room.room_id());
                return;
            }
        }
        info!("successfully joined room {}", room.room_id());
    });
}

/// Forwards text messages from other users in joined rooms to the callback.
async fn on_room_message<F>(
    event: OriginalSyncRoomMessageEvent,
    room: Room,
    client: Client,
    on_message: &Arc<F>,
) where
    F: Fn(String, String) + Send + Sync + 'static,
{
    if room.state() != RoomState::Joined {
        return;
    }

    // Never answer our own messages
    if client.user_id() == Some(&*event.sender) {
        return;
    }

    let MessageType::Text(text_content) = event.content.msgtype else {
        return;
    };

    on_message(text_content.body, room.room_id().to_string());
}
