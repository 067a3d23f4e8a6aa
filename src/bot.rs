//! Bot module wiring the Matrix client to the command handler.
//!
//! The [`Bot`] listens to Matrix messages and hands them to the [`Commander`]
//! one at a time, in arrival order. The sync loop only queues messages, so a
//! slow sensor or room join never blocks it, and the replies of a command are
//! all sent before the next command runs.
//!
//! # Command Processing Flow
//!
//! ```text
//! Matrix Message → queue → Parse Command → Execute → Send Replies
//! ```
//!
//! # Example
//!
//! ```no_run
//! # use dankbot::bot::Bot;
//! # use dankbot::config::Config;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//!
//! let bot = Bot::new(config, "./data").await?;
//! bot.start().await?; // Runs indefinitely
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use log::{debug, error, info};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::{
    commands::{ChatActions, Commander},
    config::Config,
    lab::{LabRequester, Requester},
    matrix::{MatrixClient, UserCredentials},
    utils::get_path,
};

/// A text message received in a joined room.
#[derive(Debug)]
struct IncomingMessage {
    /// The message body text
    body: String,
    /// The Matrix room ID where the message was sent
    room_id: String,
}

/// Main bot structure connecting Matrix messaging to the commands.
pub struct Bot {
    /// Matrix client for receiving messages and sending replies
    matrix_client: MatrixClient,
    /// Lab sensors client
    lab: LabRequester,
    /// Command parser and executor
    commander: Commander,
}

impl Bot {
    /// Creates a new Bot from the configuration.
    ///
    /// Logs in to Matrix, or restores the session stored under
    /// `data_path/session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Matrix client cannot be set up (invalid
    /// credentials, network unreachable, unreadable session directory).
    pub async fn new(config: Config, data_path: &str) -> Result<Self, anyhow::Error> {
        let matrix_client = MatrixClient::new(
            &UserCredentials {
                user_id: config.matrix.user_id,
                password: config.matrix.password,
                passphrase: config.matrix.passphrase,
            },
            &get_path(data_path, "session"),
        )
        .await?;

        let lab = LabRequester::new(&config.lab);
        let commander = Commander::new(&config.bot.command_prefix);

        Ok(Bot {
            matrix_client,
            lab,
            commander,
        })
    }

    /// Starts listening to Matrix messages. Runs until the Matrix sync stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the Matrix sync stopped on a failure.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        info!("listening to commands");

        let (sender, receiver) = unbounded_channel();

        let on_message = move |body: String, room_id: String| {
            if let Err(e) = sender.send(IncomingMessage { body, room_id }) {
                error!("failed to queue message: {:?}", e);
            }
        };

        listen(
            self.matrix_client.sync(on_message),
            receiver,
            &self.commander,
            &self.matrix_client,
            &self.lab,
        )
        .await
    }
}

/// Processes queued messages until `sync` ends, and returns its result.
async fn listen<S, C, R>(
    sync: S,
    messages: UnboundedReceiver<IncomingMessage>,
    commander: &Commander,
    chat: &C,
    lab: &R,
) -> Result<(), anyhow::Error>
where
    S: Future<Output = Result<(), anyhow::Error>>,
    C: ChatActions,
    R: Requester,
{
    tokio::select! {
        result = sync => result,
        _ = process_messages(messages, commander, chat, lab) => {
            info!("message queue closed");
            Ok(())
        }
    }
}

/// Parses and executes queued messages one after the other.
///
/// Messages that are not commands are dropped silently.
async fn process_messages<C, R>(
    mut messages: UnboundedReceiver<IncomingMessage>,
    commander: &Commander,
    chat: &C,
    lab: &R,
) where
    C: ChatActions,
    R: Requester,
{
    while let Some(message) = messages.recv().await {
        let command = match commander.parse(&message.body) {
            Ok(command) => command,
            Err(e) => {
                debug!("ignoring message in {}: {:?}", message.room_id, e);
                continue;
            }
        };

        info!("executing {:?} in {}", command, message.room_id);

        commander
            .execute(&command, &message.room_id, chat, lab)
            .await;
    }
}
