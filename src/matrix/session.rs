//! Matrix session persistence.
//!
//! The session directory contains:
//! - `session`: JSON file with the user session and the last sync token
//! - `sqlite`: matrix-sdk state store, managed by the SDK

use log::{debug, trace};
use matrix_sdk::authentication::matrix;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::utils::get_path;

/// Content of the session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    /// The Matrix user session containing authentication credentials.
    user_session: matrix::MatrixSession,

    /// The latest sync token for resuming sync operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Matrix session manager.
///
/// Holds the session read at start up and the paths of the session file and
/// of the SQLite store.
#[derive(Clone)]
pub struct MatrixSession {
    /// The session read from disk, if any
    session: Option<Session>,
    /// `dir_path/sqlite`
    sqlite_path: String,
    /// `dir_path/session`
    session_path: String,
}

impl MatrixSession {
    /// Loads the session stored in `dir_path`, creating the directory if needed.
    ///
    /// A missing or unreadable session file means the bot has to log in again,
    /// it is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn load(dir_path: &str) -> Result<MatrixSession, anyhow::Error> {
        debug!("read session at {}", dir_path);
        fs::create_dir_all(dir_path).await?;

        let sqlite_path = get_path(dir_path, "sqlite");
        let session_path = get_path(dir_path, "session");

        let session = match read_session(&session_path).await {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("no usable session at {}: {}", session_path, e);
                None
            }
        };

        Ok(MatrixSession {
            session,
            sqlite_path,
            session_path,
        })
    }

    /// Path of the SQLite store used by the Matrix SDK.
    pub fn sqlite_path(&self) -> &str {
        &self.sqlite_path
    }

    /// The user session read from disk.
    pub fn user_session(&self) -> Option<&matrix::MatrixSession> {
        self.session.as_ref().map(|s| &s.user_session)
    }

    /// The sync token read from disk.
    pub fn sync_token(&self) -> Option<String> {
        self.session.as_ref().and_then(|s| s.sync_token.clone())
    }

    /// Writes `sync_token` in the session file, keeping the user session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be read, parsed, or written.
    pub async fn save_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        trace!("persist sync token {}", sync_token);

        let mut session = read_session(&self.session_path).await?;
        session.sync_token = Some(sync_token);
        write_session(&self.session_path, &session).await
    }

    /// Writes a fresh session file holding `user_session` and no sync token.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be written.
    pub async fn save_user_session(
        &self,
        user_session: &matrix::MatrixSession,
    ) -> anyhow::Result<()> {
        trace!("persist user session");

        let session = Session {
            user_session: user_session.clone(),
            sync_token: None,
        };
        write_session(&self.session_path, &session).await
    }
}

async fn read_session(session_path: &str) -> anyhow::Result<Session> {
    let serialized = fs::read_to_string(session_path).await?;
    Ok(serde_json::from_str(&serialized)?)
}

async fn write_session(session_path: &str, session: &Session) -> anyhow::Result<()> {
    let serialized = serde_json::to_string(session)?;
    fs::write(session_path, serialized).await?;
    Ok(())
}
