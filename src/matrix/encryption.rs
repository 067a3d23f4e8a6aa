//! Matrix client login and encryption setup.
//!
//! [`setup_client`] either restores the persisted session or logs in and sets
//! up end-to-end encryption:
//! - **Cross-signing** so the bot device is trusted without manual verification
//! - **Recovery** (key backup and secret storage) protected by the passphrase

use anyhow::{anyhow, bail};
use log::{debug, info};
use matrix_sdk::{
    Client,
    encryption::{
        BackupDownloadStrategy, EncryptionSettings,
        recovery::{RecoveryError, RecoveryState},
    },
    ruma::{OwnedUserId, api::client::uiaa},
};

use crate::matrix::{UserCredentials, session::MatrixSession};

/// Display name of the device created on login.
const DEVICE_DISPLAY_NAME: &str = "dankbot";

/// Bootstraps cross-signing, authenticating with the password when the server asks for it.
///
/// See <https://docs.rs/matrix-sdk/latest/matrix_sdk/encryption/struct.Encryption.html#method.bootstrap_cross_signing_if_needed>
async fn bootstrap_cross_signing(
    client: &Client,
    user_credentials: &UserCredentials,
) -> Result<(), anyhow::Error> {
    debug!("setting up cross signing");

    let Err(e) = client
        .encryption()
        .bootstrap_cross_signing_if_needed(None)
        .await
    else {
        debug!("cross signing already set up");
        return Ok(());
    };

    let Some(response) = e.as_uiaa_response() else {
        bail!("cross signing bootstrap failed: {:?}", e);
    };

    let mut password = uiaa::Password::new(
        uiaa::UserIdentifier::UserIdOrLocalpart(user_credentials.user_id.clone()),
        user_credentials.password.clone(),
    );
    password.session = response.session.clone();

    client
        .encryption()
        .bootstrap_cross_signing(Some(uiaa::AuthData::Password(password)))
        .await?;

    debug!("cross signing set up");
    Ok(())
}

/// Enables key backup and secret storage, an existing backup is kept.
async fn enable_recovery(
    client: &Client,
    user_credentials: &UserCredentials,
) -> Result<(), anyhow::Error> {
    debug!("enabling recovery");

    match client
        .encryption()
        .recovery()
        .enable()
        .with_passphrase(&user_credentials.passphrase)
        .await
    {
        Ok(_) => debug!("recovery enabled"),
        Err(RecoveryError::BackupExistsOnServer) => debug!("recovery already enabled"),
        Err(e) => bail!("error enabling recovery: {:?}", e),
    }

    Ok(())
}

/// Checks that recovery is enabled and that the bot device is verified.
async fn encryption_check(client: &Client) -> Result<(), anyhow::Error> {
    if client.encryption().recovery().state() != RecoveryState::Enabled {
        bail!("recovery is disabled after enabling it");
    }

    let device = client
        .encryption()
        .get_own_device()
        .await?
        .ok_or_else(|| anyhow!("own device not found"))?;
    if !device.is_verified() {
        bail!("device is not verified after setting up encryption");
    }

    Ok(())
}

/// Logs in, sets up encryption and persists the new session.
async fn create_session(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<Client, anyhow::Error> {
    let encryption_settings = EncryptionSettings {
        auto_enable_cross_signing: true,
        backup_download_strategy: BackupDownloadStrategy::default(),
        auto_enable_backups: true,
    };

    let user_id: OwnedUserId = user_credentials.user_id.clone().try_into()?;
    let client = Client::builder()
        .sqlite_store(
            matrix_session.sqlite_path(),
            Some(&user_credentials.passphrase),
        )
        .with_encryption_settings(encryption_settings)
        .server_name(user_id.server_name())
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&user_id, &user_credentials.password)
        .initial_device_display_name(DEVICE_DISPLAY_NAME)
        .send()
        .await?;
    info!("logged in as {}", user_id);

    bootstrap_cross_signing(&client, user_credentials).await?;
    enable_recovery(&client, user_credentials).await?;

    debug!("trying to recover secrets");
    client
        .encryption()
        .recovery()
        .recover(&user_credentials.passphrase)
        .await?;

    encryption_check(&client).await?;

    let user_session = client
        .matrix_auth()
        .session()
        .ok_or_else(|| anyhow!("no user session after login"))?;
    matrix_session.save_user_session(&user_session).await?;

    info!("matrix client setup complete");
    Ok(client)
}

/// Restores the persisted session and imports the secrets from secret storage.
async fn restore_session(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
    user_session: &matrix_sdk::authentication::matrix::MatrixSession,
) -> Result<Client, anyhow::Error> {
    info!("restoring matrix session from disk");

    let user_id: OwnedUserId = user_credentials.user_id.clone().try_into()?;
    let client = Client::builder()
        .server_name(user_id.server_name())
        .sqlite_store(
            matrix_session.sqlite_path(),
            Some(&user_credentials.passphrase),
        )
        .build()
        .await?;

    client.restore_session(user_session.clone()).await?;

    let secret_store = client
        .encryption()
        .secret_storage()
        .open_secret_store(&user_credentials.passphrase)
        .await?;
    secret_store.import_secrets().await?;

    encryption_check(&client).await?;

    info!("matrix session restored successfully");
    Ok(client)
}

/// Returns a logged in client with encryption set up.
///
/// The session persisted in `matrix_session` is restored when there is one,
/// otherwise the bot logs in with the password.
///
/// # Errors
///
/// Returns an error if the login, the restoration or any encryption step fails.
pub async fn setup_client(
    user_credentials: &UserCredentials,
    matrix_session: &MatrixSession,
) -> Result<Client, anyhow::Error> {
    info!(
        "setting up matrix client for user {}",
        user_credentials.user_id
    );

    match matrix_session.user_session() {
        Some(user_session) => {
            restore_session(user_credentials, matrix_session, user_session).await
        }
        None => create_session(user_credentials, matrix_session).await,
    }
}
