//! Configuration file structures for the dankbot.
//!
//! The configuration is a YAML file split into three sections: the Matrix
//! account, the bot behaviour and the lab sensors. Every value can be
//! overridden with an environment variable prefixed by `DANKBOT_`, nested keys
//! being separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! matrix:
//!   user_id: "@dankbot:example.org"
//!   password: "secret-password"
//!   passphrase: "recovery-passphrase"
//!
//! bot:
//!   # Messages starting with this prefix are handled as commands
//!   command_prefix: "!c "
//!
//! lab:
//!   light:
//!     url: "https://lab.example.org/api/light"
//!     field: "state"
//!   wifi:
//!     url: "https://lab.example.org/api/wifi"
//!     field: "state"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export DANKBOT_MATRIX__PASSWORD="secret-from-env"
//! export DANKBOT_LAB__LIGHT__URL="http://localhost:8080/light"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use anyhow::bail;
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "DANKBOT_";

/// Root configuration structure for the dankbot.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Matrix account configuration
    pub matrix: Matrix,
    /// Command handling configuration
    #[serde(default)]
    pub bot: BotSettings,
    /// Lab sensors configuration
    pub lab: Lab,
}

/// Matrix account configuration.
#[derive(Debug, Deserialize)]
pub struct Matrix {
    /// Fully qualified Matrix user ID, e.g. `@dankbot:example.org`.
    pub user_id: String,

    /// Matrix account password.
    ///
    /// Used for the initial login only, the session is persisted afterwards.
    pub password: String,

    /// E2EE recovery passphrase.
    pub passphrase: String,
}

/// Command handling configuration.
#[derive(Debug, Deserialize)]
pub struct BotSettings {
    /// Prefix a message must start with to be handled as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        BotSettings {
            command_prefix: default_command_prefix(),
        }
    }
}

fn default_command_prefix() -> String {
    "!c ".to_owned()
}

/// Lab occupancy sensors.
#[derive(Debug, Deserialize)]
pub struct Lab {
    /// Sensor telling whether the lab lights are on
    pub light: Sensor,
    /// Sensor telling whether someone is connected to the lab wifi
    pub wifi: Sensor,
}

/// A sensor endpoint answering a GET request with a JSON object.
#[derive(Debug, Clone, Deserialize)]
pub struct Sensor {
    /// URL of the endpoint
    pub url: String,
    /// Name of the boolean-like field in the JSON response
    #[serde(default = "default_sensor_field")]
    pub field: String,
}

fn default_sensor_field() -> String {
    "state".to_owned()
}

impl Config {
    /// Loads the configuration from a YAML file merged with `DANKBOT_` environment variables.
    ///
    /// Environment variables take precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if a required value is
    /// missing, if a value has the wrong type or if the command prefix is
    /// blank.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        let config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        // A blank prefix would turn every chat line into a command
        if config.bot.command_prefix.trim().is_empty() {
            bail!("bot.command_prefix must not be empty");
        }

        Ok(config)
    }
}
