//! Dankbot - A Matrix bot answering chat commands and reporting lab occupancy.
//!
//! # Overview
//!
//! The bot listens to the Matrix rooms it has joined. Messages starting with the
//! command prefix (`!c ` by default) are handled as commands and answered in the
//! same room.
//!
//! # Bot Commands
//!
//! - `!c echo <text>` - Repeat the text
//! - `!c help [rules|commands]` - Display help information
//! - `!c invite join <room>` - Make the bot join a room
//! - `!c invite leave <room>` - Make the bot leave a room
//! - `!c lab [light|wifi]` - Tell whether someone is in the lab
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! matrix:
//!   user_id: "@dankbot:example.org"
//!   password: "your-password"
//!   passphrase: "your-recovery-passphrase"
//!
//! bot:
//!   command_prefix: "!c "
//!
//! lab:
//!   light:
//!     url: "https://lab.example.org/api/light"
//!   wifi:
//!     url: "https://lab.example.org/api/wifi"
//! ```
//!
//! Any value can be overridden with a `DANKBOT_` environment variable:
//!
//! ```bash
//! export DANKBOT_MATRIX__PASSWORD="your-password"
//! ```
//!
//! # Usage
//!
//! ```bash
//! dankbot --config config.yaml --data ./data
//! ```
//!
//! # Architecture
//!
//! - [`bot`] - Wiring of the Matrix client, the lab client and the commands
//! - [`commands`] - Command parsing and execution
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`lab`] - Lab sensors HTTP client
//! - [`matrix`] - Matrix client integration and session management
//! - [`utils`] - Path helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod lab;
mod matrix;
mod utils;

/// Command-line arguments for the dankbot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// The `session/` sub directory holds the Matrix session: authentication
    /// tokens and encryption keys. Keep it private.
    #[arg(short, long)]
    data: String,
}

/// Main entry point for the dankbot.
///
/// Sets up logging, loads the configuration, logs in to Matrix and listens to
/// commands until the Matrix sync stops. Start up failures are logged and end
/// the process.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting dankbot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, &args.data).await {
        Ok(bot) => bot,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {}", e);
    }
}
