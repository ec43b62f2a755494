//! Environment configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set")]
    MissingBotToken,
}

/// Settings sourced from the environment (a `.env` file is honored).
/// Loop tunables come from CLI flags instead, see `Args` in `main.rs`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Telegram bot token used for notification delivery.
    pub bot_token: String,
    /// SQLite database holding the wallet registry.
    pub database_url: String,
    /// Path of the dedup state document.
    pub state_path: String,
}

impl ServerConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://bot.db";
    pub const DEFAULT_STATE_PATH: &'static str = "last_tx_state.json";

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingBotToken)?;
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_DATABASE_URL.to_string());
        let state_path =
            std::env::var("STATE_FILE").unwrap_or_else(|_| Self::DEFAULT_STATE_PATH.to_string());

        Ok(Self {
            bot_token,
            database_url,
            state_path,
        })
    }
}
