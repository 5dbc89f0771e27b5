use thiserror::Error;

/// Bot credentials and delivery target.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl BotConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Creates the configuration from environment variables.
    ///
    /// Expects `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` to be set and
    /// non-empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: require_env("TELEGRAM_BOT_TOKEN")?,
            chat_id: require_env("TELEGRAM_CHAT_ID")?,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(name)),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
}
