use thiserror::Error;

/// Errors that can occur while delivering to the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
    /// The server answered with `ok: false`.
    #[error("Telegram API error: {description}")]
    Api { description: String },
}
