//! Telegram Bot API delivery.
//!
//! [`TelegramBot`] posts `sendMessage` calls over the Bot HTTP API with a
//! fixed request timeout. [`TelegramBot::send_text`] is the high-level entry
//! point: it splits long text into [`MAX_MESSAGE_CHARS`]-sized chunks,
//! labels them `Part i/n`, and delivers them strictly in order. The first
//! failure aborts the remaining chunks, with no retry; chunks already
//! accepted by the API stay delivered.

mod chunk;
mod config;
mod error;

pub use chunk::{MAX_MESSAGE_CHARS, split_text};
pub use config::{BotConfig, ConfigError};
pub use error::TelegramError;

use std::io;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

const API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TelegramBot {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramBot {
    pub fn new(config: BotConfig) -> Result<Self, TelegramError> {
        Self::with_api_base(config, API_BASE)
    }

    /// Same client against a different endpoint root (loopback tests).
    pub fn with_api_base(
        config: BotConfig,
        api_base: impl Into<String>,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: api_base.into(),
            token: config.bot_token,
            chat_id: config.chat_id,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Sends one message to the configured chat.
    ///
    /// Success requires both an HTTP success status and `ok: true` in the
    /// response body.
    pub fn send_message(&self, text: &str, parse_mode: Option<&str>) -> Result<(), TelegramError> {
        let mut form = vec![("chat_id", self.chat_id.as_str()), ("text", text)];
        if let Some(mode) = parse_mode {
            form.push(("parse_mode", mode));
        }

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .form(&form)
            .send()?
            .error_for_status()?;

        let body: ApiResponse = response.json()?;
        if body.ok {
            debug!(chat_id = %self.chat_id, "message delivered");
            Ok(())
        } else {
            Err(TelegramError::Api {
                description: body
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }

    /// Sends `text`, split into `Part i/n`-labelled chunks when it exceeds
    /// [`MAX_MESSAGE_CHARS`].
    pub fn send_text(&self, text: &str) -> Result<(), TelegramError> {
        let chunks = split_text(text, MAX_MESSAGE_CHARS);
        let total = chunks.len();
        for (index, chunk) in chunks.iter().enumerate() {
            let message = if total > 1 {
                format!("Part {}/{}\n\n{}", index + 1, total, chunk)
            } else {
                chunk.clone()
            };
            self.send_message(&message, None)?;
            debug!(part = index + 1, total, "chunk sent");
        }
        Ok(())
    }
}

/// Reads a text file as UTF-8, retrying once as Windows-1251 when the bytes
/// are not valid UTF-8.
pub fn read_text_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            debug!(path = %path.display(), "not UTF-8, retrying as Windows-1251");
            let (decoded, _, had_errors) = encoding_rs::WINDOWS_1251.decode(err.as_bytes());
            if had_errors {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "file is neither UTF-8 nor Windows-1251",
                ));
            }
            Ok(decoded.into_owned())
        }
    }
}
