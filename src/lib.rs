#![forbid(unsafe_code)]
//! mailprobe: email deliverability checks + Telegram text delivery

pub mod check;
pub mod mx;
pub mod smtp;
pub mod telegram;
pub mod validator;

pub use check::{CheckOptions, CheckStatus, ValidationResult, validate, validate_batch};
pub use mx::{Error as MxError, MxRecord, MxStatus, check_mx};
pub use smtp::{MailboxSignal, ProbeOptions, probe_mailbox};
pub use telegram::{
    BotConfig, ConfigError, MAX_MESSAGE_CHARS, TelegramBot, TelegramError, read_text_file,
    split_text,
};
pub use validator::{EmailParts, is_valid_format, parse_email};
