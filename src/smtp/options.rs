use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration knobs for [`probe_mailbox`](super::probe_mailbox).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOptions {
    pub port: u16,
    /// Connect/read/write deadline per exchange, in milliseconds.
    pub timeout_ms: u64,
    /// Hostname announced in `HELO`.
    pub helo_name: String,
    /// Fixed placeholder envelope sender for `MAIL FROM`.
    pub mail_from: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            timeout_ms: 10_000,
            helo_name: "localhost".to_string(),
            mail_from: "test@example.com".to_string(),
        }
    }
}

impl ProbeOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
