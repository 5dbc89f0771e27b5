use std::fmt;

use serde::{Deserialize, Serialize};

use crate::smtp::ProbeOptions;

/// Final classification of one checked address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The address does not match the supported grammar.
    InvalidFormat,
    /// DNS answered NXDOMAIN for the domain.
    NoDomain,
    /// The domain exists but no usable MX answer was obtained.
    NoMx,
    /// MX records exist; the mailbox probe was inconclusive.
    DomainValid,
    /// Some mail server accepted `RCPT TO` for the address.
    UserExists,
    /// The check itself failed unexpectedly.
    CheckError,
}

impl CheckStatus {
    /// Statuses counted by the CLI summary as "passed basic checks".
    pub fn passes_basic_checks(self) -> bool {
        matches!(self, Self::DomainValid | Self::UserExists)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat => f.write_str("invalid format"),
            Self::NoDomain => f.write_str("no domain"),
            Self::NoMx => f.write_str("no MX records"),
            Self::DomainValid => f.write_str("domain valid"),
            Self::UserExists => f.write_str("user exists"),
            Self::CheckError => f.write_str("check error"),
        }
    }
}

/// One immutable result per input address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub email: String,
    pub status: CheckStatus,
    pub details: String,
}

impl ValidationResult {
    pub(crate) fn new(
        email: impl Into<String>,
        status: CheckStatus,
        details: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            status,
            details: details.into(),
        }
    }

    pub(crate) fn check_error(email: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(email, CheckStatus::CheckError, details)
    }
}

/// Knobs for [`validate`](super::validate) and
/// [`validate_batch`](super::validate_batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    /// Worker pool size for batch validation.
    pub concurrency: usize,
    pub probe: ProbeOptions,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            concurrency: 5,
            probe: ProbeOptions::default(),
        }
    }
}
