use serde::{Deserialize, Serialize};

/// A raw SMTP reply, preserving the numeric status code and message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

/// Advisory outcome of probing a mailbox across its MX exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailboxSignal {
    /// Some exchange answered `RCPT TO` with `250`.
    Accepted { exchange: String, reply: SmtpReply },
    /// No exchange accepted; says nothing about whether the mailbox exists.
    Inconclusive,
}

impl MailboxSignal {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_code_classes() {
        let ok = SmtpReply {
            code: 250,
            message: "Ok".to_string(),
        };
        assert!(ok.is_positive_completion());
        assert!(!ok.is_transient_failure());

        let greylisted = SmtpReply {
            code: 451,
            message: "try later".to_string(),
        };
        assert!(greylisted.is_transient_failure());

        let unknown = SmtpReply {
            code: 550,
            message: "user unknown".to_string(),
        };
        assert!(unknown.is_permanent_failure());
    }
}
