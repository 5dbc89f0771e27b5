use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("address resolution for {host} failed: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no socket addresses for {host}")]
    NoAddresses { host: String },
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("{stage} not accepted (code {code})")]
    Rejected { stage: &'static str, code: u16 },
}

impl ProbeError {
    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }

    pub(crate) fn rejected(stage: &'static str, code: u16) -> Self {
        Self::Rejected { stage, code }
    }
}
