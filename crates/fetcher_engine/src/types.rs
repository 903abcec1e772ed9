use std::fmt;
use std::path::PathBuf;

use fetcher_core::{Height, Termination, TransportKind};
use serde_json::Value;

/// Progress reported by the run loop to an [`EventSink`](crate::EventSink).
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Requesting { height: Height, url: String },
    RecordParsed { height: Height, record: Value },
    Flushed { path: PathBuf, records: usize },
    Terminated(Termination),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl FailureKind {
    pub fn transport_kind(&self) -> TransportKind {
        match self {
            FailureKind::InvalidUrl => TransportKind::InvalidUrl,
            FailureKind::Timeout => TransportKind::Timeout,
            FailureKind::RedirectLimitExceeded => TransportKind::RedirectLimitExceeded,
            FailureKind::TooLarge { .. } => TransportKind::TooLarge,
            FailureKind::Network => TransportKind::Network,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
