use std::fmt;

use serde_json::Value;

use crate::LineFormat;

pub type Height = u64;

/// Which termination causes write the buffer to the target destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Only a body that fails to parse triggers the write.
    #[default]
    OnParseFailure,
    /// Every termination cause writes whatever has been collected.
    OnAnyTermination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSettings {
    pub stop_height: Option<Height>,
    pub flush_policy: FlushPolicy,
    pub line_format: LineFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    InvalidUrl,
    Timeout,
    RedirectLimitExceeded,
    TooLarge,
    Network,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::InvalidUrl => write!(f, "invalid url"),
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            TransportKind::TooLarge => write!(f, "response too large"),
            TransportKind::Network => write!(f, "network error"),
        }
    }
}

/// Why the run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    StopHeightReached {
        height: Height,
    },
    ParseFailure {
        height: Height,
        reason: String,
    },
    Transport {
        height: Height,
        kind: TransportKind,
        message: String,
    },
}

impl Termination {
    pub fn should_flush(&self, policy: FlushPolicy) -> bool {
        match policy {
            FlushPolicy::OnAnyTermination => true,
            FlushPolicy::OnParseFailure => matches!(self, Termination::ParseFailure { .. }),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::StopHeightReached { height } => {
                write!(f, "stop height {height} reached")
            }
            Termination::ParseFailure { height, reason } => {
                write!(f, "body at height {height} is not json: {reason}")
            }
            Termination::Transport {
                height,
                kind,
                message,
            } => write!(f, "{kind} at height {height}: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Fetching,
    Terminated(Termination),
}

/// Parsed records in height order; index `i` holds the record for height `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBuffer {
    records: Vec<Value>,
}

impl ResultBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Value) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    settings: RunSettings,
    cursor: Height,
    buffer: ResultBuffer,
    phase: Phase,
}

impl RunState {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            settings,
            cursor: 0,
            buffer: ResultBuffer::new(),
            phase: Phase::Fetching,
        }
    }

    pub fn settings(&self) -> RunSettings {
        self.settings
    }

    pub fn cursor(&self) -> Height {
        self.cursor
    }

    pub fn buffer(&self) -> &ResultBuffer {
        &self.buffer
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }

    pub fn termination(&self) -> Option<&Termination> {
        match &self.phase {
            Phase::Terminated(termination) => Some(termination),
            Phase::Fetching => None,
        }
    }

    pub(crate) fn stop_height_reached(&self) -> bool {
        self.settings.stop_height == Some(self.cursor)
    }

    pub(crate) fn accept(&mut self, record: Value) {
        self.buffer.push(record);
        self.cursor += 1;
    }

    pub(crate) fn terminate(&mut self, termination: Termination) {
        self.phase = Phase::Terminated(termination);
    }
}
