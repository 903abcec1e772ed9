use std::path::PathBuf;

use fetcher_core::{update, Effect, Msg, RunSettings, RunState, Termination};
use fetcher_logging::{fetcher_debug, fetcher_error, fetcher_info};
use thiserror::Error;

use crate::{AtomicFileWriter, Endpoint, Fetcher, PersistError, RunEvent};

/// Receives [`RunEvent`]s as the run progresses.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: RunEvent) {}
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub endpoint: Endpoint,
    pub output: PathBuf,
    pub settings: RunSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub termination: Termination,
    pub records: usize,
    pub written: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to write results: {0}")]
    Persist(#[from] PersistError),
    #[error("run ended without a termination")]
    Unterminated,
}

/// Fetch heights 0, 1, 2, ... one at a time until the run terminates.
///
/// Each request is issued only after the previous body has been parsed.
/// The result buffer is written at most once, when the flush policy of
/// `config.settings` selects the termination cause.
pub async fn run(
    config: &RunConfig,
    fetcher: &dyn Fetcher,
    sink: &dyn EventSink,
) -> Result<RunReport, RunError> {
    let writer = AtomicFileWriter::new(config.output.clone());
    let mut state = RunState::new(config.settings);
    let mut pending = vec![Msg::Start];
    let mut written = None;

    while let Some(msg) = pending.pop() {
        let (next, effects) = update(state, msg);
        state = next;

        for effect in effects {
            match effect {
                Effect::Fetch { height } => {
                    let url = config.endpoint.block_hash_url(height);
                    fetcher_debug!("GET {}", url);
                    sink.emit(RunEvent::Requesting {
                        height,
                        url: url.clone(),
                    });
                    let msg = match fetcher.fetch(&url).await {
                        Ok(output) => {
                            if !(200..300).contains(&output.metadata.status) {
                                fetcher_debug!(
                                    "height {} answered with status {}",
                                    height,
                                    output.metadata.status
                                );
                            }
                            Msg::BodyReceived {
                                height,
                                body: output.bytes,
                            }
                        }
                        Err(err) => {
                            fetcher_error!("Error: {}", err.message);
                            Msg::TransportFailed {
                                height,
                                kind: err.kind.transport_kind(),
                                message: err.message,
                            }
                        }
                    };
                    pending.push(msg);
                }
                Effect::RecordParsed { height, record } => {
                    sink.emit(RunEvent::RecordParsed { height, record });
                }
                Effect::Flush { content, records } => {
                    let path = writer.write(&content)?;
                    fetcher_info!("Wrote {} records to {:?}", records, path);
                    sink.emit(RunEvent::Flushed {
                        path: path.clone(),
                        records,
                    });
                    written = Some(path);
                }
                Effect::Halt(termination) => {
                    fetcher_info!("Run finished: {}", termination);
                    sink.emit(RunEvent::Terminated(termination));
                }
            }
        }
    }

    let termination = state.termination().cloned().ok_or(RunError::Unterminated)?;
    Ok(RunReport {
        termination,
        records: state.buffer().len(),
        written,
    })
}
