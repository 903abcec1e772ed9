use fetcher_engine::{EventSink, RunEvent};
use fetcher_logging::{fetcher_debug, fetcher_info};

/// Logs every parsed record as it arrives.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: RunEvent) {
        match event {
            RunEvent::Requesting { height, url } => {
                fetcher_debug!("Requesting height={} url={}", height, url);
            }
            RunEvent::RecordParsed { height, record } => {
                fetcher_info!("height={} {}", height, record);
            }
            RunEvent::Flushed { .. } | RunEvent::Terminated(_) => {}
        }
    }
}
