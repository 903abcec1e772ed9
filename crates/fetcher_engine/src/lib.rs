//! Fetcher engine: HTTP fetching, file persistence and the sequential run loop.
mod endpoint;
mod fetch;
mod persist;
mod runner;
mod types;

pub use endpoint::{Endpoint, EndpointError, BLOCK_HASH_PATH};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use runner::{run, EventSink, NullSink, RunConfig, RunError, RunReport};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, RunEvent};
