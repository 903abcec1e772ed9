use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use fetcher_core::{FlushPolicy, LineFormat, RunSettings};
use fetcher_engine::{Endpoint, EndpointError, FetchSettings, RunConfig};
use fetcher_logging::fetcher_warn;

#[derive(Parser, Debug)]
#[command(name = "block-hash-fetcher")]
#[command(
    about = "Fetch block hashes by height from a node's /block-hash route into a file",
    long_about = None
)]
pub struct Args {
    /// Node host name or address.
    pub host: String,

    /// Node HTTP port.
    pub port: String,

    /// Height at which fetching stops voluntarily. Never stops when omitted.
    pub stop_height: Option<u64>,

    /// File the collected records are written to. Defaults to a file named
    /// after the port argument.
    pub output: Option<PathBuf>,

    /// Also write the collected records when the run ends at the stop height
    /// or on a transport error.
    #[arg(long)]
    pub flush_on_any_exit: bool,

    /// How each record is written.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Give up connecting after this many seconds.
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,

    /// Give up on a request after this many seconds.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One compact JSON value per line.
    Json,
    /// JSON strings without quotes, other values as JSON.
    Plain,
}

impl From<Format> for LineFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => LineFormat::Json,
            Format::Plain => LineFormat::Plain,
        }
    }
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                fetcher_warn!(
                    "No output path given, writing to a file named after the port: {:?}",
                    self.port
                );
                PathBuf::from(&self.port)
            }
        }
    }

    pub fn run_config(&self) -> Result<RunConfig, EndpointError> {
        let endpoint = Endpoint::new(&self.host, &self.port)?;
        let flush_policy = if self.flush_on_any_exit {
            FlushPolicy::OnAnyTermination
        } else {
            FlushPolicy::OnParseFailure
        };
        Ok(RunConfig {
            endpoint,
            output: self.output_path(),
            settings: RunSettings {
                stop_height: self.stop_height,
                flush_policy,
                line_format: self.format.into(),
            },
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..FetchSettings::default()
        }
    }
}
