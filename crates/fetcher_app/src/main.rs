mod cli;
mod logging;
mod sink;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fetcher_core::Termination;
use fetcher_engine::{run, ReqwestFetcher, RunConfig};
use fetcher_logging::fetcher_error;

use crate::cli::Args;
use crate::sink::ConsoleSink;

/// Exit status for bad arguments, the same one clap uses.
const USAGE_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::initialize(args.verbose, args.log_file.as_deref());

    let config = match run_config(&args) {
        Ok(config) => config,
        Err(status) => return ExitCode::from(status),
    };

    match fetch(&args, &config).await {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            fetcher_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_config(args: &Args) -> Result<RunConfig, u8> {
    args.run_config().map_err(|err| {
        fetcher_error!("invalid endpoint: {}", err);
        USAGE_ERROR
    })
}

async fn fetch(args: &Args, config: &RunConfig) -> anyhow::Result<u8> {
    let fetcher =
        ReqwestFetcher::new(args.fetch_settings()).context("cannot build http client")?;

    let report = run(config, &fetcher, &ConsoleSink).await?;
    Ok(termination_status(&report.termination))
}

fn termination_status(termination: &Termination) -> u8 {
    match termination {
        Termination::Transport { .. } => 1,
        Termination::StopHeightReached { .. } | Termination::ParseFailure { .. } => 0,
    }
}
