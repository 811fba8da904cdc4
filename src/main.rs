//! `sqci` application entry point.
//!
//! Resolves configuration from defaults, environment variables and
//! command-line flags, then runs the build pipeline. Configuration errors are
//! reported through `eyre`; a failing pipeline step sets the process exit
//! code to the step's own exit status where possible.

use std::process::ExitCode;

use clap::Parser;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;
use sqci::config::{Cli, load_config};
use sqci::logging::init_logging;
use sqci::pipeline::{ProcessRunner, run_pipeline};
use tracing::{Level, error};

fn main() -> EyreResult<ExitCode> {
    let cli = Cli::parse();
    init_logging(Level::INFO);

    let config = load_config(&cli, &DefaultEnv::new()).map_err(Report::from)?;

    match run_pipeline(&config, &ProcessRunner) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!(error = %e, "pipeline failed");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
