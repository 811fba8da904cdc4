//! Build pipeline orchestration.
//!
//! The pipeline runs a fixed sequence of external commands in the build
//! directory: configure, build, install, test (when tests or coverage are
//! enabled) and coverage upload (when a Coveralls token is configured).
//! Every invocation is logged with secrets redacted before it starts.
//!
//! A failing step aborts the pipeline, with one exception: a test failure is
//! held back until the coverage upload has run, so coverage from a red build
//! is still published. The test failure is reported afterwards.

mod invocation;
mod runner;
pub mod steps;


pub use invocation::{Invocation, Step};
pub use runner::{CommandRunner, ExitOutcome, ProcessRunner};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::{error, info};

use crate::config::BuildConfig;
use crate::error::PipelineError;

/// Runs every configured pipeline step in order.
///
/// # Errors
///
/// Returns `PipelineError` if:
/// - the build directory cannot be created
/// - a step's program cannot be started
/// - a step exits unsuccessfully (test failures are reported only after
///   the coverage upload step has run)
pub fn run_pipeline<R: CommandRunner>(
    config: &BuildConfig,
    runner: &R,
) -> Result<(), PipelineError> {
    prepare_build_dir(&config.build_dir)?;

    log_and_run(runner, &steps::configure(config))?;
    log_and_run(runner, &steps::build(config))?;
    log_and_run(runner, &steps::install(config))?;

    let test_result = if config.runs_tests() {
        log_and_run(runner, &steps::test(config))
    } else {
        Ok(())
    };

    let Some(upload) = steps::coverage_upload(config) else {
        if config.coverage {
            info!("no Coveralls repo token configured; skipping coverage upload");
        }
        return test_result;
    };

    if let Err(ref test_error) = test_result {
        error!(error = %test_error, "tests failed; uploading coverage before reporting");
    }

    let upload_result = log_and_run(runner, &upload);
    match (test_result, upload_result) {
        (Err(test_error), Err(upload_error)) => {
            error!(error = %upload_error, "coverage upload failed");
            Err(test_error)
        }
        (test_result, upload_result) => test_result.and(upload_result),
    }
}

/// Creates the build directory and any missing parents.
fn prepare_build_dir(build_dir: &Utf8Path) -> Result<(), PipelineError> {
    Dir::create_ambient_dir_all(build_dir, ambient_authority()).map_err(|e| {
        PipelineError::CreateBuildDir {
            path: build_dir.to_owned(),
            message: e.to_string(),
        }
    })
}

/// Logs `invocation`, runs it, and turns a non-zero exit into an error.
fn log_and_run<R: CommandRunner>(runner: &R, invocation: &Invocation) -> Result<(), PipelineError> {
    let step = invocation.step();
    info!(
        step = step.name(),
        "Running command {} with options {}",
        invocation.command_json(),
        invocation.options_json()
    );

    let outcome = runner
        .run(invocation)
        .map_err(|e| PipelineError::SpawnFailed {
            step: step.name(),
            program: invocation.program().to_owned(),
            message: e.to_string(),
        })?;

    if outcome.success() {
        Ok(())
    } else {
        Err(PipelineError::StepFailed {
            step: step.name(),
            program: invocation.program().to_owned(),
            code: outcome.code(),
        })
    }
}
