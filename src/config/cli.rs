//! Command-line argument definitions for sqci.

use camino::Utf8PathBuf;
use clap::Parser;

/// Command-line interface for sqci.
///
/// Every option is optional: an unset option contributes nothing to the
/// command-line layer, leaving the environment or default value in place.
/// Boolean options can only switch a setting on.
#[derive(Debug, Default, Parser)]
#[command(name = "sqci")]
#[command(
    author,
    version,
    about = "Configure, build, test and upload coverage for a CMake project"
)]
pub struct Cli {
    /// Build directory, relative to the repository unless absolute.
    #[arg(long)]
    pub build_dir: Option<Utf8PathBuf>,

    /// CMake build type.
    #[arg(long)]
    pub build_type: Option<String>,

    /// Run clang-tidy during the build.
    #[arg(long)]
    pub clang_tidy: bool,

    /// Build with coverage instrumentation and run the tests.
    #[arg(long)]
    pub coverage: bool,

    /// Coveralls repository token; enables the coverage upload.
    #[arg(long)]
    pub coveralls_repo_token: Option<String>,

    /// C++ compiler passed to CMake.
    #[arg(long)]
    pub cxx_compiler: Option<String>,

    /// Install prefix passed to CMake.
    #[arg(long)]
    pub install_prefix: Option<String>,

    /// Number of parallel build jobs.
    #[arg(long)]
    pub jobs: Option<u32>,

    /// Root of the source repository.
    #[arg(long)]
    pub repo: Option<Utf8PathBuf>,

    /// Build and run the tests.
    #[arg(long)]
    pub test: bool,
}
