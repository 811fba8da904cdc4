//! Configuration data types for sqci.

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};

/// Resolved build configuration.
///
/// This structure is merged from three layers with increasing precedence:
/// built-in defaults, environment variables, and command-line arguments.
/// After merging, a relative `build_dir` is rebased under `repo` so every
/// pipeline step sees an absolute build directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SQ", post_merge_hook)]
pub struct BuildConfig {
    /// Directory the project is configured and built in.
    #[ortho_config(skip_cli)]
    pub build_dir: Utf8PathBuf,

    /// CMake build type (for example `Release` or `Debug`).
    #[ortho_config(skip_cli)]
    pub build_type: String,

    /// Run clang-tidy during the build.
    #[ortho_config(skip_cli)]
    pub clang_tidy: bool,

    /// Build with coverage instrumentation and run the test suite.
    #[ortho_config(skip_cli)]
    pub coverage: bool,

    /// Coveralls repository token used by the upload step.
    #[ortho_config(skip_cli)]
    pub coveralls_repo_token: Option<String>,

    /// C++ compiler passed to CMake.
    #[ortho_config(skip_cli)]
    pub cxx_compiler: String,

    /// Optional install prefix passed to CMake.
    #[ortho_config(skip_cli)]
    pub install_prefix: Option<String>,

    /// Number of parallel build jobs.
    #[ortho_config(skip_cli)]
    pub jobs: u32,

    /// Root of the source repository.
    #[ortho_config(skip_cli)]
    pub repo: Utf8PathBuf,

    /// Build and run the test suite.
    #[ortho_config(skip_cli)]
    pub test: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_dir: Utf8PathBuf::from("build"),
            build_type: String::from("Release"),
            clang_tidy: false,
            coverage: false,
            coveralls_repo_token: None,
            cxx_compiler: String::from("clang++"),
            install_prefix: None,
            jobs: 4,
            repo: Utf8PathBuf::from("/work"),
            test: false,
        }
    }
}

impl BuildConfig {
    /// Rebases a relative `build_dir` under `repo`.
    ///
    /// Absolute build directories are left untouched, so calling this more
    /// than once has no further effect.
    pub fn absolutise_build_dir(&mut self) {
        if self.build_dir.is_relative() {
            self.build_dir = self.repo.join(&self.build_dir);
        }
    }

    /// Returns whether the test step should run.
    ///
    /// Coverage collection needs test results, so coverage implies testing.
    #[must_use]
    pub const fn runs_tests(&self) -> bool {
        self.test || self.coverage
    }
}

impl PostMergeHook for BuildConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        self.absolutise_build_dir();
        Ok(())
    }
}
