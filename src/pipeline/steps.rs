//! Command lines for each pipeline step.
//!
//! These builders only describe what to run; [`super::run_pipeline`] decides
//! whether and in which order the steps execute.

use super::{Invocation, Step};
use crate::config::BuildConfig;

/// Environment variable the Coveralls uploader reads its token from.
pub const COVERALLS_TOKEN_VAR: &str = "COVERALLS_REPO_TOKEN";

/// Formats a boolean the way CMake cache options expect.
#[must_use]
pub const fn cmake_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

/// Picks the gcov front-end matching the compiler that produced the
/// coverage data.
#[must_use]
pub fn gcov_tool(cxx_compiler: &str) -> &'static str {
    if cxx_compiler == "g++" {
        "gcov"
    } else {
        "llvm-gcov"
    }
}

/// `cmake` generator invocation.
#[must_use]
pub fn configure(config: &BuildConfig) -> Invocation {
    let invocation = Invocation::new(Step::Configure, "cmake", config.build_dir.clone()).args([
        String::from("-GNinja"),
        format!("-DCMAKE_BUILD_TYPE={}", config.build_type),
        format!("-DSQ_USE_CLANG_TIDY={}", cmake_bool(config.clang_tidy)),
        format!("-DSQ_USE_COVERAGE={}", cmake_bool(config.coverage)),
        format!("-DCMAKE_CXX_COMPILER={}", config.cxx_compiler),
    ]);
    let invocation = match &config.install_prefix {
        Some(prefix) => invocation.arg(format!("-DCMAKE_INSTALL_PREFIX={prefix}")),
        None => invocation,
    };
    invocation
        .arg(format!("-DSQ_BUILD_TESTS={}", cmake_bool(config.runs_tests())))
        .arg(config.repo.as_str())
}

/// `ninja` build invocation.
#[must_use]
pub fn build(config: &BuildConfig) -> Invocation {
    Invocation::new(Step::Build, "ninja", config.build_dir.clone())
        .arg(format!("-j{}", config.jobs))
}

/// `ninja install` invocation.
#[must_use]
pub fn install(config: &BuildConfig) -> Invocation {
    Invocation::new(Step::Install, "ninja", config.build_dir.clone()).arg("install")
}

/// `ninja test` invocation.
#[must_use]
pub fn test(config: &BuildConfig) -> Invocation {
    Invocation::new(Step::Test, "ninja", config.build_dir.clone()).arg("test")
}

/// `coveralls` upload invocation, or `None` when no repo token is set.
///
/// The token travels in the child's environment overlay, never on the
/// command line.
#[must_use]
pub fn coverage_upload(config: &BuildConfig) -> Option<Invocation> {
    let token = config.coveralls_repo_token.as_ref()?;
    let invocation = Invocation::new(Step::CoverageUpload, "coveralls", config.build_dir.clone())
        .args([
            "--gcov",
            gcov_tool(&config.cxx_compiler),
            "--root",
            config.repo.as_str(),
            "--build-root",
            config.build_dir.as_str(),
            "-i",
            "src/",
            "--exclude",
            "_deps/",
            "--exclude-pattern",
            ".*/test/.*",
        ])
        .env(COVERALLS_TOKEN_VAR, token.clone());
    Some(invocation)
}
