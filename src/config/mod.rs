//! Configuration system for sqci.
//!
//! This module provides the configuration structure, CLI definition and
//! layered loader for the sqci entrypoint. Precedence: command-line flags
//! override environment variables, which override built-in defaults. There is
//! no configuration file.
//!
//! # Environment
//!
//! Each option can be set through its uppercased name, the `SQ_` prefixed
//! form, or the `INPUT_` prefixed form CI actions use for their inputs:
//!
//! ```text
//! BUILD_TYPE=Debug
//! SQ_JOBS=16
//! INPUT_COVERALLS_REPO_TOKEN=...
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use loader::{env_var_candidates, env_var_names, load_config, parse_env_bool};
pub use types::BuildConfig;
