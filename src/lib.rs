//! CI build entrypoint for CMake projects.
//!
//! `sqci` resolves its settings from built-in defaults, environment variables
//! and command-line flags, then drives an external toolchain through a fixed
//! pipeline: `cmake` configure, `ninja` build and install, `ninja test`, and a
//! Coveralls upload. Each command is logged before it runs, with the Coveralls
//! token redacted.
//!
//! # Modules
//!
//! - [`config`]: Layered configuration (CLI > env > defaults)
//! - [`pipeline`]: Step construction and execution
//! - [`redact`]: Secret redaction for logged values
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Semantic error types for the application

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod redact;
