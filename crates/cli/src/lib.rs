//! snowcred - Snowflake engines from stored credentials
//!
//! Library side of the `snowcred` binary: argument parsing, tracing setup,
//! error rendering and the run loop. The connection logic itself lives in
//! `snowcred-core`.

// CLI output goes to stdout/stderr by design
#![allow(clippy::print_stdout, clippy::print_stderr)]

/// CLI argument parsing, exit codes and output rendering.
pub mod cli;
/// Command execution.
pub mod run;
/// Tracing and logging configuration.
pub mod tracing;

pub use cli::Cli;
pub use run::{Registered, run, run_with};
