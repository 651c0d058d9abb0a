//! snowcred CLI Application
//!
//! Reads Snowflake credentials from a secrets store, opens and verifies an
//! engine, prints the server version and registers the engine under the
//! given key.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

use snowcred::cli::{self, EXIT_OK, exit_code_for, render_error, render_success};
use snowcred::tracing::{self, TracingConfig};

/// Exit code when the runtime cannot be started
const EXIT_RUNTIME: i32 = 1;

fn main() {
    // NOTE: Using eprintln! in panic hook is intentional - tracing infrastructure
    // may be corrupted during a panic, so we use the most reliable output method.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        ..Default::default()
    };
    if let Err(e) = tracing::init_tracing(tracing_config) {
        eprintln!("Warning: {e}");
    }

    std::process::exit(run_with_tokio(&cli));
}

/// Drive the run on a single-threaded runtime and report the outcome
fn run_with_tokio(cli: &cli::Cli) -> i32 {
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            return EXIT_RUNTIME;
        }
    };

    match rt.block_on(snowcred::run(cli)) {
        Ok(registered) => {
            render_success(&registered.report, cli.json);
            EXIT_OK
        }
        Err(err) => {
            render_error(&err, cli.json);
            exit_code_for(&err)
        }
    }
}
