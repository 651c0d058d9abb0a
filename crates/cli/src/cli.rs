use crate::tracing::{LogLevel, TracingFormat};
use clap::{Parser, ValueEnum};
use miette::{Diagnostic, Report};
use serde::{Deserialize, Serialize};
use snowcred_core::ConnectionParams;
use snowcred_secrets::DEFAULT_SECRETS_REGION;
use std::io::{self, Write};
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// Usage, configuration or secret error exit code
pub const EXIT_CLI: i32 = 2;
/// Connection or validation query error exit code
pub const EXIT_CONNECT: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// Configuration or secret error (exit code 2)
    #[error("{message}")]
    #[diagnostic(code(snowcred::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Connection or query error (exit code 3)
    #[error("{message}")]
    #[diagnostic(code(snowcred::cli::connect))]
    Connect {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new connection error
    #[must_use]
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to an existing error, returning a new error with the help text set.
    #[must_use]
    pub fn with_help(self, help_text: impl Into<String>) -> Self {
        let help = Some(help_text.into());
        match self {
            Self::Config { message, .. } => Self::Config { message, help },
            Self::Connect { message, .. } => Self::Connect { message, help },
        }
    }
}

/// Convert `snowcred_core::Error` to the matching `CliError` variant.
///
/// The message is the core error's display followed by every cause in its
/// source chain, so backend and driver messages reach the user unchanged.
impl From<snowcred_core::Error> for CliError {
    fn from(err: snowcred_core::Error) -> Self {
        let help = err.help().map(|h| h.to_string());
        let message = message_with_causes(&err);
        let cli_err = match err {
            snowcred_core::Error::Secret(_) | snowcred_core::Error::MissingWarehouse { .. } => {
                Self::config(message)
            }
            snowcred_core::Error::Connection(_)
            | snowcred_core::Error::Query(_)
            | snowcred_core::Error::EmptyResult { .. } => Self::connect(message),
        };
        match help {
            Some(help) => cli_err.with_help(help),
            None => cli_err,
        }
    }
}

/// Display of `err` with each source appended as `: cause`.
///
/// Causes already contained in the text so far are skipped, since many
/// errors repeat their source in their own message.
fn message_with_causes(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Connect { .. } => EXIT_CONNECT,
    }
}

/// Render error appropriately based on JSON flag
pub fn render_error(err: &CliError, json_mode: bool) {
    if json_mode {
        let error_envelope = ErrorEnvelope::new(serde_json::json!({
            "code": match err {
                CliError::Config { .. } => "config",
                CliError::Connect { .. } => "connect",
            },
            "message": err.to_string()
        }));

        match serde_json::to_string(&error_envelope) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error serializing error response"),
        }
    } else {
        let report = Report::new(err.clone());
        eprintln!("{report:?}");
        let _ = io::stderr().flush();
    }
}

/// Payload reported after an engine was registered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineReport {
    /// Label the engine was stored under
    pub engine_key: String,
    /// Server version returned by the validation query
    pub version: String,
}

/// Print the validation result: the bare version, or a JSON envelope
pub fn render_success(report: &EngineReport, json_mode: bool) {
    if json_mode {
        match serde_json::to_string(&OkEnvelope::new(report)) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error serializing response"),
        }
    } else {
        println!("{}", report.version);
    }
}

/// Success response envelope for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkEnvelope<T> {
    /// Status indicator - always "ok" for success
    pub status: &'static str,
    /// The actual data payload
    pub data: T,
}

impl<T> OkEnvelope<T> {
    /// Create a new success envelope
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response envelope for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope<E> {
    /// Status indicator - always "error" for failures
    pub status: &'static str,
    /// The error details
    pub error: E,
}

impl<E> ErrorEnvelope<E> {
    /// Create a new error envelope
    #[must_use]
    pub const fn new(error: E) -> Self {
        Self {
            status: "error",
            error,
        }
    }
}

/// Where credential secrets are read from
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum SecretsBackend {
    /// AWS Secrets Manager
    #[default]
    Aws,
    /// `SNOWCRED_SECRET_*` environment variables
    Env,
}

/// Create a Snowflake connection engine from credentials kept in a secrets store.
///
/// Reads the secret `snowflake/<ACCOUNT>`, opens a connection, prints the
/// server version and registers the engine under ENGINE_KEY.
#[derive(Parser, Debug)]
#[command(name = "snowcred")]
#[command(about = "Create a Snowflake connection engine from a stored secret")]
#[command(version)]
pub struct Cli {
    /// Logical account name; the secret is `snowflake/<ACCOUNT>`.
    #[arg(short = 'a', long, env = "SNOWCRED_ACCOUNT")]
    pub account: String,

    /// Warehouse overriding the one stored in the secret.
    #[arg(short = 'w', long)]
    pub warehouse: Option<String>,

    /// Database to connect to (adds a path segment, even when empty).
    #[arg(short = 'd', long)]
    pub database: Option<String>,

    /// Schema to connect to (only used together with --database).
    #[arg(short = 's', long)]
    pub schema: Option<String>,

    /// Keep idle sessions alive (default).
    #[arg(long, overrides_with = "no_keepalive")]
    keepalive: bool,

    /// Let idle sessions time out.
    #[arg(long = "no-keepalive", overrides_with = "keepalive")]
    no_keepalive: bool,

    /// Region of the secrets backend.
    #[arg(long, env = "SNOWCRED_SECRETS_REGION", default_value = DEFAULT_SECRETS_REGION)]
    pub secrets_region: String,

    /// Secrets backend to read credentials from.
    #[arg(
        long,
        env = "SNOWCRED_SECRETS_BACKEND",
        value_enum,
        default_value_t = SecretsBackend::Aws
    )]
    pub secrets_backend: SecretsBackend,

    /// Logging verbosity level.
    #[arg(short = 'L', long, default_value = "warn", value_enum)]
    pub level: LogLevel,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = TracingFormat::Pretty)]
    pub log_format: TracingFormat,

    /// Emit JSON envelopes on stdout.
    #[arg(long)]
    pub json: bool,

    /// Label under which the engine is registered.
    pub engine_key: String,
}

impl Cli {
    /// Whether sessions should be kept alive
    #[must_use]
    pub const fn keep_alive(&self) -> bool {
        self.keepalive || !self.no_keepalive
    }

    /// Connection parameters as passed on the command line
    #[must_use]
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            account: self.account.clone(),
            warehouse: self.warehouse.clone(),
            database: self.database.clone(),
            schema: self.schema.clone(),
        }
    }
}

/// Parse command-line arguments, exiting with usage on error
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
