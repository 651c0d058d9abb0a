//! Error types for snowcred-core

use crate::driver::DriverError;
use miette::Diagnostic;
use snowcred_secrets::SecretError;
use thiserror::Error;

/// Main error type for connection assembly and verification
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Secret could not be read or decoded
    #[error(transparent)]
    #[diagnostic(
        code(snowcred::secrets),
        help("Check that the secret snowflake/<ACCOUNT> exists in the selected secrets backend and can be read")
    )]
    Secret(#[from] SecretError),

    /// Neither the secret nor the caller supplied a warehouse
    #[error("No warehouse configured for account '{account_identifier}'")]
    #[diagnostic(
        code(snowcred::config::warehouse),
        help("Pass --warehouse or add a \"warehouse\" key to the stored secret")
    )]
    MissingWarehouse {
        /// Account the connection was being built for
        account_identifier: String,
    },

    /// Driver could not create an engine or open a session
    #[error(transparent)]
    #[diagnostic(code(snowcred::connection))]
    Connection(DriverError),

    /// Validation query failed
    #[error(transparent)]
    #[diagnostic(code(snowcred::query))]
    Query(DriverError),

    /// Validation query succeeded but produced nothing to report
    #[error("Validation query '{query}' returned no rows")]
    #[diagnostic(code(snowcred::query::empty))]
    EmptyResult {
        /// The statement that was run
        query: &'static str,
    },
}

/// Result type alias for snowcred-core operations
pub type Result<T> = std::result::Result<T, Error>;
