//! Secret resolver implementations
//!
//! This module provides built-in resolvers that require no external dependencies:
//!
//! - [`EnvSecretResolver`] - Environment variables
//!
//! AWS Secrets Manager is available via the `snowcred-aws` crate.

mod env;

pub use env::{ENV_SECRET_PREFIX, EnvSecretResolver};
