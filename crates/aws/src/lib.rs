//! AWS integration for snowcred
//!
//! Reads Snowflake credential secrets from AWS Secrets Manager via the
//! [`secrets`] module.

pub mod secrets;

pub use secrets::AwsResolver;
