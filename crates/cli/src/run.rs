//! Command execution: resolve, connect, verify, register

use crate::cli::{CliError, EngineReport, SecretsBackend};
use crate::Cli;
use snowcred_aws::AwsResolver;
use snowcred_core::{ConnectOptions, Driver, EngineRegistry, register_engine};
use snowcred_secrets::{EnvSecretResolver, SecretResolver};
use snowcred_snowflake::{SnowflakeDriver, SnowflakeEngine};

/// Outcome of a successful run
#[derive(Debug)]
pub struct Registered<E> {
    /// Registry holding the new engine
    pub registry: EngineRegistry<E>,
    /// What to report to the user
    pub report: EngineReport,
}

/// Build the secrets backend selected on the command line
pub async fn resolver_for(cli: &Cli) -> Box<dyn SecretResolver> {
    match cli.secrets_backend {
        SecretsBackend::Aws => Box::new(AwsResolver::new(cli.secrets_region.clone()).await),
        SecretsBackend::Env => Box::new(EnvSecretResolver::new()),
    }
}

/// Run the command against AWS/env secrets and the Snowflake driver
///
/// # Errors
/// Returns a [`CliError`] carrying the underlying failure's message.
pub async fn run(cli: &Cli) -> Result<Registered<SnowflakeEngine>, CliError> {
    let resolver = resolver_for(cli).await;
    run_with(cli, resolver.as_ref(), &SnowflakeDriver::new()).await
}

/// Run the command with explicit collaborators
///
/// # Errors
/// Returns a [`CliError`] carrying the underlying failure's message.
pub async fn run_with<R, D>(
    cli: &Cli,
    resolver: &R,
    driver: &D,
) -> Result<Registered<D::Engine>, CliError>
where
    R: SecretResolver + ?Sized,
    D: Driver + ?Sized,
{
    let mut registry = EngineRegistry::new();
    let version = register_engine(
        &mut registry,
        &cli.engine_key,
        resolver,
        driver,
        &cli.connection_params(),
        ConnectOptions::keep_alive(cli.keep_alive()),
    )
    .await?;

    tracing::debug!(
        engine_key = %cli.engine_key,
        registered = registry.len(),
        "Engine registered"
    );

    Ok(Registered {
        registry,
        report: EngineReport {
            engine_key: cli.engine_key.clone(),
            version,
        },
    })
}
