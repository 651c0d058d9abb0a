//! End-to-end flows: fetch secret, merge, build URL, open and verify

use crate::driver::{ConnectOptions, Driver};
use crate::registry::EngineRegistry;
use crate::url::{ConnectionUrl, PathSegments};
use crate::verify::{VerifiedEngine, open_and_verify};
use crate::Result;
use snowcred_secrets::{ConnectionParams, SecretResolver};

/// Resolve credentials for `params.account`, build the connection URL with
/// the requested `segments` and verify it.
///
/// # Errors
/// Propagates secret, URL and driver errors unchanged.
pub async fn connect_account<R, D>(
    resolver: &R,
    driver: &D,
    params: &ConnectionParams,
    segments: PathSegments,
    options: ConnectOptions,
) -> Result<VerifiedEngine<D::Engine>>
where
    R: SecretResolver + ?Sized,
    D: Driver + ?Sized,
{
    let record = resolver
        .resolve_credentials(&params.account)
        .await?
        .merge(params);
    let url = ConnectionUrl::build(&record, segments)?;

    tracing::info!(
        url = %url,
        region = resolver.region(),
        keep_alive = options.keep_alive,
        driver = driver.name(),
        "Opening connection"
    );

    let verified = open_and_verify(driver, &url, options).await?;
    tracing::info!(version = %verified.version, "Connection verified");
    Ok(verified)
}

/// Library entry point: verified engine for `account` with the stored
/// warehouse, no database or schema segment and no keep-alive.
///
/// The validation connection is already closed when this returns; the
/// engine itself is handed to the caller.
///
/// Nothing is printed: the server version is returned in
/// [`VerifiedEngine::version`] and logged at `info`. Callers that want it on
/// stdout print it themselves.
///
/// # Errors
/// Propagates secret, URL and driver errors unchanged.
pub async fn create_snowflake_engine<R, D>(
    resolver: &R,
    driver: &D,
    account: &str,
) -> Result<VerifiedEngine<D::Engine>>
where
    R: SecretResolver + ?Sized,
    D: Driver + ?Sized,
{
    let params = ConnectionParams::new(account)
        .with_database("")
        .with_schema("");
    connect_account(
        resolver,
        driver,
        &params,
        PathSegments::NONE,
        ConnectOptions::default(),
    )
    .await
}

/// Command-line flow: verify an engine for `params` and store it in
/// `registry` under `label`. Path segments follow which of
/// `params.database`/`params.schema` were passed.
///
/// Returns the reported server version.
///
/// # Errors
/// Propagates secret, URL and driver errors unchanged; nothing is
/// registered on failure.
pub async fn register_engine<R, D>(
    registry: &mut EngineRegistry<D::Engine>,
    label: &str,
    resolver: &R,
    driver: &D,
    params: &ConnectionParams,
    options: ConnectOptions,
) -> Result<String>
where
    R: SecretResolver + ?Sized,
    D: Driver + ?Sized,
{
    let verified = connect_account(
        resolver,
        driver,
        params,
        PathSegments::requested_by(params),
        options,
    )
    .await?;

    if registry.insert(label, verified.engine).is_some() {
        tracing::warn!(label, "Replaced previously registered engine");
    }
    Ok(verified.version)
}
