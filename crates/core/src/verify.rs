//! Connection opener and smoke test

use crate::driver::{ConnectOptions, Connection, Driver, Engine};
use crate::{ConnectionUrl, Error, Result};

/// Statement used to prove a session works
pub const VERSION_QUERY: &str = "select current_version()";

/// An engine whose connectivity was proven by [`VERSION_QUERY`].
#[derive(Debug)]
pub struct VerifiedEngine<E> {
    /// The engine handle; the caller owns it from here on
    pub engine: E,
    /// Server version reported by the validation query
    pub version: String,
}

/// Create an engine for `url`, run [`VERSION_QUERY`] on a fresh connection
/// and return the engine with the reported version.
///
/// The validation connection is closed and the engine disposed exactly once
/// on every path out of this function, in that order, before any error is
/// returned.
///
/// # Errors
/// - [`Error::Connection`] if the engine cannot be created or connected
/// - [`Error::Query`] if the validation query fails
/// - [`Error::EmptyResult`] if it returns no rows
pub async fn open_and_verify<D>(
    driver: &D,
    url: &ConnectionUrl,
    options: ConnectOptions,
) -> Result<VerifiedEngine<D::Engine>>
where
    D: Driver + ?Sized,
{
    let engine = driver
        .create_engine(url, options)
        .await
        .map_err(Error::Connection)?;

    let version = query_version(&engine).await;
    engine.dispose().await;
    tracing::debug!(driver = driver.name(), "Engine disposed after validation");

    Ok(VerifiedEngine {
        engine,
        version: version?,
    })
}

async fn query_version<E: Engine>(engine: &E) -> Result<String> {
    let mut connection = engine.connect().await.map_err(Error::Connection)?;
    let result = connection.query_first_value(VERSION_QUERY).await;
    connection.close().await;

    match result {
        Ok(Some(version)) => Ok(version),
        Ok(None) => Err(Error::EmptyResult {
            query: VERSION_QUERY,
        }),
        Err(e) => Err(Error::Query(e)),
    }
}
