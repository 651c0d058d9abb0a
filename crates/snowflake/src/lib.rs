//! Snowflake driver for snowcred
//!
//! Adapts [`snowflake_connector_rs`] to the [`Driver`] contract of
//! `snowcred-core`. Password authentication only.

use async_trait::async_trait;
use snowcred_core::{ConnectOptions, Connection, ConnectionUrl, Driver, DriverError, Engine};
use snowflake_connector_rs::{
    SnowflakeAuthMethod, SnowflakeClient, SnowflakeClientConfig, SnowflakeSession,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Session parameter statement enabling keep-alive
pub const KEEP_ALIVE_STATEMENT: &str = "alter session set client_session_keep_alive = true";

/// Driver backed by the Snowflake REST API
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowflakeDriver;

impl SnowflakeDriver {
    /// Create a new driver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Map a connection URL onto the connector's client configuration.
///
/// Empty database or schema segments leave the value unset.
#[must_use]
pub fn client_config(url: &ConnectionUrl) -> SnowflakeClientConfig {
    let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

    SnowflakeClientConfig {
        account: url.account_identifier().to_string(),
        warehouse: non_empty(Some(url.warehouse())),
        database: non_empty(url.database()),
        schema: non_empty(url.schema()),
        role: None,
        timeout: None,
    }
}

#[async_trait]
impl Driver for SnowflakeDriver {
    type Engine = SnowflakeEngine;

    fn name(&self) -> &'static str {
        "snowflake"
    }

    async fn create_engine(
        &self,
        url: &ConnectionUrl,
        options: ConnectOptions,
    ) -> Result<SnowflakeEngine, DriverError> {
        let client = SnowflakeClient::new(
            url.username(),
            SnowflakeAuthMethod::Password(url.password().expose().to_string()),
            client_config(url),
        )?;

        Ok(SnowflakeEngine {
            client,
            options,
            disposed: AtomicBool::new(false),
        })
    }
}

/// Snowflake client bound to one account, warehouse and optional database/schema
pub struct SnowflakeEngine {
    client: SnowflakeClient,
    options: ConnectOptions,
    disposed: AtomicBool,
}

impl std::fmt::Debug for SnowflakeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowflakeEngine")
            .field("options", &self.options)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl SnowflakeEngine {
    /// Whether [`Engine::dispose`] has been called at least once
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Engine for SnowflakeEngine {
    type Connection = SnowflakeConnection;

    async fn connect(&self) -> Result<SnowflakeConnection, DriverError> {
        let session = self.client.create_session().await?;

        if self.options.keep_alive {
            session.query(KEEP_ALIVE_STATEMENT).await?;
        }

        tracing::debug!(keep_alive = self.options.keep_alive, "Snowflake session opened");
        Ok(SnowflakeConnection {
            session: Some(session),
        })
    }

    async fn dispose(&self) {
        // Sessions are owned by connections; there is no pool to drain.
        self.disposed.store(true, Ordering::Relaxed);
        tracing::debug!("Snowflake engine disposed");
    }
}

/// One Snowflake session
pub struct SnowflakeConnection {
    session: Option<SnowflakeSession>,
}

#[async_trait]
impl Connection for SnowflakeConnection {
    async fn query_first_value(&mut self, sql: &str) -> Result<Option<String>, DriverError> {
        let session = self.session.as_ref().ok_or("Snowflake session is closed")?;
        let rows = session.query(sql).await?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let Some(column) = row.column_names().first().map(|c| (*c).to_string()) else {
            return Ok(None);
        };

        Ok(Some(row.get::<String>(&column)?))
    }

    async fn close(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("Snowflake session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowcred_core::{ConnectionParams, CredentialRecord, PathSegments};

    fn url(params: &ConnectionParams) -> ConnectionUrl {
        let record: CredentialRecord = serde_json::from_str(
            r#"{"username": "u", "password": "p", "account_identifier": "xy12345.us-east-1", "warehouse": "W"}"#,
        )
        .unwrap();
        ConnectionUrl::build(&record.merge(params), PathSegments::requested_by(params)).unwrap()
    }

    #[test]
    fn test_client_config_without_segments() {
        let config = client_config(&url(&ConnectionParams::new("a")));

        assert_eq!(config.account, "xy12345.us-east-1");
        assert_eq!(config.warehouse.as_deref(), Some("W"));
        assert!(config.database.is_none());
        assert!(config.schema.is_none());
        assert!(config.role.is_none());
    }

    #[test]
    fn test_client_config_with_database_and_schema() {
        let config = client_config(&url(
            &ConnectionParams::new("a")
                .with_database("RAW")
                .with_schema("PUBLIC"),
        ));

        assert_eq!(config.database.as_deref(), Some("RAW"));
        assert_eq!(config.schema.as_deref(), Some("PUBLIC"));
    }

    #[test]
    fn test_client_config_empty_segments_are_unset() {
        let config = client_config(&url(
            &ConnectionParams::new("a").with_database("").with_schema(""),
        ));

        assert!(config.database.is_none());
        assert!(config.schema.is_none());
    }

    #[tokio::test]
    async fn test_closed_connection_refuses_queries() {
        let mut connection = SnowflakeConnection { session: None };
        connection.close().await;

        let err = connection.query_first_value("select 1").await.unwrap_err();
        assert_eq!(err.to_string(), "Snowflake session is closed");
    }
}
