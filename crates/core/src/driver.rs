//! Database driver contract
//!
//! The wire protocol belongs to an external driver. snowcred only needs to
//! create an engine from a [`ConnectionUrl`], open one session on it, run a
//! single statement and release everything again.

use crate::ConnectionUrl;
use async_trait::async_trait;

/// Boxed error raised by a driver, passed through untouched
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Options applied when an engine opens sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Keep idle sessions alive instead of letting the server time them out
    pub keep_alive: bool,
}

impl ConnectOptions {
    /// Options with keep-alive set as given
    #[must_use]
    pub const fn keep_alive(keep_alive: bool) -> Self {
        Self { keep_alive }
    }
}

/// Creates engines from connection URLs.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Engine type produced by this driver
    type Engine: Engine;

    /// Driver name, for diagnostics
    fn name(&self) -> &'static str;

    /// Create an engine for `url`. No session is opened yet.
    async fn create_engine(
        &self,
        url: &ConnectionUrl,
        options: ConnectOptions,
    ) -> Result<Self::Engine, DriverError>;
}

/// A session factory bound to one connection URL.
///
/// After [`dispose`](Engine::dispose) the engine can still open new
/// connections; disposing only releases what it currently holds.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Connection type produced by this engine
    type Connection: Connection;

    /// Open a new session
    async fn connect(&self) -> Result<Self::Connection, DriverError>;

    /// Release resources held by the engine
    async fn dispose(&self);
}

/// One live session.
#[async_trait]
pub trait Connection: Send {
    /// Run `sql` and return the first column of the first row, if any
    async fn query_first_value(&mut self, sql: &str) -> Result<Option<String>, DriverError>;

    /// Close the session
    async fn close(&mut self);
}
