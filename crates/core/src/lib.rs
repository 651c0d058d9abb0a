//! Core of snowcred
//!
//! Turns a credential record into a Snowflake connection URL, hands it to a
//! [`Driver`] and proves the resulting engine works with a single version
//! query.
//!
//! ```ignore
//! use snowcred_core::create_snowflake_engine;
//!
//! let verified = create_snowflake_engine(&resolver, &driver, "analytics").await?;
//! println!("{}", verified.version);
//! let engine = verified.engine;
//! ```
//!
//! Everything runs strictly one step after another. There is no retry,
//! pooling or caching.

mod connect;
pub mod driver;
mod error;
mod registry;
pub mod url;
mod verify;

pub use connect::{connect_account, create_snowflake_engine, register_engine};
pub use driver::{ConnectOptions, Connection, Driver, DriverError, Engine};
pub use error::{Error, Result};
pub use registry::EngineRegistry;
pub use url::{ConnectionUrl, PathSegments, SCHEME};
pub use verify::{VERSION_QUERY, VerifiedEngine, open_and_verify};

pub use snowcred_secrets::{ConnectionParams, CredentialRecord, SecretError, SecretResolver};
