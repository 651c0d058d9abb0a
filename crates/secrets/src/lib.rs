//! Secret Resolution for snowcred
//!
//! Locates the stored credential bundle for a logical Snowflake account and
//! decodes it into a [`CredentialRecord`]. Backends implement
//! [`SecretResolver`]; this crate ships the environment backend, and the AWS
//! Secrets Manager backend lives in `snowcred-aws`.
//!
//! ```ignore
//! use snowcred_secrets::{ConnectionParams, SecretResolver};
//!
//! let record = resolver.resolve_credentials("analytics").await?;
//! let record = record.merge(&ConnectionParams::new("analytics").with_database("RAW"));
//! ```
//!
//! Every call re-reads the backend; nothing is cached.

mod record;
pub mod resolvers;
mod types;

pub use record::{ConnectionParams, CredentialRecord};
pub use resolvers::{ENV_SECRET_PREFIX, EnvSecretResolver};
pub use types::SecureSecret;

use async_trait::async_trait;
use thiserror::Error;

/// Namespace prefix of every credential secret
pub const SECRET_NAMESPACE: &str = "snowflake";

/// Region used when the caller does not name one
pub const DEFAULT_SECRETS_REGION: &str = "us-east-1";

/// Boxed error raised by a secrets backend, passed through untouched
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for secret resolution
#[derive(Debug, Error)]
pub enum SecretError {
    /// Account name was empty
    #[error("Account name must not be empty")]
    InvalidAccount,

    /// Secret not present in the backend that was searched
    #[error("Secret '{secret_id}' not found from source '{secret_source}'")]
    NotFound {
        /// Secret identifier
        secret_id: String,
        /// Source that was searched (e.g., env var name)
        secret_source: String,
    },

    /// Error raised by the backend itself, displayed verbatim
    #[error(transparent)]
    Backend(BackendError),

    /// Secret exists but carries no string payload
    #[error("Secret '{secret_id}' has no string value (may be binary)")]
    NoStringValue {
        /// Secret identifier
        secret_id: String,
    },

    /// Payload is not a credential record
    #[error("Secret '{secret_id}' is not a valid credential record: {source}")]
    Parse {
        /// Secret identifier
        secret_id: String,
        /// Decode failure
        #[source]
        source: serde_json::Error,
    },
}

impl SecretError {
    /// Wrap a backend failure without altering its message
    pub fn backend(err: impl Into<BackendError>) -> Self {
        Self::Backend(err.into())
    }
}

/// Identifier of the secret holding credentials for `account`.
#[must_use]
pub fn secret_id(account: &str) -> String {
    format!("{SECRET_NAMESPACE}/{account}")
}

/// Decode a secret payload into a [`CredentialRecord`].
///
/// # Errors
/// Returns [`SecretError::Parse`] when the payload is not JSON or misses a
/// required key.
pub fn parse_credentials(secret_id: &str, payload: &str) -> Result<CredentialRecord, SecretError> {
    serde_json::from_str(payload).map_err(|source| SecretError::Parse {
        secret_id: secret_id.to_string(),
        source,
    })
}

/// Trait for reading credential secrets from a backend.
///
/// Implementors provide [`get_secret_string`](SecretResolver::get_secret_string);
/// [`resolve_credentials`](SecretResolver::resolve_credentials) derives the
/// secret identifier and decodes the payload.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Fetch the raw string payload of `secret_id`.
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, SecretError>;

    /// Get the provider name for this resolver.
    ///
    /// Examples: `"env"`, `"aws"`
    fn provider_name(&self) -> &'static str;

    /// Region the backend reads from, for backends that are region-scoped.
    fn region(&self) -> Option<&str> {
        None
    }

    /// Resolve the credential record for a logical account.
    async fn resolve_credentials(&self, account: &str) -> Result<CredentialRecord, SecretError> {
        if account.trim().is_empty() {
            return Err(SecretError::InvalidAccount);
        }

        let secret_id = secret_id(account);
        tracing::debug!(
            secret_id = %secret_id,
            provider = self.provider_name(),
            region = self.region(),
            "Fetching credential secret"
        );

        let payload = self.get_secret_string(&secret_id).await?;
        parse_credentials(&secret_id, &payload)
    }
}
