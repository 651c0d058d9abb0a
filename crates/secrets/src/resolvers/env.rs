//! Environment variable secret resolver

use crate::{SecretError, SecretResolver};
use async_trait::async_trait;

/// Prefix of the environment variables read by [`EnvSecretResolver`]
pub const ENV_SECRET_PREFIX: &str = "SNOWCRED_SECRET_";

/// Resolves secrets from environment variables
///
/// The secret `snowflake/analytics` is read from `SNOWCRED_SECRET_SNOWFLAKE_ANALYTICS`:
/// the identifier is upper-cased and every non-alphanumeric character becomes `_`.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretResolver;

impl EnvSecretResolver {
    /// Create a new environment variable resolver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Name of the environment variable holding `secret_id`
    #[must_use]
    pub fn variable_name(secret_id: &str) -> String {
        let suffix: String = secret_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{ENV_SECRET_PREFIX}{suffix}")
    }
}

#[async_trait]
impl SecretResolver for EnvSecretResolver {
    fn provider_name(&self) -> &'static str {
        "env"
    }

    async fn get_secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        let variable = Self::variable_name(secret_id);
        std::env::var(&variable).map_err(|_| SecretError::NotFound {
            secret_id: secret_id.to_string(),
            secret_source: variable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_name() {
        assert_eq!(
            EnvSecretResolver::variable_name("snowflake/analytics"),
            "SNOWCRED_SECRET_SNOWFLAKE_ANALYTICS"
        );
        assert_eq!(
            EnvSecretResolver::variable_name("snowflake/prod-eu.1"),
            "SNOWCRED_SECRET_SNOWFLAKE_PROD_EU_1"
        );
    }

    #[tokio::test]
    async fn test_resolve_from_env() {
        temp_env::async_with_vars(
            [(
                "SNOWCRED_SECRET_SNOWFLAKE_ENVTEST",
                Some(r#"{"username": "u", "password": "p", "account_identifier": "acct", "warehouse": "WH"}"#),
            )],
            async {
                let resolver = EnvSecretResolver::new();
                let record = resolver.resolve_credentials("envtest").await.unwrap();

                assert_eq!(record.username, "u");
                assert_eq!(record.password.expose(), "p");
                assert_eq!(record.warehouse.as_deref(), Some("WH"));
            },
        )
        .await;
    }

    #[tokio::test]
    async fn test_missing_env_var() {
        let resolver = EnvSecretResolver::new();
        let result = resolver.resolve_credentials("nonexistent_account_12345").await;

        match result {
            Err(SecretError::NotFound {
                secret_id,
                secret_source,
            }) => {
                assert_eq!(secret_id, "snowflake/nonexistent_account_12345");
                assert_eq!(secret_source, "SNOWCRED_SECRET_SNOWFLAKE_NONEXISTENT_ACCOUNT_12345");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_in_env() {
        temp_env::async_with_vars(
            [("SNOWCRED_SECRET_SNOWFLAKE_BROKEN", Some("{username"))],
            async {
                let resolver = EnvSecretResolver::new();
                let result = resolver.resolve_credentials("broken").await;
                assert!(matches!(result, Err(SecretError::Parse { .. })));
            },
        )
        .await;
    }
}
