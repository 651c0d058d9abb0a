//! AWS Secrets Manager secret resolver with auto-negotiating dual-mode (HTTP + CLI)

use async_trait::async_trait;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use snowcred_secrets::{DEFAULT_SECRETS_REGION, SecretError, SecretResolver};
use tokio::process::Command;

/// Resolves secrets from AWS Secrets Manager in a single region
///
/// Mode is auto-negotiated based on environment:
/// - If `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` are set → HTTP mode
/// - Otherwise → CLI mode (uses `aws` CLI)
///
/// Backend failures are returned as [`SecretError::Backend`] with the
/// service's own message. There is no retry.
pub struct AwsResolver {
    region: String,
    http_client: Option<Client>,
}

impl std::fmt::Debug for AwsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsResolver")
            .field("region", &self.region)
            .field("mode", &if self.can_use_http() { "http" } else { "cli" })
            .finish()
    }
}

impl AwsResolver {
    /// Create a resolver for `region` with auto-detected mode
    ///
    /// If AWS credentials are available in environment, initializes HTTP client.
    /// Otherwise, CLI mode will be used.
    pub async fn new(region: impl Into<String>) -> Self {
        let region = region.into();
        let http_client = if Self::http_credentials_available() {
            let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(region.clone()))
                .load()
                .await;
            Some(Client::new(&config))
        } else {
            None
        };

        tracing::debug!(
            region = %region,
            http = http_client.is_some(),
            "AWS Secrets Manager resolver ready"
        );

        Self {
            region,
            http_client,
        }
    }

    /// Create a resolver for the default region
    pub async fn with_default_region() -> Self {
        Self::new(DEFAULT_SECRETS_REGION).await
    }

    /// Region this resolver reads from
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Check if HTTP credentials are available in environment
    fn http_credentials_available() -> bool {
        std::env::var("AWS_ACCESS_KEY_ID").is_ok() && std::env::var("AWS_SECRET_ACCESS_KEY").is_ok()
    }

    /// Check if this resolver can use HTTP mode
    const fn can_use_http(&self) -> bool {
        self.http_client.is_some()
    }

    /// Resolve using the AWS SDK (HTTP mode)
    async fn resolve_http(&self, client: &Client, secret_id: &str) -> Result<String, SecretError> {
        let response = client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(Self::backend_error)?;

        response
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| SecretError::NoStringValue {
                secret_id: secret_id.to_string(),
            })
    }

    /// Service errors carry their own message; dispatch, timeout and
    /// credential failures only show their cause through the error context.
    fn backend_error(err: SdkError<GetSecretValueError>) -> SecretError {
        if matches!(err, SdkError::ServiceError(_)) {
            SecretError::backend(err.into_service_error())
        } else {
            SecretError::backend(DisplayErrorContext(&err).to_string())
        }
    }

    /// Arguments passed to the `aws` CLI for `secret_id`
    fn cli_args(&self, secret_id: &str) -> Vec<String> {
        vec![
            "secretsmanager".to_string(),
            "get-secret-value".to_string(),
            "--region".to_string(),
            self.region.clone(),
            "--secret-id".to_string(),
            secret_id.to_string(),
            "--query".to_string(),
            "SecretString".to_string(),
            "--output".to_string(),
            "text".to_string(),
        ]
    }

    /// Resolve using the AWS CLI
    async fn resolve_cli(&self, secret_id: &str) -> Result<String, SecretError> {
        let output = Command::new("aws")
            .args(self.cli_args(secret_id))
            .output()
            .await
            .map_err(SecretError::backend)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SecretError::backend(stderr));
        }

        Self::secret_from_cli_output(secret_id, &String::from_utf8_lossy(&output.stdout))
    }

    /// Interpret `--output text` of the CLI; binary secrets print `None`
    fn secret_from_cli_output(secret_id: &str, stdout: &str) -> Result<String, SecretError> {
        let secret_string = stdout.trim();
        if secret_string.is_empty() || secret_string == "None" {
            return Err(SecretError::NoStringValue {
                secret_id: secret_id.to_string(),
            });
        }
        Ok(secret_string.to_string())
    }
}

#[async_trait]
impl SecretResolver for AwsResolver {
    fn provider_name(&self) -> &'static str {
        "aws"
    }

    fn region(&self) -> Option<&str> {
        Some(&self.region)
    }

    async fn get_secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        if let Some(client) = &self.http_client {
            return self.resolve_http(client, secret_id).await;
        }

        self.resolve_cli(secret_id).await
    }
}
