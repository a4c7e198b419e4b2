//! Environment configuration for different deployment stages

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use digest_storage::queue::QueueConfig;

use crate::digest::{DigestFormat, UnknownDigestFormat};

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            Self::Development => Some(LOCALSTACK_ENDPOINT),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    #[must_use]
    pub fn s3_client_config(&self, aws_config: &aws_config::SdkConfig) -> aws_sdk_s3::Config {
        let mut builder = aws_sdk_s3::config::Builder::from(aws_config);

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Returns the configuration of the queue to drain
    ///
    /// # Panics
    ///
    /// Panics if the `SQS_QUEUE_URL` environment variable is not set in production/staging
    #[must_use]
    pub fn digest_queue_config(&self) -> QueueConfig {
        let queue_url = match self {
            Self::Production | Self::Staging => {
                env::var("SQS_QUEUE_URL").expect("SQS_QUEUE_URL environment variable is not set")
            }
            Self::Development => env::var("SQS_QUEUE_URL").unwrap_or_else(|_| {
                format!("{LOCALSTACK_ENDPOINT}/000000000000/sns-digest-queue")
            }),
        };

        QueueConfig::for_draining(queue_url)
    }

    /// Returns the ARN of the topic digests are published to
    ///
    /// # Panics
    ///
    /// Panics if the `DIGEST_TOPIC_ARN` environment variable is not set in production/staging
    #[must_use]
    pub fn digest_topic_arn(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("DIGEST_TOPIC_ARN")
                .expect("DIGEST_TOPIC_ARN environment variable is not set"),
            Self::Development => env::var("DIGEST_TOPIC_ARN")
                .unwrap_or_else(|_| "arn:aws:sns:us-east-1:000000000000:sns-digest".to_string()),
        }
    }

    /// Returns the S3 bucket name digest files are stored in
    ///
    /// # Panics
    ///
    /// Panics if the `DIGEST_BUCKET_NAME` environment variable is not set in production/staging
    #[must_use]
    pub fn digest_bucket_name(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("DIGEST_BUCKET_NAME")
                .expect("DIGEST_BUCKET_NAME environment variable is not set"),
            Self::Development => {
                env::var("DIGEST_BUCKET_NAME").unwrap_or_else(|_| "sns-digest".to_string())
            }
        }
    }

    /// Returns the digest file format, defaulting to CSV
    ///
    /// # Errors
    ///
    /// Returns `UnknownDigestFormat` if `OUTPUT_FORMAT` is neither `json` nor `csv`
    pub fn output_format(&self) -> Result<DigestFormat, UnknownDigestFormat> {
        env::var("OUTPUT_FORMAT").map_or(Ok(DigestFormat::Csv), |value| value.parse())
    }

    /// Returns the directory digest files are written to before upload
    #[must_use]
    pub fn scratch_dir(&self) -> PathBuf {
        env::var("DIGEST_SCRATCH_DIR").map_or_else(|_| env::temp_dir(), PathBuf::from)
    }
}
