//! S3 bucket client implementation

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, primitives::ByteStream, Client as S3Client};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{BucketError, BucketResult, ObjectStore, PresignedUrl};

/// S3 bucket that stores digest files
pub struct S3DigestBucket {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3DigestBucket {
    /// Creates a new digest bucket client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for digest files
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait]
impl ObjectStore for S3DigestBucket {
    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> BucketResult<()> {
        debug!("Uploading {} to s3://{}/{}", path.display(), self.bucket_name, key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| BucketError::ReadSource(format!("{}: {e}", path.display())))?;

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await?;

        Ok(())
    }

    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> BucketResult<PresignedUrl> {
        let presigned_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presigned_config)
            .await?;

        let expires_at: DateTime<Utc> = Utc::now() + expires_in;

        debug!(
            "Generated presigned URL for object: {} expires at: {}",
            key, expires_at
        );

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_at,
        })
    }
}
