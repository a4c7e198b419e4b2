//! S3 bucket operations for digest files

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;
mod s3_bucket;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use error::{BucketError, BucketResult};
pub use s3_bucket::S3DigestBucket;

/// Presigned URL with expiration information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    /// The presigned URL for GET operations
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Object storage holding uploaded digest files
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads the file at `path` under `key`
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the file cannot be read or the upload fails
    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> BucketResult<()>;

    /// Generates a time-limited download URL for `key`
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the expiry is out of range or presigning fails
    async fn presigned_get_url(&self, key: &str, expires_in: Duration)
        -> BucketResult<PresignedUrl>;
}
