use std::path::PathBuf;
use std::time::Duration;

use digest_storage::queue::QueueConfig;

use crate::digest::{DigestFormat, UnknownDigestFormat};
use crate::types::environment::Environment;

/// Default time between scheduled invocations
pub const DEFAULT_SCHEDULE_SECS: u64 = 5 * 60;

/// Configuration for the digest worker, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Queue to drain
    pub queue: QueueConfig,
    /// Topic notifications are published to
    pub topic_arn: String,
    /// Bucket digest files are uploaded to
    pub bucket_name: String,
    /// Digest file encoding
    pub format: DigestFormat,
    /// Local directory digest files are written to before upload
    pub scratch_dir: PathBuf,
    /// Time between scheduled invocations
    pub schedule_interval: Duration,
}

impl WorkerConfig {
    /// Creates a new `WorkerConfig` from the given environment
    ///
    /// # Errors
    ///
    /// Returns `UnknownDigestFormat` if `OUTPUT_FORMAT` is not a supported format
    pub fn from_environment(
        env: &Environment,
        schedule_interval: Duration,
    ) -> Result<Self, UnknownDigestFormat> {
        Ok(Self {
            queue: env.digest_queue_config(),
            topic_arn: env.digest_topic_arn(),
            bucket_name: env.digest_bucket_name(),
            format: env.output_format()?,
            scratch_dir: env.scratch_dir(),
            schedule_interval,
        })
    }
}
