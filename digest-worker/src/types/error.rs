//! Error types for digest invocations

use digest_storage::{bucket::BucketError, queue::QueueError, topic::TopicError};
use thiserror::Error;

/// Result type alias for digest operations
pub type DigestResult<T> = Result<T, DigestError>;

/// Errors that fail a digest invocation
#[derive(Error, Debug)]
pub enum DigestError {
    /// Receiving from or acknowledging on the queue failed
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A queue message body was not a valid notification record
    #[error("Malformed message {message_id}: {source}")]
    MalformedMessage {
        /// Queue-assigned ID of the offending delivery
        message_id: String,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Publishing to the notification topic failed
    #[error(transparent)]
    Topic(#[from] TopicError),

    /// Uploading or presigning the digest file failed
    #[error(transparent)]
    Bucket(#[from] BucketError),

    /// Writing the local digest file failed
    #[error("Failed to write digest file: {0}")]
    Artifact(#[from] std::io::Error),

    /// Encoding a record as CSV failed
    #[error("Failed to encode digest as CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Encoding a record as JSON failed
    #[error("Failed to encode digest as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DigestError {
    /// Whether the failure came from a 5xx response of an AWS service
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::Queue(e) => e.is_upstream_error(),
            Self::Topic(e) => e.is_upstream_error(),
            Self::Bucket(e) => e.is_upstream_error(),
            Self::MalformedMessage { .. } | Self::Artifact(_) | Self::Csv(_) | Self::Json(_) => {
                false
            }
        }
    }
}
