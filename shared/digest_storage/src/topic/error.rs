use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::publish::PublishError;
use thiserror::Error;

/// Result type alias for topic operations
pub type TopicResult<T> = Result<T, TopicError>;

/// Error types for topic operations
#[derive(Error, Debug)]
pub enum TopicError {
    /// Error publishing to SNS
    #[error("Failed to publish message to SNS")]
    Publish(#[from] SdkError<PublishError>),

    /// Rejected by a non-SNS publisher
    #[error("Publish rejected: {0}")]
    Rejected(String),
}

impl TopicError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::Publish(SdkError::ServiceError(err)) => err.raw().status().as_u16() >= 500,
            Self::Publish(_) | Self::Rejected(_) => false,
        }
    }
}
