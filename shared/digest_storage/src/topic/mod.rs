//! SNS topic publishing for digest notifications

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;
mod sns_topic;

use async_trait::async_trait;

pub use error::{TopicError, TopicResult};
pub use sns_topic::SnsTopic;

/// A pub/sub topic that fans a notification out to its subscribers
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publishes `message` with `subject`, returning the published message ID
    ///
    /// # Errors
    ///
    /// Returns `TopicError` if the publish operation fails
    async fn publish(&self, subject: &str, message: &str) -> TopicResult<String>;
}
