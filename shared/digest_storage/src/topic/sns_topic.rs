//! SNS topic implementation

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use tracing::debug;

use super::{TopicPublisher, TopicResult};

/// SNS topic that digest notifications are published to
pub struct SnsTopic {
    sns_client: Arc<SnsClient>,
    topic_arn: String,
}

impl SnsTopic {
    /// Creates a new SNS topic publisher
    ///
    /// # Arguments
    ///
    /// * `sns_client` - Pre-configured SNS client
    /// * `topic_arn` - ARN of the topic to publish to
    #[must_use]
    pub const fn new(sns_client: Arc<SnsClient>, topic_arn: String) -> Self {
        Self {
            sns_client,
            topic_arn,
        }
    }
}

#[async_trait]
impl TopicPublisher for SnsTopic {
    async fn publish(&self, subject: &str, message: &str) -> TopicResult<String> {
        let result = self
            .sns_client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await?;

        let message_id = result
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default();

        debug!("Published message {} to {}", message_id, self.topic_arn);

        Ok(message_id)
    }
}
