//! SQS queue implementation
//!
//! Receives raw message bodies; parsing is left to the caller so that a
//! malformed body can fail the caller's invocation instead of being dropped.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use tracing::{debug, warn};

use crate::queue::{
    error::QueueResult,
    types::{QueueConfig, ReceivedMessage},
    MessageQueue,
};

/// SQS queue drained by the digest worker
pub struct SqsQueue {
    sqs_client: Arc<SqsClient>,
    config: QueueConfig,
}

impl SqsQueue {
    /// Creates a new SQS queue
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `config` - Queue configuration including URL and default parameters
    #[must_use]
    pub const fn new(sqs_client: Arc<SqsClient>, config: QueueConfig) -> Self {
        Self { sqs_client, config }
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn receive_batch(&self) -> QueueResult<Vec<ReceivedMessage>> {
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(self.config.default_max_messages)
            .visibility_timeout(self.config.default_visibility_timeout)
            .wait_time_seconds(self.config.default_wait_time_seconds)
            .send()
            .await?;

        let messages: Vec<ReceivedMessage> = result
            .messages()
            .iter()
            .filter_map(|msg| {
                let message_id = msg.message_id().unwrap_or_default().to_string();
                let Some(receipt_handle) = msg.receipt_handle() else {
                    warn!(
                        message_id = %message_id,
                        "Received message without receipt handle, skipping"
                    );
                    return None;
                };

                Some(ReceivedMessage {
                    message_id,
                    receipt_handle: receipt_handle.to_string(),
                    body: msg.body().unwrap_or_default().to_string(),
                })
            })
            .collect();

        debug!(
            "Received {} messages from {}",
            messages.len(),
            self.config.queue_url
        );

        Ok(messages)
    }

    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        self.sqs_client
            .delete_message()
            .queue_url(&self.config.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }
}
