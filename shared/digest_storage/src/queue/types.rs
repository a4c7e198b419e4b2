/// A message as delivered by the queue, body left unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    /// Queue-assigned message ID
    pub message_id: String,
    /// Receipt handle for acknowledging this delivery
    pub receipt_handle: String,
    /// Raw message body
    pub body: String,
}

/// Configuration for queue operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Queue URL
    pub queue_url: String,
    /// Default maximum number of messages to retrieve
    pub default_max_messages: i32,
    /// Default visibility timeout for messages (in seconds)
    pub default_visibility_timeout: i32,
    /// Default wait time for long polling
    pub default_wait_time_seconds: i32,
}

impl QueueConfig {
    /// Largest batch SQS hands out per receive call
    pub const MAX_BATCH_SIZE: i32 = 10;

    /// Creates a config for draining `queue_url` in batches of ten
    #[must_use]
    pub fn for_draining(queue_url: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            default_max_messages: Self::MAX_BATCH_SIZE,
            default_visibility_timeout: 30,
            default_wait_time_seconds: 1,
        }
    }
}
