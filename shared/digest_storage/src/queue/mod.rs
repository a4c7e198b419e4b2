//! Queue operations for the digest worker
//!
//! This module provides functionality for draining an AWS SQS queue that
//! is subscribed to an SNS topic.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Error types for queue operations
pub mod error;
/// SQS backed queue implementation
pub mod sqs_queue;
/// Common types for queue operations
pub mod types;

use async_trait::async_trait;

pub use error::{QueueError, QueueResult};
pub use sqs_queue::SqsQueue;
pub use types::{QueueConfig, ReceivedMessage};

/// A queue that hands out batches of messages and accepts acknowledgements
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Receives the next batch of messages.
    ///
    /// An empty batch means the queue had nothing to deliver.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the receive operation fails
    async fn receive_batch(&self) -> QueueResult<Vec<ReceivedMessage>>;

    /// Acknowledges a delivery by deleting it from the queue
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the delete operation fails
    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()>;
}
