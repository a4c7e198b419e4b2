//! Digest aggregation
//!
//! One invocation drains the queue, drops duplicate notifications and then
//! either forwards the single remaining notification or publishes a link to
//! a digest file holding all of them.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use digest_storage::{bucket::ObjectStore, queue::MessageQueue, topic::TopicPublisher};
use tracing::{debug, error, info, instrument};

use crate::digest::{DigestArtifact, DigestEncoder, DigestFormat};
use crate::types::{DigestError, DigestRecord, DigestResult, DispatchDecision};

/// Subject of every digest notification
pub const DIGEST_SUBJECT: &str = "Digest summary";

/// How long a digest download link stays valid (7 days)
pub const DIGEST_LINK_EXPIRY: Duration = Duration::from_secs(604_800);

/// Result of a single successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// Queue was empty
    Idle,
    /// A single notification was forwarded unchanged
    PassedThrough { message_id: String },
    /// A digest link was published
    DigestPublished { key: String, record_count: usize },
    /// The digest was built but could not be delivered
    DigestFailed { key: String },
}

/// Drains the queue and dispatches notifications or digests
pub struct DigestAggregator {
    queue: Arc<dyn MessageQueue>,
    topic: Arc<dyn TopicPublisher>,
    store: Arc<dyn ObjectStore>,
    encoder: &'static dyn DigestEncoder,
    scratch_dir: PathBuf,
}

impl DigestAggregator {
    /// Creates a new aggregator
    ///
    /// # Arguments
    ///
    /// * `queue` - Queue to drain
    /// * `topic` - Topic notifications and digest links are published to
    /// * `store` - Object store digest files are uploaded to
    /// * `format` - Encoding for digest files
    /// * `scratch_dir` - Directory digest files are written to before upload
    #[must_use]
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        topic: Arc<dyn TopicPublisher>,
        store: Arc<dyn ObjectStore>,
        format: DigestFormat,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            queue,
            topic,
            store,
            encoder: format.encoder(),
            scratch_dir,
        }
    }

    /// Runs one invocation: drain, deduplicate, dispatch
    ///
    /// # Errors
    ///
    /// Fails on queue errors, malformed messages, passthrough publish errors
    /// and local digest file errors. Digest delivery errors are logged only.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> DigestResult<InvocationOutcome> {
        let records = self.drain().await?;
        let received = records.len();

        let records = deduplicate(records);
        info!(received, unique = records.len(), "Drained queue");

        self.dispatch(records).await
    }

    /// Receives batches until the queue hands back an empty one.
    ///
    /// Each message is deleted as soon as its body parses, before the record
    /// is dispatched; a later failure does not return it to the queue.
    ///
    /// # Errors
    ///
    /// Returns `DigestError::MalformedMessage` for a body that is not a
    /// notification record (that message stays on the queue) and
    /// `DigestError::Queue` if a receive or delete fails.
    pub async fn drain(&self) -> DigestResult<Vec<DigestRecord>> {
        let mut records = Vec::new();

        loop {
            let batch = self.queue.receive_batch().await?;
            if batch.is_empty() {
                break;
            }
            debug!("Received batch of {} messages", batch.len());

            for message in batch {
                let record = DigestRecord::from_body(&message.body).map_err(|source| {
                    error!(
                        message_id = %message.message_id,
                        error = %source,
                        "Malformed queue message"
                    );
                    DigestError::MalformedMessage {
                        message_id: message.message_id.clone(),
                        source,
                    }
                })?;

                self.queue.ack_message(&message.receipt_handle).await?;
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Publishes nothing, a passthrough notification or a digest link
    ///
    /// # Errors
    ///
    /// Returns an error if the passthrough publish fails or the digest file
    /// cannot be written. Upload, presign and publish failures on the digest
    /// path are logged and reported as `InvocationOutcome::DigestFailed`.
    pub async fn dispatch(&self, records: Vec<DigestRecord>) -> DigestResult<InvocationOutcome> {
        match DispatchDecision::from(records) {
            DispatchDecision::Nothing => {
                debug!("No pending notifications");
                Ok(InvocationOutcome::Idle)
            }
            DispatchDecision::Passthrough(record) => {
                self.topic.publish(&record.subject, &record.message).await?;
                info!(message_id = %record.message_id, "Forwarded single notification");

                Ok(InvocationOutcome::PassedThrough {
                    message_id: record.message_id,
                })
            }
            DispatchDecision::Digest(records) => {
                let artifact = DigestArtifact::write(&records, self.encoder, &self.scratch_dir)?;
                let key = artifact.key().to_string();

                match self.deliver_digest(&artifact).await {
                    Ok(()) => {
                        info!(key = %key, records = records.len(), "Published digest");
                        Ok(InvocationOutcome::DigestPublished {
                            key,
                            record_count: records.len(),
                        })
                    }
                    Err(e) => {
                        error!(
                            key = %key,
                            error = %e,
                            upstream = e.is_upstream_error(),
                            "Failed to deliver digest"
                        );
                        Ok(InvocationOutcome::DigestFailed { key })
                    }
                }
            }
        }
    }

    #[instrument(skip_all, fields(key = %artifact.key()))]
    async fn deliver_digest(&self, artifact: &DigestArtifact) -> DigestResult<()> {
        self.store
            .upload_file(artifact.key(), artifact.path(), artifact.content_type())
            .await?;

        let presigned = self
            .store
            .presigned_get_url(artifact.key(), DIGEST_LINK_EXPIRY)
            .await?;
        debug!(expires_at = %presigned.expires_at, "Presigned digest link");

        self.topic.publish(DIGEST_SUBJECT, &presigned.url).await?;

        Ok(())
    }
}

/// Keeps the first record seen for each `MessageId`, preserving order
#[must_use]
pub fn deduplicate(records: Vec<DigestRecord>) -> Vec<DigestRecord> {
    let mut seen = HashSet::with_capacity(records.len());

    records
        .into_iter()
        .filter(|record| seen.insert(record.message_id.clone()))
        .collect()
}
