//! In-memory stand-ins for the queue, topic and bucket
//!
//! Only compiled for tests and with the `test-utils` feature.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use digest_storage::{
    bucket::{BucketError, BucketResult, ObjectStore, PresignedUrl},
    queue::{MessageQueue, QueueConfig, QueueResult, ReceivedMessage},
    topic::{TopicError, TopicPublisher, TopicResult},
};
use serde_json::json;

use crate::types::DigestRecord;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builds a record with the given ID and fixed subject, message and timestamp
#[must_use]
pub fn record(message_id: &str) -> DigestRecord {
    DigestRecord {
        message_id: message_id.to_string(),
        subject: format!("Subject {message_id}"),
        message: format!("Message {message_id}"),
        timestamp: "2024-01-01T12:00:00.000Z".to_string(),
    }
}

/// Wraps a record in the SNS envelope an SQS subscription delivers
#[must_use]
pub fn sns_body(record: &DigestRecord) -> String {
    json!({
        "Type": "Notification",
        "MessageId": record.message_id,
        "TopicArn": "arn:aws:sns:us-east-1:000000000000:alerts",
        "Subject": record.subject,
        "Message": record.message,
        "Timestamp": record.timestamp,
        "SignatureVersion": "1",
    })
    .to_string()
}

/// A queue delivery carrying `body`, with a receipt handle unique to `delivery_id`
#[must_use]
pub fn delivery(delivery_id: &str, body: String) -> ReceivedMessage {
    ReceivedMessage {
        message_id: delivery_id.to_string(),
        receipt_handle: format!("receipt-{delivery_id}"),
        body,
    }
}

/// Queue that hands out pre-loaded batches and records acknowledgements
#[derive(Debug, Default)]
pub struct InMemoryQueue {
    batches: Mutex<VecDeque<Vec<ReceivedMessage>>>,
    acked: Mutex<Vec<String>>,
    receive_calls: AtomicUsize,
}

impl InMemoryQueue {
    /// Queue that returns `batches` in order, then empty batches
    #[must_use]
    pub fn with_batches(batches: Vec<Vec<ReceivedMessage>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    /// Queue holding one delivery per record, handed out ten at a time
    #[must_use]
    pub fn with_records(records: &[DigestRecord]) -> Self {
        let deliveries: Vec<ReceivedMessage> = records
            .iter()
            .enumerate()
            .map(|(i, record)| delivery(&format!("delivery-{i}"), sns_body(record)))
            .collect();

        Self::with_batches(
            deliveries
                .chunks(QueueConfig::MAX_BATCH_SIZE.unsigned_abs() as usize)
                .map(<[ReceivedMessage]>::to_vec)
                .collect(),
        )
    }

    /// Receipt handles acknowledged so far, in order
    #[must_use]
    pub fn acked(&self) -> Vec<String> {
        lock(&self.acked).clone()
    }

    /// Number of receive calls made
    #[must_use]
    pub fn receive_calls(&self) -> usize {
        self.receive_calls.load(Ordering::SeqCst)
    }

    /// Number of batches not yet handed out
    #[must_use]
    pub fn pending_batches(&self) -> usize {
        lock(&self.batches).len()
    }
}

#[async_trait]
impl MessageQueue for InMemoryQueue {
    async fn receive_batch(&self) -> QueueResult<Vec<ReceivedMessage>> {
        self.receive_calls.fetch_add(1, Ordering::SeqCst);
        Ok(lock(&self.batches).pop_front().unwrap_or_default())
    }

    async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        lock(&self.acked).push(receipt_handle.to_string());
        Ok(())
    }
}

/// A notification captured by [`RecordingTopic`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedNotification {
    pub subject: String,
    pub message: String,
}

/// Topic that records every publish
#[derive(Debug, Default)]
pub struct RecordingTopic {
    published: Mutex<Vec<PublishedNotification>>,
    reject: AtomicBool,
}

impl RecordingTopic {
    /// Topic that rejects every publish
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            reject: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Notifications published so far, in order
    #[must_use]
    pub fn published(&self) -> Vec<PublishedNotification> {
        lock(&self.published).clone()
    }
}

#[async_trait]
impl TopicPublisher for RecordingTopic {
    async fn publish(&self, subject: &str, message: &str) -> TopicResult<String> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(TopicError::Rejected("publish rejected by test topic".to_string()));
        }

        let mut published = lock(&self.published);
        published.push(PublishedNotification {
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(format!("published-{}", published.len()))
    }
}

/// An object captured by [`InMemoryObjectStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub body: Vec<u8>,
    /// Local path the object was uploaded from
    pub source: PathBuf,
}

/// Object store that keeps uploads in memory and signs fake URLs
#[derive(Debug)]
pub struct InMemoryObjectStore {
    bucket_name: String,
    objects: Mutex<BTreeMap<String, StoredObject>>,
    fail_uploads: AtomicBool,
    fail_presign: AtomicBool,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self {
            bucket_name: "sns-digest".to_string(),
            objects: Mutex::default(),
            fail_uploads: AtomicBool::new(false),
            fail_presign: AtomicBool::new(false),
        }
    }
}

impl InMemoryObjectStore {
    /// Store whose uploads always fail
    #[must_use]
    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Store whose presign calls always fail
    #[must_use]
    pub fn failing_presign() -> Self {
        Self {
            fail_presign: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Objects uploaded so far, keyed by object key
    #[must_use]
    pub fn objects(&self) -> BTreeMap<String, StoredObject> {
        lock(&self.objects).clone()
    }

    /// URL the store hands out for `key`
    #[must_use]
    pub fn url_for(&self, key: &str, expires_in: Duration) -> String {
        format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Expires={}&X-Amz-Signature=0000",
            self.bucket_name,
            key,
            expires_in.as_secs()
        )
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload_file(&self, key: &str, path: &Path, content_type: &str) -> BucketResult<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(BucketError::UpstreamError("upload failed in test store".to_string()));
        }

        let body = tokio::fs::read(path)
            .await
            .map_err(|e| BucketError::ReadSource(format!("{}: {e}", path.display())))?;

        lock(&self.objects).insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                body,
                source: path.to_path_buf(),
            },
        );
        Ok(())
    }

    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> BucketResult<PresignedUrl> {
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(BucketError::ConfigError("presign failed in test store".to_string()));
        }

        Ok(PresignedUrl {
            url: self.url_for(key, expires_in),
            expires_at: Utc::now() + expires_in,
        })
    }
}
