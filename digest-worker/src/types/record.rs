//! Records carried by queued SNS notifications

use serde::{Deserialize, Serialize};

/// The four fields of an SNS notification that end up in a digest.
///
/// Deserialized from the SNS envelope delivered to the queue; every other
/// envelope key (`Type`, `TopicArn`, `Signature`, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DigestRecord {
    pub message_id: String,
    pub subject: String,
    pub message: String,
    pub timestamp: String,
}

impl DigestRecord {
    /// Column order used by every digest encoding
    pub const FIELDS: [&'static str; 4] = ["MessageId", "Subject", "Message", "Timestamp"];

    /// Parses a raw queue message body
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON or lacks one of the four fields
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

/// What a single invocation does with its deduplicated records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchDecision {
    /// Nothing was pending
    Nothing,
    /// Exactly one record, forwarded as is
    Passthrough(DigestRecord),
    /// Several records, bundled into a digest file
    Digest(Vec<DigestRecord>),
}

impl From<Vec<DigestRecord>> for DispatchDecision {
    fn from(mut records: Vec<DigestRecord>) -> Self {
        match records.len() {
            0 => Self::Nothing,
            1 => records.pop().map_or(Self::Nothing, Self::Passthrough),
            _ => Self::Digest(records),
        }
    }
}
