use std::io::Write;

use crate::types::{DigestRecord, DigestResult};

/// Writes a set of records in one digest encoding
pub trait DigestEncoder: Send + Sync {
    /// File extension, without the leading dot
    fn extension(&self) -> &'static str;

    /// MIME type stored alongside the uploaded object
    fn content_type(&self) -> &'static str;

    /// Writes every record to `writer`, in order
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded or written
    fn encode(&self, records: &[DigestRecord], writer: &mut dyn Write) -> DigestResult<()>;
}

/// CSV with a `MessageId,Subject,Message,Timestamp` header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEncoder;

impl DigestEncoder for CsvEncoder {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn content_type(&self) -> &'static str {
        "text/csv"
    }

    fn encode(&self, records: &[DigestRecord], writer: &mut dyn Write) -> DigestResult<()> {
        // Header is written by hand so an empty digest still carries it
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(DigestRecord::FIELDS)?;
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;

        Ok(())
    }
}

/// JSON-lines, one object per record
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesEncoder;

impl DigestEncoder for JsonLinesEncoder {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/x-ndjson"
    }

    fn encode(&self, records: &[DigestRecord], writer: &mut dyn Write) -> DigestResult<()> {
        for record in records {
            serde_json::to_writer(&mut *writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn records() -> Vec<DigestRecord> {
        vec![
            DigestRecord {
                message_id: "m1".to_string(),
                subject: "S".to_string(),
                message: "Hello".to_string(),
                timestamp: "t1".to_string(),
            },
            DigestRecord {
                message_id: "m2".to_string(),
                subject: "Alert, urgent".to_string(),
                message: "line one\n\"quoted\"".to_string(),
                timestamp: "t2".to_string(),
            },
        ]
    }

    fn encode(encoder: &dyn DigestEncoder) -> String {
        let mut buffer = Vec::new();
        encoder
            .encode(&records(), &mut buffer)
            .expect("Failed to encode records");
        String::from_utf8(buffer).expect("Encoded digest is not UTF-8")
    }

    #[test]
    fn test_csv_header_and_rows() {
        let encoded = encode(&CsvEncoder);

        assert_eq!(
            encoded,
            "MessageId,Subject,Message,Timestamp\n\
             m1,S,Hello,t1\n\
             m2,\"Alert, urgent\",\"line one\n\"\"quoted\"\"\",t2\n"
        );
    }

    #[test]
    fn test_csv_reads_back_through_csv_reader() {
        let encoded = encode(&CsvEncoder);
        let mut reader = csv::Reader::from_reader(encoded.as_bytes());

        let headers = reader.headers().expect("Missing header row").clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), DigestRecord::FIELDS);

        let parsed: Vec<DigestRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("Failed to read rows");
        assert_eq!(parsed, records());
    }

    #[test]
    fn test_csv_without_records_keeps_header() {
        let mut buffer = Vec::new();
        CsvEncoder
            .encode(&[], &mut buffer)
            .expect("Failed to encode records");
        assert_eq!(buffer, b"MessageId,Subject,Message,Timestamp\n");
    }

    #[test]
    fn test_json_lines_one_object_per_record() {
        let encoded = encode(&JsonLinesEncoder);
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(lines.len(), 2);

        for (line, expected) in lines.iter().zip(records()) {
            let value: serde_json::Value = serde_json::from_str(line).expect("Invalid JSON line");
            let object = value.as_object().expect("Line is not an object");
            let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, ["Message", "MessageId", "Subject", "Timestamp"]);
            assert_eq!(object["MessageId"], expected.message_id.as_str());
            assert_eq!(object["Message"], expected.message.as_str());
        }
    }
}
