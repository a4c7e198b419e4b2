use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

use super::DigestEncoder;
use crate::types::{DigestRecord, DigestResult};

/// A digest file written to scratch storage.
///
/// The local file is named after the object key and is removed when the
/// artifact is dropped.
#[derive(Debug)]
pub struct DigestArtifact {
    key: String,
    content_type: &'static str,
    file: NamedTempFile,
}

impl DigestArtifact {
    /// Encodes `records` into a fresh `<uuid>.<ext>` file inside `scratch_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or a record cannot be encoded
    pub fn write(
        records: &[DigestRecord],
        encoder: &dyn DigestEncoder,
        scratch_dir: &Path,
    ) -> DigestResult<Self> {
        let stem = Uuid::new_v4().to_string();
        let suffix = format!(".{}", encoder.extension());

        let file = tempfile::Builder::new()
            .prefix(&stem)
            .suffix(&suffix)
            .rand_bytes(0)
            .tempfile_in(scratch_dir)?;

        {
            let mut writer = BufWriter::new(file.as_file());
            encoder.encode(records, &mut writer)?;
            writer.flush()?;
        }

        let key = format!("{stem}{suffix}");
        debug!(
            key = %key,
            records = records.len(),
            path = %file.path().display(),
            "Wrote digest file"
        );

        Ok(Self {
            key,
            content_type: encoder.content_type(),
            file,
        })
    }

    /// Object key the digest is uploaded under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Local path of the digest file
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }
}
