//! Digest file construction
//!
//! A digest bundles several notification records into a single file. The
//! configured [`DigestFormat`] picks a [`DigestEncoder`]; the encoder writes
//! a [`DigestArtifact`] into scratch storage, where it lives until upload
//! completes and the artifact is dropped.

mod artifact;
mod encoder;
mod format;

pub use artifact::DigestArtifact;
pub use encoder::{CsvEncoder, DigestEncoder, JsonLinesEncoder};
pub use format::{DigestFormat, UnknownDigestFormat};
