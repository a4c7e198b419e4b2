pub mod environment;
pub mod error;
pub mod record;

pub use environment::Environment;
pub use error::{DigestError, DigestResult};
pub use record::{DigestRecord, DispatchDecision};
