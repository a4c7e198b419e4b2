//! Storage services for the SNS digest worker
//!
//! This crate wraps the three AWS services the digest worker talks to:
//! the SQS queue it drains, the S3 bucket holding digest files and the
//! SNS topic notifications are published to. Each service sits behind a
//! small async trait so the worker can be exercised without AWS.

pub mod bucket;
pub mod queue;
pub mod topic;
