#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod aggregator;
pub mod clients;
pub mod config;
pub mod digest;
pub mod health;
pub mod scheduler;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod types;
