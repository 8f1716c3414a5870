// src/lib.rs

//! Client for the random.org true random number service.
//!
//! Integers are fetched over plain HTTP from the fixed domain `[-1e9, 1e9]`,
//! buffered, and rescaled into whatever bounds the caller asks for. Byte
//! strings and quota queries are built on the same calls.

pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod transport;

pub use client::{QuotaStatus, RandomOrgClient};
pub use config::{BufferConfig, ClientConfig};
pub use error::{RandomOrgError, Result};
pub use transport::{HttpTransport, Transport};
#[cfg(any(test, feature = "testkit"))]
pub use transport::MockTransport;
