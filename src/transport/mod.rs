// src/transport/mod.rs

pub mod http_transport;
#[cfg(any(test, feature = "testkit"))]
pub mod mock;

use crate::error::Result;

pub use http_transport::HttpTransport;
#[cfg(any(test, feature = "testkit"))]
pub use mock::MockTransport;

/// Issues GET requests against the random.org host.
///
/// `path` is relative to the configured base URL (e.g. `/integers/`) and the
/// query pairs are appended in order. Implementations return the response body
/// or the failure that prevented reading it.
pub trait Transport {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String>;
}
