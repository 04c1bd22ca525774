//! Remote resource access
//!
//! The [`Fetch`] trait is the seam between the crate and the HTTP stack. The
//! default [`HttpFetcher`] uses `reqwest`; tests substitute their own implementation
//! or point the default one at a mock server. The policy layer in [`remote`] adds
//! protocol-relative fallback, probing and error-response handling on top.

pub mod http;
pub mod remote;

pub use http::HttpFetcher;
pub use remote::{fetch_body, probe};

use reqwest::Method;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Request parameters handed to a [`Fetch`] implementation
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            timeout: None,
        }
    }
}

/// Response of a completed request, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    #[must_use]
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}

/// Transport-level failure: no response was received
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// Type alias for fetch futures
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FetchResponse, FetchError>> + Send + 'a>>;

/// HTTP collaborator
///
/// Implementations return `Ok` for every response that arrived, including error
/// statuses, and `Err` only when the transport failed.
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str, request: &'a FetchRequest) -> FetchFuture<'a>;
}
