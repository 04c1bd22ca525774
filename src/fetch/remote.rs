//! Fetch policy: protocol-relative fallback, probing, error-response bodies

use log::{debug, trace};
use reqwest::Method;

use super::{Fetch, FetchError, FetchRequest, FetchResponse};
use crate::config::CriticalConfig;
use crate::error::{AssetError, AssetResult};

/// Fetch the full body of a remote reference
///
/// A response with an error status still yields its body. Only transport failures
/// are reported as [`AssetError::Http`].
pub async fn fetch_body(reference: &str, config: &CriticalConfig) -> AssetResult<Vec<u8>> {
    let request = config.fetch_request(Method::GET);
    debug!(target: "critical::fetch", "Fetching resource: {reference}");

    match fetch_with_fallback(reference, &request, config.fetcher()).await {
        Ok(response) => {
            if response.is_error_status() {
                debug!(
                    target: "critical::fetch",
                    "{reference} returned status {}, using error response body",
                    response.status
                );
            }
            Ok(response.body)
        }
        Err(FetchError(message)) => {
            debug!(target: "critical::fetch", "{reference} failed: {message}");
            Err(AssetError::Http {
                url: reference.to_string(),
                message,
            })
        }
    }
}

/// Check that a remote reference answers with a status below 400
///
/// Uses the configured request method, HEAD by default. Never fails.
pub async fn probe(reference: &str, config: &CriticalConfig) -> bool {
    let method = config.request().method.clone().unwrap_or(Method::HEAD);
    let request = config.fetch_request(method);

    match fetch_with_fallback(reference, &request, config.fetcher()).await {
        Ok(response) => {
            trace!(target: "critical::fetch", "probe {reference}: {}", response.status);
            !response.is_error_status()
        }
        Err(FetchError(message)) => {
            trace!(target: "critical::fetch", "probe {reference} failed: {message}");
            false
        }
    }
}

/// Protocol-relative references are tried over https first, then once over http
async fn fetch_with_fallback(
    reference: &str,
    request: &FetchRequest,
    fetcher: &dyn Fetch,
) -> Result<FetchResponse, FetchError> {
    if !reference.starts_with("//") {
        return fetcher.fetch(reference, request).await;
    }

    let secure = format!("https:{reference}");
    match fetcher.fetch(&secure, request).await {
        Ok(response) if !response.is_error_status() => return Ok(response),
        Ok(response) => debug!(
            target: "critical::fetch",
            "{secure} returned status {} - trying again over http",
            response.status
        ),
        Err(FetchError(message)) => {
            debug!(target: "critical::fetch", "{message} - trying again over http")
        }
    }

    let insecure = format!("http:{reference}");
    fetcher.fetch(&insecure, request).await
}
