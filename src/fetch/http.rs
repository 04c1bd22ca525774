//! `reqwest`-backed [`Fetch`] implementation

use reqwest::Client;

use super::{Fetch, FetchError, FetchFuture, FetchRequest, FetchResponse};

/// Default HTTP client
///
/// Redirects are followed by `reqwest`. Client already uses Arc internally, so
/// cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str, request: &'a FetchRequest) -> FetchFuture<'a> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method.clone(), url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| FetchError(format!("request to {url} failed: {e}")))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError(format!("failed to read body of {url}: {e}")))?;

            Ok(FetchResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}
