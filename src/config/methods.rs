//! Derived values and helpers on `CriticalConfig`

use base64::Engine;
use reqwest::Method;

use super::types::CriticalConfig;
use crate::fetch::FetchRequest;
use crate::locator::{is_remote, resolve_against};
use crate::utils::DEFAULT_USER_AGENT;

impl CriticalConfig {
    /// Request parameters for a fetch with `method`
    ///
    /// Carries the user agent, basic-auth credentials and configured extra headers.
    #[must_use]
    pub fn fetch_request(&self, method: Method) -> FetchRequest {
        let mut headers = Vec::with_capacity(self.request.headers.len() + 2);
        headers.push((
            "User-Agent".to_string(),
            self.user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        ));

        if let (Some(user), Some(pass)) = (&self.user, &self.pass) {
            let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
            headers.push(("Authorization".to_string(), format!("Basic {token}")));
        }

        headers.extend(self.request.headers.iter().cloned());

        FetchRequest {
            method,
            headers,
            timeout: self.request.timeout,
        }
    }

    /// Base resolved against the working directory; `None` for remote or missing bases
    #[must_use]
    pub fn absolute_base(&self) -> Option<String> {
        self.base
            .as_deref()
            .filter(|base| !is_remote(base))
            .map(|base| resolve_against(&self.cwd, base))
    }

    /// True when stylesheets come from the explicit `css` option
    #[must_use]
    pub fn has_css_option(&self) -> bool {
        !self.css.is_empty()
    }

    /// Report a non-fatal problem to the configured diagnostics sink
    pub fn warn(&self, message: &str) {
        self.diagnostics.warn(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(request: &'a FetchRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn fetch_request_carries_credentials_and_agent() {
        let config = CriticalConfig::builder()
            .user("aladdin")
            .pass("opensesame")
            .user_agent("critical-test")
            .header("X-Extra", "1")
            .build()
            .unwrap();

        let request = config.fetch_request(Method::GET);
        assert_eq!(header(&request, "User-Agent"), Some("critical-test"));
        assert_eq!(
            header(&request, "Authorization"),
            Some("Basic YWxhZGRpbjpvcGVuc2VzYW1l")
        );
        assert_eq!(header(&request, "X-Extra"), Some("1"));
        assert_eq!(request.method, Method::GET);
    }

    #[test]
    fn default_user_agent_without_credentials() {
        let config = CriticalConfig::builder().build().unwrap();
        let request = config.fetch_request(Method::HEAD);
        assert_eq!(header(&request, "User-Agent"), Some(DEFAULT_USER_AGENT));
        assert!(header(&request, "Authorization").is_none());
    }

    #[test]
    fn absolute_base_resolves_relative_and_skips_remote() {
        let config = CriticalConfig::builder()
            .cwd("/work")
            .base("site/public")
            .build()
            .unwrap();
        assert_eq!(config.absolute_base().as_deref(), Some("/work/site/public"));

        let config = CriticalConfig::builder()
            .base("https://x.test/")
            .build()
            .unwrap();
        assert!(config.absolute_base().is_none());
    }
}
