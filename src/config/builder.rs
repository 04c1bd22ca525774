//! Builder for `CriticalConfig`
//!
//! Collects options fluently and validates them once in `build()`, resolving the
//! working directory and installing default collaborators.

use reqwest::Method;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::types::{CriticalConfig, RebaseDirective, RequestOptions};
use crate::diagnostics::{DiagnosticsHandle, LogDiagnostics};
use crate::error::{AssetError, AssetResult};
use crate::fetch::{Fetch, HttpFetcher};
use crate::locator::normalize_lexically;

#[derive(Clone, Default)]
pub struct CriticalConfigBuilder {
    pub(crate) base: Option<String>,
    pub(crate) css: Vec<String>,
    pub(crate) rebase: RebaseDirective,
    pub(crate) asset_paths: Vec<String>,
    pub(crate) strict: bool,
    pub(crate) user: Option<String>,
    pub(crate) pass: Option<String>,
    pub(crate) user_agent: Option<String>,
    pub(crate) request: RequestOptions,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) fetcher: Option<Arc<dyn Fetch>>,
    pub(crate) diagnostics: Option<DiagnosticsHandle>,
}

impl CriticalConfig {
    #[must_use]
    pub fn builder() -> CriticalConfigBuilder {
        CriticalConfigBuilder::default()
    }
}

impl CriticalConfigBuilder {
    #[must_use]
    pub fn base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.base = if base.is_empty() { None } else { Some(base) };
        self
    }

    /// Explicit stylesheet list; entries may be globs, local paths or URLs
    #[must_use]
    pub fn css<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css = patterns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn rebase(mut self, rebase: RebaseDirective) -> Self {
        self.rebase = rebase;
        self
    }

    #[must_use]
    pub fn asset_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn pass(mut self, pass: impl Into<String>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Method used for existence probes
    #[must_use]
    pub fn probe_method(mut self, method: Method) -> Self {
        self.request.method = Some(method);
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn request(mut self, request: RequestOptions) -> Self {
        self.request = request;
        self
    }

    /// Working directory for relative paths; defaults to the process working directory
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    #[must_use]
    pub fn diagnostics(mut self, diagnostics: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Validate the collected options and build the config
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Config`] for credentials without a counterpart or an
    /// incomplete rebase pair, and [`AssetError::Io`] if the process working
    /// directory cannot be determined.
    pub fn build(self) -> AssetResult<CriticalConfig> {
        if self.user.is_some() != self.pass.is_some() {
            return Err(AssetError::Config(
                "'user' and 'pass' must be provided together".to_string(),
            ));
        }

        if let RebaseDirective::Pair { from, to } = &self.rebase
            && (from.is_empty() || to.is_empty())
        {
            return Err(AssetError::Config(
                "rebase requires both 'from' and 'to'".to_string(),
            ));
        }

        let process_cwd = || std::env::current_dir().map_err(|e| AssetError::io(".", e));
        let cwd = match self.cwd {
            Some(cwd) if cwd.is_absolute() => cwd,
            Some(cwd) => process_cwd()?.join(cwd),
            None => process_cwd()?,
        };
        let cwd = PathBuf::from(normalize_lexically(&cwd.to_string_lossy()));

        Ok(CriticalConfig {
            base: self.base,
            css: self.css,
            rebase: self.rebase,
            asset_paths: self.asset_paths,
            strict: self.strict,
            user: self.user,
            pass: self.pass,
            user_agent: self.user_agent,
            request: self.request,
            cwd,
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Arc::new(HttpFetcher::new())),
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Arc::new(LogDiagnostics)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CriticalConfig::builder().cwd("/work").build().unwrap();
        assert!(config.base().is_none());
        assert!(config.css().is_empty());
        assert!(matches!(config.rebase(), RebaseDirective::Infer));
        assert!(!config.strict());
        assert_eq!(config.cwd(), std::path::Path::new("/work"));
    }

    #[test]
    fn rejects_user_without_pass() {
        let err = CriticalConfig::builder().user("me").build().unwrap_err();
        assert!(matches!(err, AssetError::Config(_)));
    }

    #[test]
    fn rejects_incomplete_rebase_pair() {
        let err = CriticalConfig::builder()
            .rebase(RebaseDirective::pair("/a/style.css", ""))
            .build()
            .unwrap_err();
        assert!(matches!(err, AssetError::Config(_)));
    }

    #[test]
    fn empty_base_means_no_base() {
        let config = CriticalConfig::builder().base("").build().unwrap();
        assert!(config.base().is_none());
    }

    #[test]
    fn relative_cwd_is_made_absolute() {
        let config = CriticalConfig::builder().cwd("fixtures/site").build().unwrap();
        assert!(config.cwd().is_absolute());
        assert!(config.cwd().ends_with("fixtures/site"));
    }
}
