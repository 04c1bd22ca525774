//! Getter methods for `CriticalConfig`

use std::path::Path;

use super::types::{CriticalConfig, RebaseDirective, RequestOptions};
use crate::diagnostics::Diagnostics;
use crate::fetch::Fetch;

impl CriticalConfig {
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    #[must_use]
    pub fn css(&self) -> &[String] {
        &self.css
    }

    #[must_use]
    pub fn rebase(&self) -> &RebaseDirective {
        &self.rebase
    }

    #[must_use]
    pub fn asset_paths(&self) -> &[String] {
        &self.asset_paths
    }

    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    #[must_use]
    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    #[must_use]
    pub fn request(&self) -> &RequestOptions {
        &self.request
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[must_use]
    pub fn fetcher(&self) -> &dyn Fetch {
        self.fetcher.as_ref()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }
}
