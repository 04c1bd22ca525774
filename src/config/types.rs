//! Core configuration types
//!
//! `CriticalConfig` carries the options recognised by every operation in the
//! crate, together with the injected collaborators (fetcher, diagnostics sink).

use reqwest::Method;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::diagnostics::DiagnosticsHandle;
use crate::fetch::Fetch;
use crate::stylesheet::RebaseAsset;

/// Signature of a caller-provided asset rewrite
///
/// Returning `None` keeps the asset reference unchanged.
pub type RebaseFn = dyn Fn(&RebaseAsset) -> Option<String> + Send + Sync;

/// Shareable handle to a [`RebaseFn`]
#[derive(Clone)]
pub struct RebaseTransform(pub(crate) Arc<RebaseFn>);

impl RebaseTransform {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&RebaseAsset) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(transform))
    }

    #[must_use]
    pub fn apply(&self, asset: &RebaseAsset) -> Option<String> {
        (self.0)(asset)
    }
}

impl fmt::Debug for RebaseTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RebaseTransform(..)")
    }
}

/// How asset references inside stylesheets are rewritten
#[derive(Debug, Clone, Default)]
pub enum RebaseDirective {
    /// Leave stylesheet contents untouched
    Disabled,
    /// Resolve every asset against `from` and re-root it relative to `to`
    Pair { from: String, to: String },
    /// Let the caller decide the replacement for every asset
    Transform(RebaseTransform),
    /// Derive source and target from stylesheet and document virtual paths
    #[default]
    Infer,
}

impl RebaseDirective {
    #[must_use]
    pub fn pair(from: impl Into<String>, to: impl Into<String>) -> Self {
        RebaseDirective::Pair {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn transform<F>(transform: F) -> Self
    where
        F: Fn(&RebaseAsset) -> Option<String> + Send + Sync + 'static,
    {
        RebaseDirective::Transform(RebaseTransform::new(transform))
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, RebaseDirective::Disabled)
    }

    /// `(from, to)` when an explicit pair is configured
    #[must_use]
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        match self {
            RebaseDirective::Pair { from, to } => Some((from, to)),
            _ => None,
        }
    }
}

/// Fetch customisation
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Method used for existence probes (HEAD when unset)
    pub method: Option<Method>,
    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,
    /// Per-request timeout; no timeout when unset
    pub timeout: Option<Duration>,
}

/// Main configuration struct
#[derive(Clone)]
pub struct CriticalConfig {
    /// Declared project root
    pub(crate) base: Option<String>,
    /// Explicit stylesheet globs; bypasses hrefs extracted from the document
    pub(crate) css: Vec<String>,
    pub(crate) rebase: RebaseDirective,
    /// Extra search roots
    pub(crate) asset_paths: Vec<String>,
    /// Fail on unresolved remote stylesheets instead of degrading to empty content
    pub(crate) strict: bool,
    pub(crate) user: Option<String>,
    pub(crate) pass: Option<String>,
    pub(crate) user_agent: Option<String>,
    pub(crate) request: RequestOptions,

    /// Working directory used for every relative local path.
    ///
    /// **INVARIANT:** Always an absolute path (resolved in builder).
    pub(crate) cwd: PathBuf,

    pub(crate) fetcher: Arc<dyn Fetch>,
    pub(crate) diagnostics: DiagnosticsHandle,
}

impl fmt::Debug for CriticalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriticalConfig")
            .field("base", &self.base)
            .field("css", &self.css)
            .field("rebase", &self.rebase)
            .field("asset_paths", &self.asset_paths)
            .field("strict", &self.strict)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent)
            .field("request", &self.request)
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}
