//! Error types for stylesheet and document resolution
//!
//! `FileNotFound` is the only lookup failure. Every other variant wraps a generic
//! transport, filesystem or parsing failure and is either propagated or folded into
//! a boolean/empty result by the call site.

use thiserror::Error;

/// Result type alias for asset operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Error types for asset resolution, loading and render-tree preparation
#[derive(Debug, Error)]
pub enum AssetError {
    /// The reference could not be resolved against any search path
    #[error("File not found: {reference} (searched: {})", format_search_paths(.search_paths))]
    FileNotFound {
        reference: String,
        search_paths: Vec<String>,
    },

    /// Remote fetch failed without producing a usable response
    #[error("Failed to fetch {url}: {message}")]
    Http { url: String, message: String },

    /// Filesystem operation failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reference looked like a URL but could not be parsed as one
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// Configuration rejected by the builder
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTML rewriting failed
    #[error("HTML processing failed: {0}")]
    Html(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for AssetError {
    fn from(error: anyhow::Error) -> Self {
        AssetError::Other(format!("{error:#}"))
    }
}

impl AssetError {
    /// Build a `FileNotFound` error for `reference`
    #[must_use]
    pub fn not_found(reference: impl Into<String>, search_paths: Vec<String>) -> Self {
        AssetError::FileNotFound {
            reference: reference.into(),
            search_paths,
        }
    }

    /// Wrap an IO error with the path it happened at
    #[must_use]
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        AssetError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Check if this is a lookup failure
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::FileNotFound { .. })
    }

    /// Search paths tried before giving up, if this is a lookup failure
    #[must_use]
    pub fn search_paths(&self) -> Option<&[String]> {
        match self {
            AssetError::FileNotFound { search_paths, .. } => Some(search_paths),
            _ => None,
        }
    }
}

fn format_search_paths(paths: &[String]) -> String {
    if paths.is_empty() {
        "<none>".to_string()
    } else {
        paths.join(", ")
    }
}
