//! Reference classification
//!
//! Classification is derived from the reference text alone and computed once into a
//! [`Reference`], so every call site sees the same answer for the same string.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use url::Url;

use super::paths::is_absolute_path;
use crate::error::{AssetError, AssetResult};
use crate::utils::PLACEHOLDER_ORIGIN;

lazy_static! {
    // Hardcoded, syntactically valid patterns; a parse failure is a compile-time bug.
    static ref REMOTE_PATTERN: Regex =
        Regex::new(r"(^//)|(://)").expect("BUG: hardcoded remote pattern is invalid");
    static ref SCHEME_PATTERN: Regex =
        Regex::new(r"^\w[\w+.-]*://").expect("BUG: hardcoded scheme pattern is invalid");
}

/// A classified address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// `/var/www/site/index.html`, `C:\site\index.html`
    AbsoluteLocal(String),
    /// `css/site.css`, `../shared/site.css`, `file://` references
    RelativeLocal(String),
    /// `https://cdn.test/site.css`
    AbsoluteUrl(String),
    /// `//cdn.test/site.css`
    ProtocolRelative(String),
}

impl Reference {
    /// Classify `raw`
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let owned = raw.to_string();
        if !raw.starts_with("file:") && REMOTE_PATTERN.is_match(raw) {
            if raw.starts_with("//") {
                Reference::ProtocolRelative(owned)
            } else {
                Reference::AbsoluteUrl(owned)
            }
        } else if is_absolute_path(raw) {
            Reference::AbsoluteLocal(owned)
        } else {
            Reference::RelativeLocal(owned)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Reference::AbsoluteLocal(s)
            | Reference::RelativeLocal(s)
            | Reference::AbsoluteUrl(s)
            | Reference::ProtocolRelative(s) => s,
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Reference::AbsoluteUrl(_) | Reference::ProtocolRelative(_)
        )
    }

    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self, Reference::RelativeLocal(_))
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        !self.is_remote()
    }

    /// Empty references stand for "no reference"
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Reference {
    fn from(raw: &str) -> Self {
        Reference::classify(raw)
    }
}

/// True iff `reference` starts with `//` or contains `scheme://`, and is not a `file:` reference
#[must_use]
pub fn is_remote(reference: &str) -> bool {
    Reference::classify(reference).is_remote()
}

/// True iff `reference` is neither remote nor an absolute local path
#[must_use]
pub fn is_relative(reference: &str) -> bool {
    Reference::classify(reference).is_relative()
}

/// Parsed form of a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReference {
    /// Absolute or protocol-relative URL. Protocol-relative references are parsed
    /// against a placeholder origin; only their host and path are meaningful.
    Url { url: Url, protocol_relative: bool },
    /// Anything that is not a URL; only the pathname is known
    Path { pathname: String },
}

impl ParsedReference {
    #[must_use]
    pub fn pathname(&self) -> &str {
        match self {
            ParsedReference::Url { url, .. } => url.path(),
            ParsedReference::Path { pathname } => pathname,
        }
    }

    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        match self {
            ParsedReference::Url { url, .. } => Some(url),
            ParsedReference::Path { .. } => None,
        }
    }

    #[must_use]
    pub fn is_protocol_relative(&self) -> bool {
        matches!(
            self,
            ParsedReference::Url {
                protocol_relative: true,
                ..
            }
        )
    }

    /// Serialized form. Protocol-relative URLs keep their missing scheme.
    #[must_use]
    pub fn href(&self) -> String {
        match self {
            ParsedReference::Url {
                url,
                protocol_relative: true,
            } => strip_scheme(url.as_str()).to_string(),
            ParsedReference::Url { url, .. } => url.to_string(),
            ParsedReference::Path { pathname } => pathname.clone(),
        }
    }
}

/// Parse `reference` into URL parts when it is a URL, or a bare pathname otherwise
pub fn parse(reference: &str) -> AssetResult<ParsedReference> {
    if SCHEME_PATTERN.is_match(reference) {
        let url = Url::parse(reference).map_err(|_| AssetError::InvalidUrl(reference.into()))?;
        return Ok(ParsedReference::Url {
            url,
            protocol_relative: false,
        });
    }

    if reference.starts_with("//") {
        let url = Url::parse(PLACEHOLDER_ORIGIN)
            .and_then(|origin| origin.join(reference))
            .map_err(|_| AssetError::InvalidUrl(reference.into()))?;
        return Ok(ParsedReference::Url {
            url,
            protocol_relative: true,
        });
    }

    Ok(ParsedReference::Path {
        pathname: reference.to_string(),
    })
}

pub(crate) fn strip_scheme(href: &str) -> &str {
    match href.find("//") {
        Some(idx) if href[..idx].ends_with(':') => &href[idx..],
        _ => href,
    }
}
