use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::locator::ParsedReference;

/// A resolved document or stylesheet
///
/// `contents` of `None` stands for an absent resource, e.g. a remote stylesheet that
/// could not be resolved outside strict mode. `remote` is true exactly when
/// `url_obj` is set.
#[derive(Debug, Clone, Default)]
pub struct AssetDescriptor {
    pub(crate) contents: Option<Vec<u8>>,
    /// Path as the author wrote it, for local resources
    pub(crate) path: Option<String>,
    /// Path used for relative-URL arithmetic
    pub(crate) virtual_path: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) url_obj: Option<ParsedReference>,
    pub(crate) remote: bool,
    pub(crate) cwd: PathBuf,
    /// Locations the contents were read from, first entry is the resolved location
    pub(crate) history: Vec<String>,
    /// Raw stylesheet hrefs, documents only
    pub(crate) stylesheets: Vec<String>,
    /// Concatenated stylesheet text, documents only
    pub(crate) css: String,
}

impl AssetDescriptor {
    /// Descriptor for an in-memory HTML string; it has no path
    #[must_use]
    pub fn from_html(html: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            contents: Some(html.into().into_bytes()),
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    /// Descriptor for a local file read from `location`
    #[must_use]
    pub fn from_local(
        path: impl Into<String>,
        location: impl Into<String>,
        contents: Vec<u8>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            contents: Some(contents),
            path: Some(path.into()),
            cwd: cwd.into(),
            history: vec![location.into()],
            ..Self::default()
        }
    }

    /// Descriptor for a fetched remote resource
    #[must_use]
    pub fn from_remote(
        url: impl Into<String>,
        url_obj: ParsedReference,
        contents: Vec<u8>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        let url = url.into();
        Self {
            contents: Some(contents),
            virtual_path: Some(url_obj.pathname().to_string()),
            history: vec![url.clone()],
            url: Some(url),
            url_obj: Some(url_obj),
            remote: true,
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    /// Placeholder for a resource that could not be resolved
    #[must_use]
    pub fn empty(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_virtual_path(mut self, virtual_path: impl Into<String>) -> Self {
        self.virtual_path = Some(virtual_path.into());
        self
    }

    #[must_use]
    pub fn with_stylesheets(mut self, stylesheets: Vec<String>) -> Self {
        self.stylesheets = stylesheets;
        self
    }

    /// True when there is no content at all
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.contents.as_ref().is_none_or(Vec::is_empty)
    }

    #[must_use]
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Contents as text, lossily decoded; empty for a null descriptor
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match &self.contents {
            Some(bytes) => String::from_utf8_lossy(bytes),
            None => Cow::Borrowed(""),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn virtual_path(&self) -> Option<&str> {
        self.virtual_path.as_deref()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn url_obj(&self) -> Option<&ParsedReference> {
        self.url_obj.as_ref()
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.remote
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Where the contents were actually read from
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.history.first().map(String::as_str)
    }

    #[must_use]
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }
}
