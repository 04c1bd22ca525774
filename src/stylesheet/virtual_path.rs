use crate::asset::AssetDescriptor;
use crate::config::CriticalConfig;
use crate::locator::{
    dirname, is_absolute_path, is_relative, join_paths, normalize_path, relative_path, resolve,
    rooted, strip_query, to_filesystem_path,
};

/// Path of `stylesheet` used for rebase arithmetic
///
/// Remote stylesheets use their URL. With a local base the path is rooted at the
/// base. A relative path is placed next to the document (URL-resolved for remote
/// documents). Other stylesheets of a local document with a virtual path are rooted
/// at the document root, or keep a root-relative href as written when they resolved
/// outside it. Anything else falls back to the absolute location. The query string
/// is always dropped.
#[must_use]
pub fn compute_stylesheet_virtual_path(
    document: &AssetDescriptor,
    stylesheet: &AssetDescriptor,
    config: &CriticalConfig,
) -> Option<String> {
    if stylesheet.is_remote() {
        return stylesheet.url().map(|url| strip_query(url).to_string());
    }

    let path = stylesheet.path()?;
    let location = stylesheet
        .location()
        .map(str::to_string)
        .unwrap_or_else(|| to_filesystem_path(config.cwd(), path));
    let location = strip_query(&location);

    if let Some(base) = config.absolute_base() {
        return Some(rooted(&relative_path(config.cwd(), &base, location)));
    }

    let path = strip_query(path);
    if is_relative(path) {
        if document.is_remote()
            && let Some(url) = document.url()
        {
            return resolve(url, path).ok().map(|url| strip_query(&url).to_string());
        }
        if let Some(document_path) = document.virtual_path() {
            return Some(normalize_path(&join_paths(&dirname(document_path), path)));
        }
    }

    if !document.is_remote() && document.virtual_path().is_some() {
        let root = document.cwd().to_string_lossy();
        if location.starts_with(&format!("{}/", root.trim_end_matches('/'))) {
            return Some(rooted(&relative_path(config.cwd(), &root, location)));
        }
        if !config.has_css_option() && is_absolute_path(path) {
            return Some(normalize_path(path));
        }
    }

    Some(normalize_path(location))
}
