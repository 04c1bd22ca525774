use log::debug;

use crate::asset::{AssetDescriptor, Source};
use crate::config::CriticalConfig;
use crate::locator::{
    dirname, is_relative, is_remote, join_paths, leading_hops, normalize_lexically, relative_path,
    resolve_against, rooted, strip_query,
};
use crate::resolver::{build_search_paths, resolve_reference};
use crate::utils::{BASE_WARNING, DIRECTORY_INDEX};

/// Path of `document` relative to its inferred project root
///
/// Remote documents use the URL path. In-memory documents have none. With a local
/// base the path is rooted at the base. Without one the root is guessed from the
/// stylesheet hrefs: the deepest `../` run of relative hrefs, or the directory an
/// absolute href resolves under. If neither works the working directory is used
/// and a warning is reported.
pub async fn compute_document_virtual_path(
    document: &AssetDescriptor,
    config: &CriticalConfig,
) -> Option<String> {
    if document.is_remote() {
        let pathname = document.url_obj()?.pathname();
        return Some(if pathname.ends_with('/') {
            format!("{pathname}{DIRECTORY_INDEX}")
        } else {
            pathname.to_string()
        });
    }

    let location = document.location()?;
    let cwd = config.cwd();

    if let Some(base) = config.absolute_base() {
        return Some(rooted(&relative_path(cwd, &base, location)));
    }

    let local_hrefs: Vec<&str> = document
        .stylesheets()
        .iter()
        .map(String::as_str)
        .filter(|href| !is_remote(href))
        .collect();

    let deepest = local_hrefs
        .iter()
        .filter(|href| is_relative(href))
        .map(|href| leading_hops(&normalize_lexically(strip_query(href))).0)
        .max();
    if let Some(hops) = deepest {
        let root = join_paths(&dirname(location), &"../".repeat(hops));
        return Some(rooted(&relative_path(cwd, &root, location)));
    }

    if let Some(href) = local_hrefs.first() {
        if let Some(root) = root_from_absolute_href(document, href, config).await {
            return Some(rooted(&relative_path(cwd, &root, location)));
        }
        debug!(target: "critical::document", "could not resolve {href} to infer the root");
    }

    config.warn(BASE_WARNING);
    Some(rooted(&relative_path(cwd, &cwd.to_string_lossy(), location)))
}

/// Directory an absolute href resolves under: the resolved location minus the href
async fn root_from_absolute_href(
    document: &AssetDescriptor,
    href: &str,
    config: &CriticalConfig,
) -> Option<String> {
    let search_paths = build_search_paths(document, &Source::from(href), config, true).await;
    let found = resolve_reference(href, &search_paths, config).await.ok()?;
    let found = resolve_against(config.cwd(), strip_query(&found));
    let root = found.strip_suffix(strip_query(href)).unwrap_or_default();
    Some(if root.is_empty() { "/".to_string() } else { root.to_string() })
}
