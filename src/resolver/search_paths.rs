//! Candidate base locations for a reference
//!
//! The list over-generates on purpose: non-existent or redundant entries only cost
//! an existence check, while a missing entry makes a resolvable stylesheet fail. The
//! resolver stops at the first candidate that works, so order is what matters.

use log::debug;
use std::collections::HashSet;

use crate::asset::{AssetDescriptor, Source};
use crate::config::CriticalConfig;
use crate::filesystem::{find_ancestor_directory, path_exists};
use crate::locator::{
    dirname, is_relative, is_remote, join, join_paths, leading_hops, normalize_lexically, resolve,
    strip_query, to_filesystem_path,
};
use crate::utils::{TEMP_HOP_SEGMENT, TEMP_SEARCH_SEGMENT};

/// Ordered, duplicate-free candidate list
#[derive(Debug, Default)]
struct Candidates {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl Candidates {
    fn push(&mut self, candidate: impl Into<String>) {
        let candidate = candidate.into();
        if !candidate.is_empty() && self.seen.insert(candidate.clone()) {
            self.items.push(candidate);
        }
    }

    fn push_opt(&mut self, candidate: Option<String>) {
        if let Some(candidate) = candidate {
            self.push(candidate);
        }
    }

    fn finish(self) -> Vec<String> {
        self.items
    }
}

/// `count` copies of `segment` joined with `/`
fn repeated(segment: &str, count: usize) -> String {
    vec![segment; count].join("/")
}

/// Build the search paths for `reference` as seen from `document`
///
/// Order: configured base and asset paths, document-derived locations, rebase
/// endpoints, a temp-dir replay for `../` references, the working directory. With
/// `strict`, local candidates that do not exist are dropped. Every surviving local
/// candidate is followed by the ancestor directory that contains the reference's
/// first path segment, when one is found. The nearest such ancestor wins.
pub async fn build_search_paths(
    document: &AssetDescriptor,
    reference: &Source,
    config: &CriticalConfig,
    strict: bool,
) -> Vec<String> {
    let Source::Reference(raw) = reference else {
        return Vec::new();
    };

    let remote_reference = is_remote(raw);
    let normalized = normalize_lexically(strip_query(raw));
    let (hops, _) = if remote_reference {
        (0, "")
    } else {
        leading_hops(&normalized)
    };
    let first_segment = normalized
        .split('/')
        .find(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .filter(|_| !remote_reference);

    let raw_candidates = collect_candidates(document, raw, hops, config);

    let mut filtered = Vec::with_capacity(raw_candidates.len());
    for candidate in raw_candidates {
        if !strict
            || is_remote(&candidate)
            || path_exists(to_filesystem_path(config.cwd(), &candidate)).await
        {
            filtered.push(candidate);
        }
    }

    let mut result = Candidates::default();
    for candidate in filtered {
        let local = !is_remote(&candidate);
        result.push(candidate.clone());

        let Some(first) = first_segment.filter(|_| local) else {
            continue;
        };
        let start = to_filesystem_path(config.cwd(), &candidate);
        let Some(found) = find_ancestor_directory(first, &start).await else {
            continue;
        };
        let Some(ancestor) = found.parent() else {
            continue;
        };
        let ancestor = ancestor.to_string_lossy().replace('\\', "/");
        let replay = (hops > 0).then(|| join_paths(&ancestor, &repeated(TEMP_HOP_SEGMENT, hops)));
        result.push(ancestor);
        result.push_opt(replay);
    }

    let paths = result.finish();
    debug!(target: "critical::search", "search paths for {raw}: {paths:?}");
    paths
}

/// Raw candidates in priority order, before existence filtering
fn collect_candidates(
    document: &AssetDescriptor,
    reference: &str,
    hops: usize,
    config: &CriticalConfig,
) -> Vec<String> {
    let mut candidates = Candidates::default();
    let cwd = config.cwd().to_string_lossy().replace('\\', "/");
    let base = config.base();

    if let Some(base) = base {
        candidates.push(base);
        if is_relative(base) {
            candidates.push(join_paths(&cwd, base));
        }
    }

    if let (Some(url), Some(url_obj)) = (document.url(), document.url_obj()) {
        candidates.push(url);
        let pathname = url_obj.pathname();
        if pathname != "/" {
            let directory = dirname(pathname);
            candidates.push_opt(resolve(url, &directory).ok());
            candidates.push_opt(resolve(url, &format!("{}/", directory.trim_end_matches('/'))).ok());
        }
    }

    if let Some(location) = document.location().filter(|l| !is_remote(l)) {
        let directory = dirname(location);
        let beside = join(&directory, reference).ok().map(|joined| dirname(&joined));
        candidates.push(directory);
        candidates.push_opt(beside);
    }

    for asset_path in config.asset_paths() {
        candidates.push(asset_path.clone());
    }
    if let Some(base) = base {
        for asset_path in config.asset_paths() {
            candidates.push_opt(join(base, asset_path).ok());
        }
    }

    if let Some((from, to)) = config.rebase().endpoints() {
        candidates.push(to);
        candidates.push(from);
        if let Some(base) = base {
            candidates.push_opt(join(base, to).ok());
            candidates.push_opt(join(base, from).ok());
            candidates.push_opt(join(base, &dirname(to)).ok());
            candidates.push_opt(join(base, &dirname(from)).ok());
        }
    }

    if hops > 0 {
        let temp = std::env::temp_dir().to_string_lossy().replace('\\', "/");
        candidates.push(join_paths(&temp, &repeated(TEMP_SEARCH_SEGMENT, hops)));
    }

    candidates.push(cwd);
    candidates.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RebaseDirective;
    use crate::locator::parse;
    use tempfile::TempDir;

    fn document_at(location: &str) -> AssetDescriptor {
        AssetDescriptor::from_local(location, location, b"<html></html>".to_vec(), "/")
    }

    #[tokio::test]
    async fn descriptors_have_no_search_paths() {
        let config = CriticalConfig::builder().build().unwrap();
        let doc = document_at("/project/index.html");
        let source = Source::from(AssetDescriptor::from_html("a", "/"));
        assert!(build_search_paths(&doc, &source, &config, false).await.is_empty());
    }

    #[tokio::test]
    async fn non_strict_order_is_base_document_endpoints_cwd() {
        let config = CriticalConfig::builder()
            .cwd("/work")
            .base("site")
            .asset_paths(["assets"])
            .rebase(RebaseDirective::pair("/from/a.css", "/to/b.css"))
            .build()
            .unwrap();
        let doc = document_at("/project/pages/index.html");

        let paths = build_search_paths(&doc, &"css/a.css".into(), &config, false).await;
        assert_eq!(&paths[..6], &[
            "site".to_string(),
            "/work/site".to_string(),
            "/project/pages".to_string(),
            "/project/pages/css".to_string(),
            "assets".to_string(),
            "site/assets".to_string(),
        ]);
        assert!(paths.contains(&"/to/b.css".to_string()));
        assert!(paths.contains(&"site/to".to_string()));
        assert_eq!(paths.last().map(String::as_str), Some("/work"));
    }

    #[tokio::test]
    async fn remote_document_contributes_url_directories() {
        let config = CriticalConfig::builder().cwd("/work").build().unwrap();
        let url = "https://x.test/blog/post.html";
        let doc = AssetDescriptor::from_remote(url, parse(url).unwrap(), Vec::new(), "/work");

        let paths = build_search_paths(&doc, &"css/a.css".into(), &config, true).await;
        assert_eq!(&paths[..3], &[
            url.to_string(),
            "https://x.test/blog".to_string(),
            "https://x.test/blog/".to_string(),
        ]);
    }

    #[tokio::test]
    async fn hops_add_temp_replay_and_strict_drops_missing() {
        let config = CriticalConfig::builder().cwd("/work").build().unwrap();
        let doc = document_at("/nonexistent/index.html");

        let loose = build_search_paths(&doc, &"../../shared/a.css".into(), &config, false).await;
        let temp = std::env::temp_dir().to_string_lossy().replace('\\', "/");
        assert!(loose.contains(&join_paths(&temp, "tmpdir/tmpdir")));

        let strict = build_search_paths(&doc, &"../../shared/a.css".into(), &config, true).await;
        assert!(!strict.contains(&"/nonexistent".to_string()));
    }

    #[tokio::test]
    async fn ancestor_discovery_replays_hops() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().replace('\\', "/");
        std::fs::create_dir_all(dir.path().join("shared")).unwrap();
        std::fs::create_dir_all(dir.path().join("site/pages")).unwrap();
        let config = CriticalConfig::builder().cwd(dir.path()).build().unwrap();
        let doc = document_at(&format!("{root}/site/pages/index.html"));

        let paths = build_search_paths(&doc, &"../../shared/a.css".into(), &config, true).await;
        assert!(paths.contains(&root));
        assert!(paths.contains(&format!("{root}/sub/sub")));
    }
}
