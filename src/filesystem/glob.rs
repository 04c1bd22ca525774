//! Glob expansion for the explicit stylesheet list
//!
//! Patterns are compiled with `globset` and matched against the files found by
//! walking the pattern's static prefix directory.

use anyhow::Context;
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, trace};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::ops::path_exists;
use crate::error::{AssetError, AssetResult};
use crate::locator::{is_remote, join_paths, resolve_against};

/// True if `pattern` contains glob syntax
///
/// `?` is not treated as a wildcard since stylesheet references often carry query strings.
#[must_use]
pub fn has_glob_magic(pattern: &str) -> bool {
    pattern.contains(['*', '[', '{'])
}

/// Compile a glob pattern into a matcher
///
/// `*` never crosses a `/`, `**` spans directories. A `?` matches itself.
///
/// # Errors
///
/// Returns an error if the pattern is not a valid glob.
pub fn compile_glob(pattern: &str) -> AssetResult<GlobMatcher> {
    let literal_queries = pattern.replace('?', "[?]");
    GlobBuilder::new(&literal_queries)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| AssetError::Config(format!("Invalid glob pattern '{pattern}': {e}")))
}

/// Expand stylesheet patterns into literal references
///
/// Each pattern is tried as given and, when `base` is a local path, again joined
/// under `base`. Remote entries pass through, plain paths are kept if they exist,
/// `!pattern` entries remove matches. Local results are absolute. Order follows the
/// patterns; duplicates are dropped.
pub async fn glob_expand(
    patterns: &[String],
    base: Option<&str>,
    cwd: &Path,
) -> AssetResult<Vec<String>> {
    let local_base = base.filter(|b| !is_remote(b));

    let mut candidates: Vec<String> = patterns.to_vec();
    if let Some(base) = local_base {
        for pattern in patterns.iter().filter(|p| !is_remote(p)) {
            match pattern.strip_prefix('!') {
                Some(negated) => candidates.push(format!("!{}", join_paths(base, negated))),
                None => candidates.push(join_paths(base, pattern)),
            }
        }
    }

    let mut found = Vec::new();
    let mut negations = Vec::new();
    for pattern in &candidates {
        if is_remote(pattern) {
            found.push(pattern.clone());
        } else if let Some(negated) = pattern.strip_prefix('!') {
            negations.push(compile_glob(&resolve_against(cwd, negated))?);
        } else if has_glob_magic(pattern) {
            found.extend(walk_glob(&resolve_against(cwd, pattern)).await?);
        } else {
            let absolute = resolve_against(cwd, pattern);
            if path_exists(&absolute).await {
                found.push(absolute);
            }
        }
    }

    let mut seen = HashSet::new();
    let expanded: Vec<String> = found
        .into_iter()
        .filter(|path| !negations.iter().any(|n| n.is_match(path)))
        .filter(|path| seen.insert(path.clone()))
        .collect();

    debug!(target: "critical::glob", "expanded {patterns:?} to {expanded:?}");
    Ok(expanded)
}

/// Walk the static prefix of an absolute glob and collect matching files
async fn walk_glob(pattern: &str) -> AssetResult<Vec<String>> {
    let matcher = compile_glob(pattern)?;

    let prefix: Vec<&str> = pattern
        .split('/')
        .take_while(|segment| !has_glob_magic(segment))
        .collect();
    let root = match prefix.join("/") {
        p if p.is_empty() => PathBuf::from("/"),
        p => PathBuf::from(p),
    };

    if !path_exists(&root).await {
        return Ok(Vec::new());
    }

    let walked = root.display().to_string();
    let matches = tokio::task::spawn_blocking(move || {
        let mut matches = Vec::new();
        for entry in jwalk::WalkDir::new(&root).sort(true).skip_hidden(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    trace!(target: "critical::glob", "skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path().to_string_lossy().replace('\\', "/");
            if matcher.is_match(&path) {
                matches.push(path);
            }
        }
        matches
    })
    .await
    .with_context(|| format!("glob walk under {walked} did not complete"))?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compiles_common_globs() {
        let glob = compile_glob("/site/**/*.css").unwrap();
        assert!(glob.is_match("/site/a.css"));
        assert!(glob.is_match("/site/css/deep/b.css"));
        assert!(!glob.is_match("/site/a.scss"));

        let glob = compile_glob("/site/*.{css,less}").unwrap();
        assert!(glob.is_match("/site/a.less"));
        assert!(!glob.is_match("/site/sub/a.css"));

        let glob = compile_glob("/site/main.[0-9].css").unwrap();
        assert!(glob.is_match("/site/main.1.css"));
    }

    #[test]
    fn negated_character_classes() {
        let glob = compile_glob("/s/[!a].css").unwrap();
        assert!(glob.is_match("/s/b.css"));
        assert!(!glob.is_match("/s/a.css"));
        assert!(glob.is_match("/s/!.css"));
    }

    #[test]
    fn question_mark_is_literal() {
        let glob = compile_glob("/s/*.css?v=1").unwrap();
        assert!(glob.is_match("/s/a.css?v=1"));
        assert!(!glob.is_match("/s/a.cssxv=1"));
    }

    #[test]
    fn invalid_patterns_are_config_errors() {
        assert!(matches!(compile_glob("/s/{a,b"), Err(AssetError::Config(_))));
    }

    #[test]
    fn query_marks_are_not_magic() {
        assert!(!has_glob_magic("css/a.css?v=2"));
        assert!(has_glob_magic("css/*.css"));
    }

    #[tokio::test]
    async fn expands_globs_plain_paths_and_negations() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("css/vendor")).unwrap();
        std::fs::write(root.join("css/a.css"), "").unwrap();
        std::fs::write(root.join("css/b.css"), "").unwrap();
        std::fs::write(root.join("css/vendor/c.css"), "").unwrap();

        let patterns = vec![
            "css/**/*.css".to_string(),
            "!css/vendor/*.css".to_string(),
            "https://cdn.test/x.css".to_string(),
            "css/a.css".to_string(),
            "css/missing.css".to_string(),
        ];
        let expanded = glob_expand(&patterns, None, root).await.unwrap();

        let root = root.to_string_lossy().replace('\\', "/");
        assert_eq!(expanded, vec![
            format!("{root}/css/a.css"),
            format!("{root}/css/b.css"),
            "https://cdn.test/x.css".to_string(),
        ]);
    }

    #[tokio::test]
    async fn patterns_are_also_tried_under_base() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("public/css")).unwrap();
        std::fs::write(root.join("public/css/site.css"), "").unwrap();

        let patterns = vec!["css/site.css".to_string()];
        let expanded = glob_expand(&patterns, Some("public"), root).await.unwrap();
        assert_eq!(expanded.len(), 1);
        assert!(expanded[0].ends_with("public/css/site.css"));
    }
}
