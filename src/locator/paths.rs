//! Lexical path helpers
//!
//! All local path arithmetic is done on strings with `/` separators and folds `.`
//! and `..` segments without touching the filesystem, so candidate locations that
//! pass through directories which do not exist still collapse to real paths.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref DRIVE_LETTER: Regex =
        Regex::new(r"^[a-zA-Z]:").expect("BUG: hardcoded drive-letter pattern is invalid");
    static ref LEADING_HOPS: Regex =
        Regex::new(r"^(\.\./)+").expect("BUG: hardcoded hop pattern is invalid");
}

/// Normalize a path for comparison or storage as a virtual path
///
/// On Windows the drive letter is removed and separators become forward slashes.
/// Elsewhere the path is returned unchanged.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    if cfg!(windows) {
        normalize_windows_path(path)
    } else {
        path.to_string()
    }
}

fn normalize_windows_path(path: &str) -> String {
    DRIVE_LETTER.replace(path, "").replace('\\', "/")
}

/// Absolute local path check, independent of the reference being a URL
#[must_use]
pub fn is_absolute_path(path: &str) -> bool {
    if path.starts_with('/') {
        return true;
    }
    if cfg!(windows) {
        return path.starts_with('\\') || Path::new(path).is_absolute();
    }
    false
}

/// Remove a trailing `?query`
#[must_use]
pub fn strip_query(reference: &str) -> &str {
    match reference.find('?') {
        Some(idx) => &reference[..idx],
        None => reference,
    }
}

/// Fold `.` and `..` segments and duplicate separators
///
/// Leading `..` segments of a relative path are kept. A trailing separator is kept.
/// An empty result becomes `.`.
#[must_use]
pub fn normalize_lexically(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let unified = if cfg!(windows) {
        path.replace('\\', "/")
    } else {
        path.to_string()
    };
    let absolute = unified.starts_with('/');
    let trailing = unified.ends_with('/') || unified.ends_with("/.") || unified.ends_with("/..");

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if absolute {
        normalized.insert(0, '/');
    }
    if normalized.is_empty() {
        return ".".to_string();
    }
    if trailing && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Concatenate `base` and `part` and normalize the result
///
/// An absolute `part` is appended under `base` rather than replacing it.
#[must_use]
pub fn join_paths(base: &str, part: &str) -> String {
    match (base.is_empty(), part.is_empty()) {
        (true, true) => ".".to_string(),
        (true, false) => normalize_lexically(part),
        (false, true) => normalize_lexically(base),
        (false, false) => normalize_lexically(&format!("{base}/{part}")),
    }
}

/// Directory part of `path`
///
/// `/a/b/c.css` gives `/a/b`, `c.css` gives `.`, `/a` gives `/`.
#[must_use]
pub fn dirname(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') { "/" } else { "." }.to_string();
    }
    match trimmed.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
        None => ".".to_string(),
    }
}

/// Resolve `path` against `cwd` when it is relative, then normalize
#[must_use]
pub fn resolve_against(cwd: &Path, path: &str) -> String {
    if is_absolute_path(path) {
        normalize_lexically(path)
    } else {
        join_paths(&cwd.to_string_lossy(), path)
    }
}

/// `/`-rooted form of a path relative to some root
#[must_use]
pub fn rooted(relative: &str) -> String {
    normalize_path(&normalize_lexically(&format!("/{relative}")))
}

/// Filesystem location of a local reference, `file://` prefix dropped
#[must_use]
pub fn to_filesystem_path(cwd: &Path, reference: &str) -> String {
    resolve_against(cwd, reference.strip_prefix("file://").unwrap_or(reference))
}

/// Relative path from directory `from` to `to`, both made absolute against `cwd`
///
/// Returns an empty string when both point at the same location.
#[must_use]
pub fn relative_path(cwd: &Path, from: &str, to: &str) -> String {
    let from = resolve_against(cwd, from);
    let to = resolve_against(cwd, to);
    let from = from.trim_end_matches('/');
    let to = to.trim_end_matches('/');
    let from = if from.is_empty() { "/" } else { from };
    let to = if to.is_empty() { "/" } else { to };

    match pathdiff::diff_paths(to, from) {
        Some(diff) => normalize_path(&diff.to_string_lossy()),
        None => to.to_string(),
    }
}

/// Number of leading `../` hops and the hop prefix itself
#[must_use]
pub fn leading_hops(reference: &str) -> (usize, &str) {
    match LEADING_HOPS.find(reference) {
        Some(found) => (found.as_str().len() / 3, found.as_str()),
        None => (0, ""),
    }
}
