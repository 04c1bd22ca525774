//! Upward directory search

use std::path::{Path, PathBuf};

/// Walk from `from` towards the filesystem root and return the first
/// `<ancestor>/<name>` that is a directory
///
/// `from` itself is the first directory checked. When several ancestors contain a
/// directory called `name`, the nearest one wins.
pub async fn find_ancestor_directory(name: &str, from: impl AsRef<Path>) -> Option<PathBuf> {
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    let mut current = Some(from.as_ref());
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if let Ok(metadata) = tokio::fs::metadata(&candidate).await
            && metadata.is_dir()
        {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
