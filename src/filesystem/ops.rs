//! Basic file operations

use log::trace;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AssetError, AssetResult};

/// True if `path` exists; any error counts as "does not exist"
pub async fn path_exists(path: impl AsRef<Path>) -> bool {
    tokio::fs::try_exists(path.as_ref()).await.unwrap_or(false)
}

pub async fn read_file(path: impl AsRef<Path>) -> AssetResult<Vec<u8>> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .map_err(|e| AssetError::io(path, e))
}

/// Write `contents`, creating missing parent directories first
pub async fn write_file(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> AssetResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AssetError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| AssetError::io(path, e))?;
    trace!(target: "critical::fs", "wrote {}", path.display());
    Ok(())
}

/// Remove a file or directory tree
///
/// Returns `Ok(false)` when nothing was there to remove.
pub async fn remove_path(path: impl AsRef<Path>) -> AssetResult<bool> {
    let path = path.as_ref();
    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(AssetError::io(path, e)),
    };

    let result = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AssetError::io(path, e)),
    }
}
