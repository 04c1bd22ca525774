//! On-disk render tree
//!
//! The renderer loads the document from disk, so relative stylesheet hrefs must
//! resolve to real files. The document is written `max_hops` directories deep
//! (`sub/sub/...`) below a fresh temp root so that every `../` run stays inside the
//! tree. The first relative href receives the full CSS, the others empty
//! placeholders.

use log::{debug, warn};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::asset::AssetDescriptor;
use crate::error::{AssetError, AssetResult};
use crate::filesystem::{remove_path, write_file};
use crate::locator::{is_relative, join_paths, leading_hops, normalize_lexically, strip_query};
use crate::markup::inline_css_into_head;
use crate::utils::{TEMP_DOCUMENT_NAME, TEMP_HOP_SEGMENT, TEMP_ROOT_PREFIX};

/// Handle to a prepared render tree
///
/// Call [`TempTree::cleanup`] once the renderer is done. A tree that is dropped
/// without cleanup is removed synchronously.
#[derive(Debug)]
pub struct TempTree {
    dir: Option<TempDir>,
    root: PathBuf,
    html_path: PathBuf,
    files: Vec<PathBuf>,
}

impl TempTree {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Document HTML with all CSS inlined into `<head>`
    #[must_use]
    pub fn html_path(&self) -> &Path {
        &self.html_path
    }

    /// Every file written, document first
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Remove every file and directory of the tree
    ///
    /// Entries that are already gone are skipped.
    pub async fn cleanup(mut self) -> AssetResult<()> {
        for file in self.files.iter().rev() {
            remove_path(file).await?;
        }
        remove_path(&self.root).await?;

        if let Some(dir) = self.dir.take()
            && let Err(e) = dir.close()
            && e.kind() != ErrorKind::NotFound
        {
            return Err(AssetError::io(&self.root, e));
        }
        debug!(target: "critical::tree", "removed {}", self.root.display());
        Ok(())
    }
}

impl Drop for TempTree {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take()
            && let Err(e) = dir.close()
        {
            warn!(
                target: "critical::tree",
                "Failed to remove render tree {}: {e}",
                self.root.display()
            );
        }
    }
}

/// Write the render tree for a loaded document
///
/// # Errors
///
/// Fails when the temp root cannot be created, a file cannot be written or the
/// CSS cannot be injected into the HTML.
pub async fn prepare_render_tree(document: &AssetDescriptor) -> AssetResult<TempTree> {
    let dir = tempfile::Builder::new()
        .prefix(TEMP_ROOT_PREFIX)
        .tempdir()
        .map_err(|e| AssetError::io(std::env::temp_dir(), e))?;
    let root = dir.path().to_path_buf();
    let root_str = root.to_string_lossy().replace('\\', "/");

    let relative_hrefs: Vec<String> = document
        .stylesheets()
        .iter()
        .filter(|href| is_relative(href))
        .map(|href| normalize_lexically(strip_query(href)))
        .collect();
    let max_hops = relative_hrefs
        .iter()
        .map(|href| leading_hops(href).0)
        .max()
        .unwrap_or(0);

    let html_dir = join_paths(&root_str, &vec![TEMP_HOP_SEGMENT; max_hops].join("/"));
    let html_target = join_paths(&html_dir, TEMP_DOCUMENT_NAME);
    let html_path = PathBuf::from(&html_target);

    let mut tree = TempTree {
        dir: Some(dir),
        root,
        html_path: html_path.clone(),
        files: Vec::with_capacity(relative_hrefs.len() + 1),
    };

    let html = inline_css_into_head(&document.text(), document.css())?;
    write_file(&html_path, html).await?;
    tree.files.push(html_path);

    let mut written: HashSet<String> = HashSet::from([html_target]);
    for href in &relative_hrefs {
        let target = join_paths(&html_dir, href);
        if !target.starts_with(&format!("{root_str}/")) {
            debug!(target: "critical::tree", "{href} points outside the render tree");
            continue;
        }
        if !written.insert(target.clone()) {
            continue;
        }

        let contents = if tree.files.len() == 1 { document.css() } else { "" };
        write_file(&target, contents).await?;
        tree.files.push(PathBuf::from(target));
    }

    debug!(
        target: "critical::tree",
        "prepared {} ({} files, {} hops)",
        tree.root.display(),
        tree.files.len(),
        max_hops
    );
    Ok(tree)
}
