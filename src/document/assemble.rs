//! Document loading and stylesheet concatenation

use futures::future::join_all;
use log::{debug, info};
use std::path::PathBuf;

use super::temp_tree::{TempTree, prepare_render_tree};
use super::virtual_path::compute_document_virtual_path;
use crate::asset::{AssetDescriptor, Source, materialize};
use crate::config::CriticalConfig;
use crate::error::AssetResult;
use crate::filesystem::glob_expand;
use crate::locator::dirname;
use crate::markup::extract_stylesheet_hrefs;
use crate::stylesheet::load_stylesheet;

/// A loaded document together with its render tree
#[derive(Debug)]
pub struct PreparedDocument {
    pub document: AssetDescriptor,
    pub tree: TempTree,
}

/// Load the document at a local path or URL with all of its stylesheets
///
/// # Errors
///
/// Propagates lookup, read and fetch failures of the document and of every
/// stylesheet that must resolve.
pub async fn load_document(reference: &str, config: &CriticalConfig) -> AssetResult<AssetDescriptor> {
    load(Source::from(reference), config).await
}

/// Like [`load_document`], for HTML that is already in memory
pub async fn load_document_from_source(
    html: impl Into<String>,
    config: &CriticalConfig,
) -> AssetResult<AssetDescriptor> {
    load(Source::Html(html.into()), config).await
}

/// Load a document and write its render tree
pub async fn assemble_document(
    source: impl Into<Source>,
    config: &CriticalConfig,
) -> AssetResult<PreparedDocument> {
    let document = load(source.into(), config).await?;
    let tree = prepare_render_tree(&document).await?;
    info!(
        target: "critical::document",
        "Render tree ready at {}",
        tree.html_path().display()
    );
    Ok(PreparedDocument { document, tree })
}

async fn load(source: Source, config: &CriticalConfig) -> AssetResult<AssetDescriptor> {
    let mut document = materialize(source, config).await?;
    let stylesheets = extract_stylesheet_hrefs(&document.text());
    document.stylesheets = stylesheets;

    let virtual_path = match config.rebase().endpoints() {
        Some((_, to)) => Some(to.to_string()),
        None => compute_document_virtual_path(&document, config).await,
    };
    document.virtual_path = virtual_path;
    document.cwd = document_root(&document, config);

    let css = load_css(&document, config).await?;
    document.css = css;
    debug!(
        target: "critical::document",
        "loaded document {:?} with {} stylesheets ({} bytes of css)",
        document.virtual_path,
        document.stylesheets.len(),
        document.css.len()
    );
    Ok(document)
}

/// Base if configured, else the local location minus its virtual path
fn document_root(document: &AssetDescriptor, config: &CriticalConfig) -> PathBuf {
    if let Some(base) = config.absolute_base() {
        return PathBuf::from(base);
    }

    match (document.location(), document.virtual_path()) {
        (Some(location), Some(virtual_path)) if !document.is_remote() => {
            match location.strip_suffix(virtual_path) {
                Some("") => PathBuf::from("/"),
                Some(root) => PathBuf::from(root),
                None => PathBuf::from(dirname(location)),
            }
        }
        _ => config.cwd().to_path_buf(),
    }
}

/// Load every stylesheet concurrently and join the non-empty ones in order
///
/// Uses the glob-expanded `css` option when set, the document's hrefs otherwise.
pub async fn load_css(document: &AssetDescriptor, config: &CriticalConfig) -> AssetResult<String> {
    let references = if config.has_css_option() {
        glob_expand(config.css(), config.base(), config.cwd()).await?
    } else {
        document.stylesheets().to_vec()
    };

    let results = join_all(
        references
            .iter()
            .map(|reference| load_stylesheet(document, reference, config)),
    )
    .await;

    let mut parts = Vec::with_capacity(results.len());
    for result in results {
        let stylesheet = result?;
        if !stylesheet.is_null() {
            parts.push(stylesheet.text().into_owned());
        }
    }
    Ok(parts.join("\n"))
}
