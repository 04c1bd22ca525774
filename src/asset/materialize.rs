//! Turning a source into a readable descriptor

use log::debug;

use super::descriptor::AssetDescriptor;
use crate::config::CriticalConfig;
use crate::error::{AssetError, AssetResult};
use crate::fetch::fetch_body;
use crate::filesystem::{path_exists, read_file};
use crate::locator::{Reference, parse, strip_query, to_filesystem_path};

/// Anything a descriptor can be built from
#[derive(Debug, Clone)]
pub enum Source {
    /// Literal HTML markup
    Html(String),
    /// Already resolved; passed through
    Descriptor(Box<AssetDescriptor>),
    /// Local path or URL
    Reference(String),
}

impl From<&str> for Source {
    fn from(reference: &str) -> Self {
        Source::Reference(reference.to_string())
    }
}

impl From<String> for Source {
    fn from(reference: String) -> Self {
        Source::Reference(reference)
    }
}

impl From<AssetDescriptor> for Source {
    fn from(descriptor: AssetDescriptor) -> Self {
        Source::Descriptor(Box::new(descriptor))
    }
}

/// Read or fetch `source` into a descriptor
///
/// Remote references take their virtual path from the URL path. Local references
/// must exist, either literally or once a `?query` suffix is removed.
///
/// # Errors
///
/// `FileNotFound` with an empty search-path list for missing local references,
/// `Http` for transport failures.
pub async fn materialize(source: Source, config: &CriticalConfig) -> AssetResult<AssetDescriptor> {
    let reference = match source {
        Source::Html(html) => return Ok(AssetDescriptor::from_html(html, config.cwd())),
        Source::Descriptor(descriptor) => return Ok(*descriptor),
        Source::Reference(reference) => reference,
    };

    match Reference::classify(&reference) {
        _ if reference.is_empty() => Err(AssetError::not_found(reference, Vec::new())),
        r if r.is_remote() => {
            let body = fetch_body(&reference, config).await?;
            let url_obj = parse(&reference)?;
            debug!(target: "critical::asset", "fetched {reference} ({} bytes)", body.len());
            Ok(AssetDescriptor::from_remote(reference, url_obj, body, config.cwd()))
        }
        _ => {
            let Some(location) = locate_local(&reference, config).await else {
                return Err(AssetError::not_found(reference, Vec::new()));
            };
            let contents = read_file(&location).await?;
            debug!(target: "critical::asset", "read {location} ({} bytes)", contents.len());
            Ok(AssetDescriptor::from_local(reference, location, contents, config.cwd()))
        }
    }
}

/// Literal path first, then without the query string
async fn locate_local(reference: &str, config: &CriticalConfig) -> Option<String> {
    let literal = to_filesystem_path(config.cwd(), reference);
    if path_exists(&literal).await {
        return Some(literal);
    }

    let stripped = strip_query(reference);
    if stripped.len() == reference.len() {
        return None;
    }
    let stripped = to_filesystem_path(config.cwd(), stripped);
    path_exists(&stripped).await.then_some(stripped)
}
