use log::debug;

use super::rebase::{RebaseContext, apply_rebase};
use super::virtual_path::compute_stylesheet_virtual_path;
use crate::asset::{AssetDescriptor, Source, materialize};
use crate::config::CriticalConfig;
use crate::error::AssetResult;
use crate::locator::{is_remote, to_filesystem_path};
use crate::resolver::{build_search_paths, reference_exists, resolve_reference};

/// Resolve, read and rebase the stylesheet `reference` of `document`
///
/// References that do not exist as written are resolved through the search paths.
/// Outside strict mode an unresolvable remote reference yields an empty descriptor.
/// Stylesheets from the explicit `css` option get an absolute path; discovered ones
/// keep the path their author wrote, with the resolved location on `history`.
///
/// # Errors
///
/// `FileNotFound` for unresolvable local references (or any reference in strict
/// mode), plus read and fetch failures.
pub async fn load_stylesheet(
    document: &AssetDescriptor,
    reference: &str,
    config: &CriticalConfig,
) -> AssetResult<AssetDescriptor> {
    let location = if reference_exists(reference, config).await {
        reference.to_string()
    } else {
        let search_paths = build_search_paths(document, &Source::from(reference), config, true).await;
        match resolve_reference(reference, &search_paths, config).await {
            Ok(location) => location,
            Err(error) if is_remote(reference) && !config.strict() => {
                debug!(target: "critical::stylesheet", "skipping {reference}: {error}");
                return Ok(AssetDescriptor::empty(config.cwd()));
            }
            Err(error) => return Err(error),
        }
    };

    let mut stylesheet = materialize(Source::Reference(location.clone()), config).await?;
    if !stylesheet.is_remote() {
        if config.has_css_option() {
            stylesheet.path = Some(to_filesystem_path(config.cwd(), &location));
        } else if !is_remote(reference) {
            stylesheet.path = Some(reference.to_string());
        }
    }

    stylesheet.virtual_path = compute_stylesheet_virtual_path(document, &stylesheet, config);

    let rebased = {
        let ctx = RebaseContext {
            config,
            document,
            reference,
            stylesheet_path: stylesheet.virtual_path.as_deref(),
        };
        apply_rebase(&stylesheet.text(), &ctx)
    };
    if let Some(rebased) = rebased {
        stylesheet.contents = Some(rebased.into_bytes());
    }

    debug!(
        target: "critical::stylesheet",
        "loaded {reference} as {:?}",
        stylesheet.virtual_path
    );
    Ok(stylesheet)
}
