//! Rewriting `url()` references after a stylesheet changes context
//!
//! Strategy selection is a fixed, ordered decision table: the first strategy whose
//! predicate holds is applied. When none holds the stylesheet is left as it is and
//! a warning goes to the diagnostics sink.

use log::debug;
use std::path::Path;

use crate::asset::AssetDescriptor;
use crate::config::{CriticalConfig, RebaseDirective, RebaseTransform};
use crate::locator::{
    dirname, is_absolute_path, is_remote, parse, relative_path, resolve,
};
use crate::markup::rewrite_css_urls;

/// Everything a custom rebase transform gets to see about one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseAsset {
    /// Reference as written in the stylesheet
    pub url: String,
    /// Resolved against the stylesheet's virtual path, without query or hash
    pub absolute_path: String,
    /// `absolute_path` relative to the document's directory
    pub relative_path: String,
    pub pathname: String,
    /// `?query` part, empty when absent
    pub search: String,
    /// `#fragment` part, empty when absent
    pub hash: String,
    pub stylesheet_path: Option<String>,
    pub document_path: Option<String>,
}

/// Output form of rewritten references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebaseMethod {
    /// Relative to the directory of `to`
    #[default]
    Relative,
    /// Absolute path, or absolute URL for remote stylesheets
    Absolute,
}

/// Rewrite every `url()` in `css` from the context of `from` to the context of `to`
///
/// `data:` URIs, fragment-only references and references that carry their own
/// origin are never touched. Root-absolute references are kept, except that
/// [`RebaseMethod::Absolute`] resolves them against a remote `from`.
#[must_use]
pub fn rebase_stylesheet(css: &str, from: &str, to: &str, method: RebaseMethod) -> String {
    rewrite_css_urls(css, |reference| rebase_reference(reference, from, to, method))
}

fn rebase_reference(reference: &str, from: &str, to: &str, method: RebaseMethod) -> Option<String> {
    if is_inert(reference) || is_remote(reference) {
        return None;
    }

    let (path, suffix) = split_suffix(reference);
    if is_absolute_path(path) {
        return match method {
            RebaseMethod::Absolute if is_remote(from) => resolve(from, reference).ok(),
            _ => None,
        };
    }

    let absolute = resolve(from, path).ok()?;
    let rebased = match method {
        RebaseMethod::Absolute => absolute,
        RebaseMethod::Relative => relative_to(&absolute, to),
    };
    Some(format!("{rebased}{suffix}"))
}

/// Express `absolute` relative to the directory of `to`
///
/// Assets on another origin than `to` stay absolute.
fn relative_to(absolute: &str, to: &str) -> String {
    let asset_remote = is_remote(absolute);
    if asset_remote && !same_origin(absolute, to) {
        return absolute.to_string();
    }

    let asset = pathname_of(absolute);
    let target = pathname_of(to);
    let relative = relative_path(Path::new("/"), &dirname(&target), &asset);
    if relative.is_empty() {
        ".".to_string()
    } else {
        relative
    }
}

fn same_origin(a: &str, b: &str) -> bool {
    match (parse(a), parse(b)) {
        (Ok(a), Ok(b)) => match (a.url(), b.url()) {
            (Some(a), Some(b)) => a.origin() == b.origin(),
            _ => false,
        },
        _ => false,
    }
}

fn pathname_of(reference: &str) -> String {
    parse(reference)
        .map(|parsed| parsed.pathname().to_string())
        .unwrap_or_else(|_| reference.to_string())
}

fn is_data_uri(reference: &str) -> bool {
    reference
        .trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

fn is_inert(reference: &str) -> bool {
    reference.is_empty() || reference.starts_with('#') || is_data_uri(reference)
}

/// `("img/a.png", "?v=1#x")` for `img/a.png?v=1#x`
fn split_suffix(reference: &str) -> (&str, &str) {
    match reference.find(['?', '#']) {
        Some(idx) => reference.split_at(idx),
        None => (reference, ""),
    }
}

/// Inputs to strategy selection for one stylesheet
pub(crate) struct RebaseContext<'a> {
    pub(crate) config: &'a CriticalConfig,
    pub(crate) document: &'a AssetDescriptor,
    /// Reference the stylesheet was loaded from, for warnings
    pub(crate) reference: &'a str,
    pub(crate) stylesheet_path: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RebaseStrategy {
    Unchanged,
    Pair,
    Transform,
    RemoteTarget,
    DocumentRelative,
}

type Predicate = fn(&RebaseContext<'_>) -> bool;

const DECISION_TABLE: [(RebaseStrategy, Predicate); 5] = [
    (RebaseStrategy::Unchanged, rebase_disabled),
    (RebaseStrategy::Pair, has_pair),
    (RebaseStrategy::Transform, has_transform),
    (RebaseStrategy::RemoteTarget, targets_remote),
    (RebaseStrategy::DocumentRelative, has_document_anchor),
];

fn rebase_disabled(ctx: &RebaseContext<'_>) -> bool {
    ctx.config.rebase().is_disabled()
}

fn has_pair(ctx: &RebaseContext<'_>) -> bool {
    ctx.config.rebase().endpoints().is_some()
}

fn has_transform(ctx: &RebaseContext<'_>) -> bool {
    matches!(ctx.config.rebase(), RebaseDirective::Transform(_))
}

fn targets_remote(ctx: &RebaseContext<'_>) -> bool {
    ctx.stylesheet_path.is_some_and(is_remote)
}

fn has_document_anchor(ctx: &RebaseContext<'_>) -> bool {
    ctx.stylesheet_path.is_some_and(|stylesheet| {
        ctx.document.is_remote()
            || ctx.document.virtual_path().is_some()
            || is_absolute_path(stylesheet)
    })
}

pub(crate) fn select_strategy(ctx: &RebaseContext<'_>) -> Option<RebaseStrategy> {
    DECISION_TABLE
        .iter()
        .find(|(_, applies)| applies(ctx))
        .map(|(strategy, _)| *strategy)
}

/// Rebased contents, or `None` when the stylesheet stays as it is
pub(crate) fn apply_rebase(css: &str, ctx: &RebaseContext<'_>) -> Option<String> {
    let Some(strategy) = select_strategy(ctx) else {
        ctx.config.warn(&format!(
            "Not rebasing assets for {}. Use \"rebase\" option",
            ctx.reference
        ));
        return None;
    };
    debug!(target: "critical::rebase", "{}: {strategy:?}", ctx.reference);

    match strategy {
        RebaseStrategy::Unchanged => None,
        RebaseStrategy::Pair => {
            let (from, to) = ctx.config.rebase().endpoints()?;
            Some(rebase_stylesheet(css, from, to, RebaseMethod::Relative))
        }
        RebaseStrategy::Transform => match ctx.config.rebase() {
            RebaseDirective::Transform(transform) => Some(transform_assets(css, ctx, transform)),
            _ => None,
        },
        RebaseStrategy::RemoteTarget => {
            let target = ctx.stylesheet_path?;
            Some(rebase_stylesheet(css, target, target, RebaseMethod::Absolute))
        }
        RebaseStrategy::DocumentRelative => document_relative(css, ctx),
    }
}

fn document_relative(css: &str, ctx: &RebaseContext<'_>) -> Option<String> {
    let stylesheet = ctx.stylesheet_path?;

    if ctx.document.is_remote() {
        let to = ctx.document.url_obj()?.pathname();
        return Some(rebase_stylesheet(css, stylesheet, to, RebaseMethod::Relative));
    }
    if let Some(to) = ctx.document.virtual_path() {
        return Some(rebase_stylesheet(css, stylesheet, to, RebaseMethod::Relative));
    }
    is_absolute_path(stylesheet)
        .then(|| rebase_stylesheet(css, stylesheet, stylesheet, RebaseMethod::Absolute))
}

fn transform_assets(css: &str, ctx: &RebaseContext<'_>, transform: &RebaseTransform) -> String {
    rewrite_css_urls(css, |reference| {
        if is_data_uri(reference) {
            return None;
        }
        let asset = describe_asset(reference, ctx.stylesheet_path, ctx.document.virtual_path());
        transform.apply(&asset)
    })
}

fn describe_asset(
    reference: &str,
    stylesheet_path: Option<&str>,
    document_path: Option<&str>,
) -> RebaseAsset {
    let (path, suffix) = split_suffix(reference);
    let (search, hash) = match suffix.find('#') {
        Some(idx) => suffix.split_at(idx),
        None => (suffix, ""),
    };

    let absolute_path = match stylesheet_path {
        Some(stylesheet) if !path.is_empty() && !is_remote(path) => {
            resolve(stylesheet, path).unwrap_or_else(|_| path.to_string())
        }
        _ => path.to_string(),
    };
    let relative_path = match document_path {
        Some(document) if !is_remote(&absolute_path) => {
            relative_to(&absolute_path, document)
        }
        _ => absolute_path.clone(),
    };

    RebaseAsset {
        url: reference.to_string(),
        pathname: pathname_of(&absolute_path),
        absolute_path,
        relative_path,
        search: search.to_string(),
        hash: hash.to_string(),
        stylesheet_path: stylesheet_path.map(str::to_string),
        document_path: document_path.map(str::to_string),
    }
}
