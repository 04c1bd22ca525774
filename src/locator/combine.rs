//! Joining and resolving references across local and remote schemes

use super::paths::{is_absolute_path, join_paths, normalize_lexically, strip_query};
use super::reference::{ParsedReference, Reference, parse, strip_scheme};
use crate::error::{AssetError, AssetResult};

/// Resolve `to` relative to the resource `from`
///
/// A remote `from` resolves `to` as a URL; an absolute `to` replaces it entirely.
/// A local `from` returns an absolute or remote `to` unchanged and otherwise joins
/// `to` under the directory containing `from`.
pub fn resolve(from: &str, to: &str) -> AssetResult<String> {
    let from_ref = Reference::classify(from);

    if from_ref.is_remote() {
        let parsed = parse(from)?;
        let ParsedReference::Url {
            url,
            protocol_relative,
        } = parsed
        else {
            return Err(AssetError::InvalidUrl(from.to_string()));
        };

        let joined = url
            .join(to)
            .map_err(|_| AssetError::InvalidUrl(format!("{to} (relative to {from})")))?;

        // A protocol-relative base stays protocol-relative unless `to` brings a scheme
        if protocol_relative && !matches!(Reference::classify(to), Reference::AbsoluteUrl(_)) {
            return Ok(strip_scheme(joined.as_str()).to_string());
        }
        return Ok(joined.to_string());
    }

    let to_ref = Reference::classify(to);
    if to_ref.is_remote() || is_absolute_path(to) {
        return Ok(to.to_string());
    }

    let directory = match from.rfind('/') {
        Some(idx) => &from[..=idx],
        None => "",
    };
    if directory.is_empty() {
        return Ok(normalize_lexically(to));
    }
    Ok(join_paths(directory, to))
}

/// Combine a search location with a reference
///
/// Remote bases use URL resolution. Local bases join paths after dropping any query
/// string from `part`. An empty `part` returns `base` unchanged.
pub fn join(base: &str, part: &str) -> AssetResult<String> {
    if part.is_empty() {
        return Ok(base.to_string());
    }

    if Reference::classify(base).is_remote() {
        return resolve(base, part);
    }

    Ok(join_paths(base, strip_query(part)))
}
