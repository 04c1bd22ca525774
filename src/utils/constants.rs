//! Shared constants for stylesheet resolution and render-tree preparation
//!
//! Default values and literal path segments used across the crate, kept in one
//! place so the search-path builder and the temp-tree writer agree on them.

/// Default user agent sent with every remote fetch
///
/// Only used when the caller does not configure `user_agent`.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Placeholder origin for parsing protocol-relative references
///
/// `//cdn.test/a.css` has no scheme of its own, so it is parsed against this origin
/// to get URL semantics for relative math. Only the path part is ever read back.
pub const PLACEHOLDER_ORIGIN: &str = "https://ba.se";

/// Operator warning emitted when the document root has to be guessed
pub const BASE_WARNING: &str =
    "Missing base path. Consider the 'base' option to make stylesheet resolution deterministic";

/// Directory segment used to mirror `../` hops inside the render tree
pub const TEMP_HOP_SEGMENT: &str = "sub";

/// Directory segment used to mirror `../` hops below the system temp dir
/// when building search paths
pub const TEMP_SEARCH_SEGMENT: &str = "tmpdir";

/// File name of the document inside the render tree
pub const TEMP_DOCUMENT_NAME: &str = "index.html";

/// Prefix for temp render-tree roots
pub const TEMP_ROOT_PREFIX: &str = "critical-";

/// Appended to remote document paths that end with a slash
pub const DIRECTORY_INDEX: &str = "index.html";
