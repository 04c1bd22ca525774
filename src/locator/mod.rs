//! Reference classification and path/URL arithmetic
//!
//! Every address the crate handles is one of four kinds: absolute local path,
//! relative local path, absolute URL or protocol-relative URL. This module
//! classifies references once into a [`Reference`] and provides the join/resolve
//! operations that work uniformly across both addressing schemes.

pub mod combine;
pub mod paths;
pub mod reference;

pub use combine::{join, resolve};
pub use paths::{
    dirname, is_absolute_path, join_paths, leading_hops, normalize_lexically, normalize_path,
    relative_path, resolve_against, rooted, strip_query, to_filesystem_path,
};
pub use reference::{ParsedReference, Reference, is_relative, is_remote, parse};
